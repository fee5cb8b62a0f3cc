//! Style and theming.

use crate::render::Color;

/// Colors used for each layer of a graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Canvas clear color.
    pub background: Color,
    /// Grid line color.
    pub grid: Color,
    /// Axis and arrow-mark color.
    pub axes: Color,
    /// Expression curve color.
    pub curve: Color,
}

impl Theme {
    /// Light strokes on a black canvas.
    pub const fn dark() -> Self {
        Self {
            background: Color::rgb(0x000000),
            grid: Color::rgb(0x555555),
            axes: Color::rgb(0xffffff),
            curve: Color::rgb(0xffaaff),
        }
    }

    /// Dark strokes on a white canvas.
    pub const fn light() -> Self {
        Self {
            background: Color::rgb(0xffffff),
            grid: Color::rgb(0xcccccc),
            axes: Color::rgb(0x000000),
            curve: Color::rgb(0xb0309a),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
