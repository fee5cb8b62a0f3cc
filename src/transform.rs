//! Orthographic transforms between world and screen space.

use crate::coords::WorldBounds;
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::view::Range;

const MIN_SPAN: f64 = 1e-300;

/// Transform from world coordinates into screen coordinates.
///
/// Screen Y grows downward, world Y grows upward.
#[derive(Debug, Clone)]
pub struct Transform {
    screen: ScreenRect,
    x_axis: Range,
    y_axis: Range,
}

impl Transform {
    /// Create a transform mapping `bounds` onto the screen rectangle.
    pub fn new(bounds: WorldBounds, screen: ScreenRect) -> Option<Self> {
        if !screen.is_valid() {
            return None;
        }
        let x_axis = bounds.x_range();
        let y_axis = bounds.y_range();
        if !x_axis.is_finite() || !y_axis.is_finite() {
            return None;
        }
        if x_axis.span() < MIN_SPAN || y_axis.span() < MIN_SPAN {
            return None;
        }
        Some(Self {
            screen,
            x_axis,
            y_axis,
        })
    }

    /// Access the screen rectangle.
    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Map a world point into screen space.
    pub fn world_to_screen(&self, point: Point) -> Option<ScreenPoint> {
        if !point.is_finite() {
            return None;
        }
        let x_norm = (point.x - self.x_axis.min) / self.x_axis.span();
        let y_norm = (point.y - self.y_axis.min) / self.y_axis.span();
        let sx = self.screen.min.x as f64 + x_norm * self.screen.width() as f64;
        let sy = self.screen.max.y as f64 - y_norm * self.screen.height() as f64;
        let (sx, sy) = (sx as f32, sy as f32);
        if !sx.is_finite() || !sy.is_finite() {
            return None;
        }
        Some(ScreenPoint::new(sx, sy))
    }

    /// Map a screen point into world space.
    pub fn screen_to_world(&self, point: ScreenPoint) -> Point {
        let x_norm = (point.x as f64 - self.screen.min.x as f64) / self.screen.width() as f64;
        let y_norm = (self.screen.max.y as f64 - point.y as f64) / self.screen.height() as f64;
        Point::new(
            self.x_axis.min + x_norm * self.x_axis.span(),
            self.y_axis.min + y_norm * self.y_axis.span(),
        )
    }
}
