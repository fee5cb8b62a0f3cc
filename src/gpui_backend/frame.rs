use gpui::{Bounds, Pixels};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, Frame, LineSegment, LineStyle, project_batch};
use crate::transform::Transform;
use crate::view::Viewport;

use super::config::GpuiGraphConfig;

/// A frame projected into canvas pixels.
#[derive(Debug, Clone)]
pub(crate) struct ScreenFrame {
    pub(crate) clip: ScreenRect,
    pub(crate) background: Color,
    pub(crate) layers: Vec<(LineStyle, Vec<LineSegment>)>,
}

pub(crate) fn canvas_rect(bounds: Bounds<Pixels>) -> ScreenRect {
    let min = ScreenPoint::new(f32::from(bounds.origin.x), f32::from(bounds.origin.y));
    let max = ScreenPoint::new(
        min.x + f32::from(bounds.size.width),
        min.y + f32::from(bounds.size.height),
    );
    ScreenRect::new(min, max)
}

pub(crate) fn canvas_viewport(rect: ScreenRect) -> Viewport {
    Viewport::new(rect.width() as f64, rect.height() as f64)
}

/// Project every batch of `frame` onto the canvas rectangle.
///
/// Returns a frame with no layers when the canvas has no area.
pub(crate) fn build_screen_frame(
    frame: &Frame,
    clip: ScreenRect,
    config: &GpuiGraphConfig,
) -> ScreenFrame {
    let mut layers = Vec::new();
    if let Some(transform) = Transform::new(frame.bounds, clip) {
        let widths = [config.grid_width, config.axes_width, config.curve_width];
        for (batch, width) in frame.batches().into_iter().zip(widths) {
            for (color, segments) in project_batch(batch, &transform, clip) {
                layers.push((LineStyle { color, width }, segments));
            }
        }
    }
    ScreenFrame {
        clip,
        background: frame.background,
        layers,
    }
}
