use gpui::{
    BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels, Window, point, px,
    quad,
};

use crate::geom::ScreenRect;
use crate::render::{Color, LineSegment, LineStyle};

use super::frame::ScreenFrame;

pub(crate) fn paint_frame(frame: &ScreenFrame, window: &mut Window) {
    let bounds = to_bounds(frame.clip);
    window.paint_quad(quad(
        bounds,
        Corners::all(px(0.0)),
        to_rgba(frame.background),
        Edges::all(px(0.0)),
        to_rgba(frame.background),
        BorderStyle::default(),
    ));
    window.with_content_mask(Some(ContentMask { bounds }), |window| {
        for (style, segments) in &frame.layers {
            paint_lines(window, segments, *style);
        }
    });
}

fn paint_lines(window: &mut Window, segments: &[LineSegment], style: LineStyle) {
    if segments.is_empty() {
        return;
    }
    let width = style.width.max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    for segment in segments {
        builder.move_to(point(px(segment.start.x), px(segment.start.y)));
        builder.line_to(point(px(segment.end.x), px(segment.end.y)));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(
        point(px(rect.min.x), px(rect.min.y)),
        point(px(rect.max.x), px(rect.max.y)),
    )
}
