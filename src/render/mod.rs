//! Line batches, frames, and the render sink boundary.
//!
//! These types are backend-agnostic. A [`Frame`] is everything a backend
//! needs to draw one redraw: the visible world bounds, a background color,
//! and the grid, axes and curve batches in drawing order.

use crate::coords::WorldBounds;
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::transform::Transform;

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a packed `0xRRGGBB` value.
    pub const fn rgb(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Pack into `0xRRGGBB`, dropping alpha.
    pub fn to_rgb(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            width: 1.0,
        }
    }
}

/// An open polyline in world space with a single color.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Stroke color.
    pub color: Color,
}

impl Stroke {
    /// Create a stroke from its vertices.
    pub fn new(points: Vec<Point>, color: Color) -> Self {
        Self { points, color }
    }

    /// A two-point stroke.
    pub fn line(start: Point, end: Point, color: Color) -> Self {
        Self::new(vec![start, end], color)
    }

    /// Number of straight segments in the stroke.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Ordered strokes of one logical layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineBatch {
    strokes: Vec<Stroke>,
}

impl LineBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stroke.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Access all strokes.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Total straight segments over all strokes.
    pub fn segment_count(&self) -> usize {
        self.strokes.iter().map(Stroke::segment_count).sum()
    }

    /// Total vertices over all strokes.
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(|stroke| stroke.points.len()).sum()
    }

    /// Check whether the batch draws nothing.
    pub fn is_empty(&self) -> bool {
        self.segment_count() == 0
    }
}

impl FromIterator<Stroke> for LineBatch {
    fn from_iter<I: IntoIterator<Item = Stroke>>(iter: I) -> Self {
        Self {
            strokes: iter.into_iter().collect(),
        }
    }
}

/// One complete redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// World rectangle the camera shows.
    pub bounds: WorldBounds,
    /// Clear color.
    pub background: Color,
    /// Grid lines.
    pub grid: LineBatch,
    /// Axis lines and arrow marks.
    pub axes: LineBatch,
    /// Expression curve, possibly empty.
    pub curve: LineBatch,
}

impl Frame {
    /// Batches in drawing order: grid, axes, curve.
    pub fn batches(&self) -> [&LineBatch; 3] {
        [&self.grid, &self.axes, &self.curve]
    }

    /// Total straight segments in the frame.
    pub fn segment_count(&self) -> usize {
        self.batches().iter().map(|batch| batch.segment_count()).sum()
    }
}

/// Destination for rendered frames.
///
/// Each submitted frame fully replaces the previous one.
pub trait RenderSink {
    /// Replace the current geometry with `frame`.
    fn submit(&mut self, frame: Frame);

    /// Present the most recently submitted frame.
    fn present(&mut self) {}
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// Project a batch into clipped screen segments, grouped by stroke color.
///
/// Consecutive strokes sharing a color are merged into one group.
pub fn project_batch(
    batch: &LineBatch,
    transform: &Transform,
    clip: ScreenRect,
) -> Vec<(Color, Vec<LineSegment>)> {
    let mut groups: Vec<(Color, Vec<LineSegment>)> = Vec::new();
    let mut scratch = Vec::new();
    for stroke in batch.strokes() {
        build_line_segments(&stroke.points, transform, clip, &mut scratch);
        if scratch.is_empty() {
            continue;
        }
        match groups.last_mut() {
            Some((color, segments)) if *color == stroke.color => {
                segments.extend_from_slice(&scratch);
            }
            _ => groups.push((stroke.color, scratch.clone())),
        }
    }
    groups
}

/// Build clipped line segments from world points.
pub fn build_line_segments(
    points: &[Point],
    transform: &Transform,
    clip: ScreenRect,
    out: &mut Vec<LineSegment>,
) {
    out.clear();
    if points.len() < 2 {
        return;
    }
    for window in points.windows(2) {
        let Some(start) = transform.world_to_screen(window[0]) else {
            continue;
        };
        let Some(end) = transform.world_to_screen(window[1]) else {
            continue;
        };
        if let Some((clipped_start, clipped_end)) = clip_segment(start, end, clip) {
            out.push(LineSegment::new(clipped_start, clipped_end));
        }
    }
}

fn clip_segment(
    mut start: ScreenPoint,
    mut end: ScreenPoint,
    rect: ScreenRect,
) -> Option<(ScreenPoint, ScreenPoint)> {
    const LEFT: u8 = 1;
    const RIGHT: u8 = 2;
    const TOP: u8 = 4;
    const BOTTOM: u8 = 8;

    let mut out_start = region_code(start, rect, LEFT, RIGHT, TOP, BOTTOM);
    let mut out_end = region_code(end, rect, LEFT, RIGHT, TOP, BOTTOM);

    loop {
        if (out_start | out_end) == 0 {
            return Some((start, end));
        }
        if (out_start & out_end) != 0 {
            return None;
        }

        let out_code = if out_start != 0 { out_start } else { out_end };
        let (mut x, mut y) = (0.0_f32, 0.0_f32);

        if (out_code & TOP) != 0 {
            x = start.x + (end.x - start.x) * (rect.min.y - start.y) / (end.y - start.y);
            y = rect.min.y;
        } else if (out_code & BOTTOM) != 0 {
            x = start.x + (end.x - start.x) * (rect.max.y - start.y) / (end.y - start.y);
            y = rect.max.y;
        } else if (out_code & RIGHT) != 0 {
            y = start.y + (end.y - start.y) * (rect.max.x - start.x) / (end.x - start.x);
            x = rect.max.x;
        } else if (out_code & LEFT) != 0 {
            y = start.y + (end.y - start.y) * (rect.min.x - start.x) / (end.x - start.x);
            x = rect.min.x;
        }

        let new_point = ScreenPoint::new(x, y);
        if out_code == out_start {
            start = new_point;
            out_start = region_code(start, rect, LEFT, RIGHT, TOP, BOTTOM);
        } else {
            end = new_point;
            out_end = region_code(end, rect, LEFT, RIGHT, TOP, BOTTOM);
        }
    }
}

fn region_code(
    point: ScreenPoint,
    rect: ScreenRect,
    left: u8,
    right: u8,
    top: u8,
    bottom: u8,
) -> u8 {
    let mut code = 0;
    if point.x < rect.min.x {
        code |= left;
    } else if point.x > rect.max.x {
        code |= right;
    }
    if point.y < rect.min.y {
        code |= top;
    } else if point.y > rect.max.y {
        code |= bottom;
    }
    code
}
