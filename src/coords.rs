//! The coordinate system mapping world units onto the viewport.
//!
//! The visible world rectangle is always centered at the origin and
//! aspect-corrected: one world unit spans the same number of pixels on both
//! axes. The longer viewport side maps to `[-zoom_level, zoom_level]` and the
//! shorter side is scaled down by the aspect ratio.

use crate::config::GraphConfig;
use crate::view::{Range, Viewport};

/// Visible world-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// Smallest visible X.
    pub left: f64,
    /// Largest visible X.
    pub right: f64,
    /// Largest visible Y.
    pub top: f64,
    /// Smallest visible Y.
    pub bottom: f64,
}

impl WorldBounds {
    /// Bounds centered at the origin with the given half-extents.
    pub fn centered(half_width: f64, half_height: f64) -> Self {
        Self {
            left: -half_width,
            right: half_width,
            top: half_height,
            bottom: -half_height,
        }
    }

    /// Horizontal span in world units.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical span in world units.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Horizontal extent as a range.
    pub fn x_range(&self) -> Range {
        Range::new(self.left, self.right)
    }

    /// Vertical extent as a range.
    pub fn y_range(&self) -> Range {
        Range::new(self.bottom, self.top)
    }

    /// Check whether the bounds are finite with positive area.
    pub fn is_valid(&self) -> bool {
        self.left < self.right
            && self.bottom < self.top
            && self.x_range().is_finite()
            && self.y_range().is_finite()
    }
}

/// Orthographic world-to-viewport mapping with exponential zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSystem {
    viewport: Viewport,
    fallback: Viewport,
    zoom_level: f64,
    zoom_speed: f64,
    min_zoom: f64,
    max_zoom: f64,
    bounds: WorldBounds,
}

impl CoordinateSystem {
    /// Create a coordinate system for `viewport` at `base_zoom` with default
    /// zoom settings.
    pub fn new(viewport: Viewport, base_zoom: f64) -> Self {
        Self::from_config(viewport, &GraphConfig::default().with_base_zoom(base_zoom))
    }

    /// Create a coordinate system using the zoom settings of `config`.
    pub fn from_config(viewport: Viewport, config: &GraphConfig) -> Self {
        let min_zoom = config.min_zoom.max(f64::MIN_POSITIVE);
        let mut coords = Self {
            viewport: viewport.or_fallback(config.default_viewport),
            fallback: config.default_viewport,
            zoom_level: config.base_zoom,
            zoom_speed: config.zoom_speed,
            min_zoom,
            max_zoom: config.max_zoom.max(min_zoom),
            bounds: WorldBounds::centered(1.0, 1.0),
        };
        coords.zoom_level = coords.clamp_zoom(config.base_zoom);
        coords.update_bounds();
        coords
    }

    /// Re-derive bounds for a new viewport. The zoom level is unchanged.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport.or_fallback(self.fallback);
        self.update_bounds();
    }

    /// Zoom by `direction` ticks.
    ///
    /// Positive directions zoom out, negative directions zoom in. Each tick
    /// scales the zoom level by `zoom_speed`, so zooming feels the same at
    /// every scale.
    pub fn apply_zoom(&mut self, direction: f64) {
        if !direction.is_finite() {
            return;
        }
        let next = self.zoom_level + direction * self.zoom_level * self.zoom_speed;
        self.zoom_level = self.clamp_zoom(next);
        self.update_bounds();
    }

    /// Current zoom level (half-extent of the longer side).
    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Visible world rectangle.
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Viewport width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.viewport.aspect_ratio()
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min_zoom;
        }
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    fn update_bounds(&mut self) {
        let aspect = self.viewport.aspect_ratio();
        let (half_width, half_height) = if self.viewport.width > self.viewport.height {
            (self.zoom_level, self.zoom_level / aspect)
        } else {
            (self.zoom_level * aspect, self.zoom_level)
        };
        self.bounds = WorldBounds::centered(
            half_width.max(f64::MIN_POSITIVE),
            half_height.max(f64::MIN_POSITIVE),
        );
    }
}
