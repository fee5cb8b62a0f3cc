//! Viewport sizes and numeric ranges.

use tracing::warn;

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }
}

/// Pixel size of the host container.
///
/// Viewports are external input: they only change on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Width used when the container reports no usable width.
    pub const DEFAULT_WIDTH: f64 = 640.0;
    /// Height used when the container reports no usable height.
    pub const DEFAULT_HEIGHT: f64 = 480.0;

    /// Create a viewport from a pixel size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check whether both dimensions are finite and positive.
    pub fn is_valid(&self) -> bool {
        is_usable(self.width) && is_usable(self.height)
    }

    /// Replace unusable dimensions with the matching dimension of `fallback`.
    ///
    /// Each dimension falls back independently.
    pub fn or_fallback(self, fallback: Viewport) -> Self {
        if self.is_valid() {
            return self;
        }
        warn!(
            width = self.width,
            height = self.height,
            "degenerate viewport, falling back to defaults"
        );
        Self {
            width: if is_usable(self.width) {
                self.width
            } else {
                fallback.width
            },
            height: if is_usable(self.height) {
                self.height
            } else {
                fallback.height
            },
        }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

fn is_usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_swaps_inverted_bounds() {
        let range = Range::new(3.0, -1.0);
        assert_eq!(range.min, -1.0);
        assert_eq!(range.max, 3.0);
        assert!(range.is_valid());
    }

    #[test]
    fn degenerate_dimensions_fall_back_independently() {
        let fallback = Viewport::default();
        let fixed = Viewport::new(0.0, 300.0).or_fallback(fallback);
        assert_eq!(fixed, Viewport::new(640.0, 300.0));

        let fixed = Viewport::new(-5.0, f64::NAN).or_fallback(fallback);
        assert_eq!(fixed, Viewport::new(640.0, 480.0));
    }

    #[test]
    fn valid_viewport_is_kept() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.or_fallback(Viewport::default()), viewport);
    }
}
