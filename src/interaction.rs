//! Input helpers shared by render backends.
//!
//! Backends translate raw pointer events into [`GraphEvent`]s with these so
//! every platform zooms the same way.
//!
//! [`GraphEvent`]: crate::graph::GraphEvent

use crate::geom::{ScreenPoint, ScreenRect};

/// Zoom direction for a wheel delta.
///
/// Only the sign is used: positive deltas zoom out (`1.0`), negative deltas
/// zoom in (`-1.0`). Zero and non-finite deltas produce no zoom.
pub fn wheel_zoom_direction(delta: f64) -> Option<f64> {
    if !delta.is_finite() || delta == 0.0 {
        return None;
    }
    Some(delta.signum())
}

/// Check whether a pointer position lies inside the drawing area.
pub fn pointer_in_rect(rect: ScreenRect, point: ScreenPoint) -> bool {
    point.x >= rect.min.x && point.x <= rect.max.x && point.y >= rect.min.y && point.y <= rect.max.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_sign_only() {
        assert_eq!(wheel_zoom_direction(3.5), Some(1.0));
        assert_eq!(wheel_zoom_direction(120.0), Some(1.0));
        assert_eq!(wheel_zoom_direction(-0.01), Some(-1.0));
    }

    #[test]
    fn wheel_ignores_zero_and_non_finite() {
        assert_eq!(wheel_zoom_direction(0.0), None);
        assert_eq!(wheel_zoom_direction(-0.0), None);
        assert_eq!(wheel_zoom_direction(f64::NAN), None);
        assert_eq!(wheel_zoom_direction(f64::INFINITY), None);
    }

    #[test]
    fn pointer_hit_test() {
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0));
        assert!(pointer_in_rect(rect, ScreenPoint::new(5.0, 5.0)));
        assert!(pointer_in_rect(rect, ScreenPoint::new(10.0, 0.0)));
        assert!(!pointer_in_rect(rect, ScreenPoint::new(-1.0, 5.0)));
        assert!(!pointer_in_rect(rect, ScreenPoint::new(5.0, 11.0)));
    }
}
