//! Sample domains: the independent-variable values a curve is evaluated at.

use std::f64::consts::PI;

use crate::config::GraphConfig;
use crate::coords::CoordinateSystem;
use crate::expr::{Expression, ExpressionKind};

/// Largest number of Cartesian samples on each side of zero.
pub const MAX_HALF_SAMPLES: usize = 1 << 18;

/// Ordered independent-variable values.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleDomain {
    values: Vec<f64>,
}

impl SampleDomain {
    /// Use explicit values in the given order.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Horizontal sweep across `[-half_extent, half_extent]`.
    ///
    /// Produces `2 * width_px * gain + 1` samples symmetric around zero, so
    /// `x = 0` is always sampled exactly and resolution follows both pixel
    /// density and zoom. The count per side is capped at
    /// [`MAX_HALF_SAMPLES`].
    pub fn cartesian(half_extent: f64, width_px: f64, gain: u32) -> Self {
        let pixels = width_px.max(1.0).min(MAX_HALF_SAMPLES as f64).round() as usize;
        let half = pixels
            .saturating_mul(gain.max(1) as usize)
            .min(MAX_HALF_SAMPLES);
        let step = half_extent / half as f64;
        let values = (0..=2 * half)
            .map(|i| (i as f64 - half as f64) * step)
            .collect();
        Self { values }
    }

    /// Angular sweep from 0 over `turns` full turns at `steps_per_turn`
    /// samples per turn.
    pub fn polar(turns: u32, steps_per_turn: u32) -> Self {
        let steps_per_turn = steps_per_turn.max(1);
        let step = 2.0 * PI / steps_per_turn as f64;
        let count = turns as usize * steps_per_turn as usize;
        let values = (0..count).map(|k| k as f64 * step).collect();
        Self { values }
    }

    /// Pick the domain matching the expression's form.
    pub fn for_expression(
        expr: &Expression,
        coords: &CoordinateSystem,
        config: &GraphConfig,
    ) -> Self {
        match expr.kind() {
            ExpressionKind::Polar => {
                Self::polar(config.polar_turns, config.polar_steps_per_turn)
            }
            ExpressionKind::Cartesian => Self::cartesian(
                coords.bounds().right,
                coords.viewport().width,
                config.sampling_gain,
            ),
        }
    }

    /// Access the values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Viewport;

    #[test]
    fn cartesian_is_symmetric_and_hits_zero() {
        let domain = SampleDomain::cartesian(10.0, 640.0, 10);
        assert_eq!(domain.len(), 2 * 6400 + 1);
        let values = domain.values();
        assert!((values[0] + 10.0).abs() < 1e-9);
        assert_eq!(values[6400], 0.0);
        assert!((values[values.len() - 1] - 10.0).abs() < 1e-9);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn cartesian_sample_count_is_capped() {
        for width in [1e12, f64::MAX, f64::INFINITY] {
            let domain = SampleDomain::cartesian(10.0, width, u32::MAX);
            assert_eq!(domain.len(), 2 * MAX_HALF_SAMPLES + 1);
            assert_eq!(domain.values()[MAX_HALF_SAMPLES], 0.0);
        }
        let domain = SampleDomain::cartesian(10.0, f64::NAN, 10);
        assert_eq!(domain.len(), 21);
        assert!(domain.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn cartesian_follows_zoom() {
        let mut coords = CoordinateSystem::new(Viewport::new(200.0, 100.0), 10.0);
        let config = GraphConfig::default();
        let expr = Expression::parse("x").expect("expression");
        let before = SampleDomain::for_expression(&expr, &coords, &config);
        coords.apply_zoom(-1.0);
        let after = SampleDomain::for_expression(&expr, &coords, &config);
        assert_eq!(before.len(), after.len());
        assert!(after.values()[0] > before.values()[0]);
    }

    #[test]
    fn polar_sweeps_three_turns_in_degree_steps() {
        let domain = SampleDomain::polar(3, 360);
        assert_eq!(domain.len(), 1080);
        assert_eq!(domain.values()[0], 0.0);
        assert!((domain.values()[180] - PI).abs() < 1e-12);
        assert!((domain.values()[1079] - 1079.0 * PI / 180.0).abs() < 1e-9);
    }

    #[test]
    fn polar_domain_ignores_viewport() {
        let config = GraphConfig::default();
        let expr = Expression::parse("r = 1").expect("expression");
        let small = CoordinateSystem::new(Viewport::new(100.0, 100.0), 10.0);
        let large = CoordinateSystem::new(Viewport::new(4000.0, 3000.0), 10.0);
        assert_eq!(
            SampleDomain::for_expression(&expr, &small, &config),
            SampleDomain::for_expression(&expr, &large, &config)
        );
    }
}
