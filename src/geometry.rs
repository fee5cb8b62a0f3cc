//! Geometry synthesis: grid, axes and expression curves as line batches.
//!
//! Everything here is pure. Inputs are the visible world bounds, the
//! expression and an evaluator; outputs are world-space [`LineBatch`]es.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::coords::WorldBounds;
use crate::error::ExprError;
use crate::expr::{Evaluator, Expression, ExpressionKind};
use crate::geom::Point;
use crate::render::{Color, LineBatch, Stroke};
use crate::sampling::SampleDomain;

/// Upper bound on grid lines per direction and side of the origin.
const MAX_GRID_LINES: usize = 4096;

/// Fraction of the horizontal span used for arrow marks.
pub const DEFAULT_ARROW_FRACTION: f64 = 0.01;

/// Grid spacing: `grid_unit * right / divisions`.
///
/// The grid keeps `divisions` cells across the positive half-width at every
/// zoom level.
pub fn grid_cell_size(bounds: WorldBounds, grid_unit: f64, divisions: u32) -> f64 {
    grid_unit * bounds.right / divisions.max(1) as f64
}

/// Horizontal and vertical lines at every multiple of `cell_size`.
///
/// Lines start at the origin and walk outward to each edge. Horizontal lines
/// span `[-right, right]`, vertical lines span `[-top, top]`.
pub fn build_grid(cell_size: f64, bounds: WorldBounds, color: Color) -> LineBatch {
    let mut batch = LineBatch::new();
    if !cell_size.is_finite() || cell_size <= 0.0 {
        return batch;
    }
    let (w, h) = (bounds.right, bounds.top);

    for y in grid_positions(cell_size, bounds.bottom, bounds.top) {
        batch.push(Stroke::line(Point::new(-w, y), Point::new(w, y), color));
    }
    for x in grid_positions(cell_size, bounds.left, bounds.right) {
        batch.push(Stroke::line(Point::new(x, -h), Point::new(x, h), color));
    }
    batch
}

// Multiples of `cell` in `[0, max)` followed by those in `(min, 0)`.
fn grid_positions(cell: f64, min: f64, max: f64) -> impl Iterator<Item = f64> {
    let positive = (0..MAX_GRID_LINES)
        .map(move |k| k as f64 * cell)
        .take_while(move |&v| v < max);
    let negative = (1..MAX_GRID_LINES)
        .map(move |k| -(k as f64) * cell)
        .take_while(move |&v| v > min);
    positive.chain(negative)
}

/// Axis lines through the origin plus arrow marks at the four extremities.
///
/// Each extremity gets two short diagonal strokes of length
/// `arrow_fraction * (right - left)`. Always returns exactly ten strokes:
/// eight arrow strokes followed by the horizontal and vertical axes.
pub fn build_axes(bounds: WorldBounds, arrow_fraction: f64, color: Color) -> LineBatch {
    let arrow = (bounds.right - bounds.left) * arrow_fraction;
    let top = Point::new(0.0, bounds.top);
    let right = Point::new(bounds.right, 0.0);
    let bottom = Point::new(0.0, bounds.bottom);
    let left = Point::new(bounds.left, 0.0);

    let strokes = [
        (top, top.offset(arrow, -arrow)),
        (top, top.offset(-arrow, -arrow)),
        (right, right.offset(-arrow, -arrow)),
        (right, right.offset(-arrow, arrow)),
        (bottom, bottom.offset(arrow, arrow)),
        (bottom, bottom.offset(-arrow, arrow)),
        (left, left.offset(arrow, -arrow)),
        (left, left.offset(arrow, arrow)),
        (left, right),
        (top, bottom),
    ];
    strokes
        .into_iter()
        .map(|(start, end)| Stroke::line(start, end, color))
        .collect()
}

/// Where and why sampling stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleFailure {
    /// Position in the domain of the failing sample.
    pub index: usize,
    /// Independent-variable value of the failing sample.
    pub input: f64,
    /// What went wrong.
    pub error: ExprError,
}

/// Result of sampling an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledCurve {
    /// Curve batch; holds at most one stroke.
    pub batch: LineBatch,
    /// Set when sampling stopped before the end of the domain.
    pub failure: Option<SampleFailure>,
}

impl SampledCurve {
    /// Sampled world points in order.
    pub fn points(&self) -> &[Point] {
        self.batch
            .strokes()
            .first()
            .map(|stroke| stroke.points.as_slice())
            .unwrap_or(&[])
    }

    /// Check whether the whole domain was sampled.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Evaluate `expr` over `domain` into a single polyline.
///
/// Cartesian samples map `s` to `(s, f(s))`, polar samples map `t` to
/// `(f(t)·cos t, f(t)·sin t)`. The first failing sample ends the curve:
/// points before it are kept, nothing at or after it is. A body that fails
/// to compile yields an empty curve with a failure at index 0. Panics inside
/// the evaluator count as failures.
pub fn sample_expression<E: Evaluator>(
    expr: &Expression,
    domain: &SampleDomain,
    evaluator: &E,
    color: Color,
) -> SampledCurve {
    let first_input = domain.values().first().copied().unwrap_or(0.0);
    let compiled = match isolate(|| evaluator.compile(expr.body(), expr.variable())) {
        Ok(compiled) => compiled,
        Err(error) => {
            return SampledCurve {
                batch: LineBatch::new(),
                failure: Some(SampleFailure {
                    index: 0,
                    input: first_input,
                    error,
                }),
            };
        }
    };

    let mut points = Vec::with_capacity(domain.len());
    let mut failure = None;
    for (index, &s) in domain.values().iter().enumerate() {
        let value = isolate(|| evaluator.evaluate(&compiled, s)).and_then(|value| {
            if value.is_finite() {
                Ok(value)
            } else {
                Err(ExprError::NonFinite { value })
            }
        });
        match value {
            Ok(value) => points.push(to_point(expr.kind(), s, value)),
            Err(error) => {
                failure = Some(SampleFailure {
                    index,
                    input: s,
                    error,
                });
                break;
            }
        }
    }

    let mut batch = LineBatch::new();
    if !points.is_empty() {
        batch.push(Stroke::new(points, color));
    }
    SampledCurve { batch, failure }
}

fn to_point(kind: ExpressionKind, s: f64, value: f64) -> Point {
    match kind {
        ExpressionKind::Cartesian => Point::new(s, value),
        ExpressionKind::Polar => Point::new(value * s.cos(), value * s.sin()),
    }
}

fn isolate<T>(f: impl FnOnce() -> crate::error::Result<T>) -> crate::error::Result<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(ExprError::Panicked(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Interpreter;

    const WHITE: Color = Color::WHITE;

    fn integer_domain() -> SampleDomain {
        SampleDomain::from_values((-5..=5).map(f64::from).collect())
    }

    fn sample(text: &str, domain: &SampleDomain) -> SampledCurve {
        let expr = Expression::parse(text).expect("expression");
        sample_expression(&expr, domain, &Interpreter, WHITE)
    }

    #[test]
    fn identity_samples_exactly() {
        let curve = sample("x", &integer_domain());
        let expected: Vec<Point> = (-5..=5)
            .map(|v| Point::new(v as f64, v as f64))
            .collect();
        assert_eq!(curve.points(), expected.as_slice());
        assert!(curve.is_complete());
    }

    #[test]
    fn reciprocal_truncates_before_zero() {
        let curve = sample("1/x", &integer_domain());
        let xs: Vec<f64> = curve.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-5.0, -4.0, -3.0, -2.0, -1.0]);
        let failure = curve.failure.expect("failure");
        assert_eq!(failure.index, 5);
        assert_eq!(failure.input, 0.0);
        assert!(matches!(failure.error, ExprError::NonFinite { .. }));
    }

    #[test]
    fn failure_on_first_sample_yields_empty_curve() {
        let curve = sample("sqrt(x)", &integer_domain());
        assert!(curve.points().is_empty());
        assert_eq!(curve.batch.segment_count(), 0);
        assert_eq!(curve.failure.map(|f| f.index), Some(0));
    }

    #[test]
    fn syntax_error_yields_empty_curve() {
        let curve = sample("x +", &integer_domain());
        assert!(curve.batch.strokes().is_empty());
        assert_eq!(
            curve.failure.map(|f| f.error),
            Some(ExprError::UnexpectedEnd)
        );
    }

    #[test]
    fn polar_samples_use_angle() {
        let domain = SampleDomain::polar(1, 4);
        let curve = sample("r = 2", &domain);
        let points = curve.points();
        assert_eq!(points.len(), 4);
        assert!((points[0].x - 2.0).abs() < 1e-12 && points[0].y.abs() < 1e-12);
        assert!(points[1].x.abs() < 1e-12 && (points[1].y - 2.0).abs() < 1e-12);
        assert!((points[2].x + 2.0).abs() < 1e-12);
    }

    #[test]
    fn polar_rose_is_bounded() {
        let curve = sample("r = 4 * cos(3*t)", &SampleDomain::polar(3, 360));
        assert_eq!(curve.points().len(), 1080);
        for point in curve.points() {
            assert!(point.x.hypot(point.y) <= 4.0 + 1e-9);
        }
    }

    struct PanickyEvaluator;

    impl Evaluator for PanickyEvaluator {
        type Compiled = ();

        fn compile(&self, _body: &str, _var: &str) -> crate::error::Result<()> {
            Ok(())
        }

        fn evaluate(&self, _compiled: &(), value: f64) -> crate::error::Result<f64> {
            if value > 1.0 {
                panic!("evaluator blew up");
            }
            Ok(value)
        }
    }

    #[test]
    fn evaluator_panic_truncates_curve() {
        let expr = Expression::parse("x").expect("expression");
        let curve = sample_expression(&expr, &integer_domain(), &PanickyEvaluator, WHITE);
        assert_eq!(curve.points().len(), 7);
        assert_eq!(
            curve.failure.map(|f| f.error),
            Some(ExprError::Panicked("evaluator blew up".into()))
        );
    }

    struct NanEvaluator;

    impl Evaluator for NanEvaluator {
        type Compiled = ();

        fn compile(&self, _body: &str, _var: &str) -> crate::error::Result<()> {
            Ok(())
        }

        fn evaluate(&self, _compiled: &(), value: f64) -> crate::error::Result<f64> {
            Ok(if value < 0.0 { value } else { f64::NAN })
        }
    }

    #[test]
    fn non_finite_from_foreign_evaluator_truncates() {
        let expr = Expression::parse("x").expect("expression");
        let curve = sample_expression(&expr, &integer_domain(), &NanEvaluator, WHITE);
        assert_eq!(curve.points().len(), 5);
    }

    #[test]
    fn axes_always_have_ten_segments() {
        for bounds in [
            WorldBounds::centered(10.0, 7.5),
            WorldBounds::centered(1e-15, 1e-16),
            WorldBounds::centered(5e11, 1.0),
        ] {
            let axes = build_axes(bounds, DEFAULT_ARROW_FRACTION, WHITE);
            assert_eq!(axes.strokes().len(), 10);
            assert_eq!(axes.segment_count(), 10);
        }
    }

    #[test]
    fn axes_arrow_geometry() {
        let bounds = WorldBounds::centered(50.0, 25.0);
        let axes = build_axes(bounds, 0.01, WHITE);
        let strokes = axes.strokes();
        // Arrow length is 1% of the 100-unit span.
        assert_eq!(strokes[0].points, vec![Point::new(0.0, 25.0), Point::new(1.0, 24.0)]);
        assert_eq!(strokes[3].points, vec![Point::new(50.0, 0.0), Point::new(49.0, 1.0)]);
        assert_eq!(strokes[7].points, vec![Point::new(-50.0, 0.0), Point::new(-49.0, 1.0)]);
        assert_eq!(strokes[8].points, vec![Point::new(-50.0, 0.0), Point::new(50.0, 0.0)]);
        assert_eq!(strokes[9].points, vec![Point::new(0.0, 25.0), Point::new(0.0, -25.0)]);
    }

    #[test]
    fn grid_walks_outward_from_origin() {
        let bounds = WorldBounds::centered(10.0, 5.0);
        let cell = grid_cell_size(bounds, 1.0, 5);
        assert_eq!(cell, 2.0);
        let grid = build_grid(cell, bounds, WHITE);
        // y in {0, 2, 4, -2, -4}; x in {0, 2, 4, 6, 8, -2, -4, -6, -8}
        assert_eq!(grid.strokes().len(), 5 + 9);
        let first = &grid.strokes()[0];
        assert_eq!(first.points, vec![Point::new(-10.0, 0.0), Point::new(10.0, 0.0)]);
        let vertical = &grid.strokes()[5];
        assert_eq!(vertical.points, vec![Point::new(0.0, -5.0), Point::new(0.0, 5.0)]);
    }

    #[test]
    fn grid_density_is_zoom_invariant() {
        let small = build_grid(grid_cell_size(WorldBounds::centered(1.0, 0.75), 1.0, 5),
            WorldBounds::centered(1.0, 0.75), WHITE);
        let large = build_grid(grid_cell_size(WorldBounds::centered(1e6, 7.5e5), 1.0, 5),
            WorldBounds::centered(1e6, 7.5e5), WHITE);
        assert_eq!(small.strokes().len(), large.strokes().len());
    }

    #[test]
    fn degenerate_cell_size_draws_nothing() {
        let bounds = WorldBounds::centered(10.0, 5.0);
        assert!(build_grid(0.0, bounds, WHITE).strokes().is_empty());
        assert!(build_grid(f64::NAN, bounds, WHITE).strokes().is_empty());
        assert!(build_grid(-1.0, bounds, WHITE).strokes().is_empty());
    }
}
