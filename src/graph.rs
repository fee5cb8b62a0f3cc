//! Event-driven graph view.
//!
//! [`GraphView`] owns the coordinate system, the current expression and a
//! render sink. Every event that changes what is visible rebuilds the full
//! frame and hands it to the sink; nothing is updated incrementally.

use tracing::{debug, trace, warn};

use crate::config::GraphConfig;
use crate::coords::CoordinateSystem;
use crate::expr::{Evaluator, Expression, Interpreter};
use crate::geometry::{
    SampleFailure, build_axes, build_grid, grid_cell_size, sample_expression,
};
use crate::interaction::wheel_zoom_direction;
use crate::render::{Frame, RenderSink};
use crate::sampling::SampleDomain;
use crate::view::Viewport;

/// External input to a graph view.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    /// The view was attached to a container of the given size.
    Mounted {
        /// Container size in pixels.
        viewport: Viewport,
    },
    /// The container changed size.
    Resized {
        /// New container size in pixels.
        viewport: Viewport,
    },
    /// The expression attribute changed. `None` means the attribute is gone.
    ExpressionSet {
        /// New expression text.
        text: Option<String>,
    },
    /// A wheel tick. Only the sign of `delta` is used.
    ZoomTick {
        /// Raw wheel delta.
        delta: f64,
    },
}

impl GraphEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::Mounted { .. } => "mounted",
            Self::Resized { .. } => "resized",
            Self::ExpressionSet { .. } => "expression",
            Self::ZoomTick { .. } => "zoom",
        }
    }
}

/// Outcome of handling one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Redraw {
    /// Nothing was submitted; the previous frame is still current.
    Skipped,
    /// A new frame was submitted.
    Drawn(RedrawSummary),
}

impl Redraw {
    /// Check whether a frame was submitted.
    pub fn is_drawn(&self) -> bool {
        matches!(self, Self::Drawn(_))
    }
}

/// What a redraw produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RedrawSummary {
    /// Sampled curve points.
    pub curve_points: usize,
    /// Straight segments in the submitted frame.
    pub segments: usize,
    /// Why the curve stopped early, if it did.
    pub failure: Option<SampleFailure>,
}

/// Stateful orchestrator turning events into frames.
pub struct GraphView<S: RenderSink, E: Evaluator = Interpreter> {
    sink: S,
    evaluator: E,
    config: GraphConfig,
    coords: Option<CoordinateSystem>,
    expression: Option<Expression>,
    last_frame: Option<Frame>,
}

impl<S: RenderSink> GraphView<S> {
    /// Create an unmounted view using the built-in interpreter.
    pub fn new(sink: S, config: GraphConfig) -> Self {
        Self::with_evaluator(sink, Interpreter::new(), config)
    }
}

impl<S: RenderSink, E: Evaluator> GraphView<S, E> {
    /// Create an unmounted view with a custom evaluator.
    pub fn with_evaluator(sink: S, evaluator: E, config: GraphConfig) -> Self {
        Self {
            sink,
            evaluator,
            config,
            coords: None,
            expression: None,
            last_frame: None,
        }
    }

    /// Apply one event, redrawing if it changed anything visible.
    ///
    /// Resize and zoom always update the coordinate system, even when no
    /// frame is submitted.
    pub fn handle(&mut self, event: GraphEvent) -> Redraw {
        let trigger = event.name();
        match event {
            GraphEvent::Mounted { viewport } => {
                self.coords = Some(CoordinateSystem::from_config(viewport, &self.config));
            }
            GraphEvent::Resized { viewport } => match self.coords.as_mut() {
                Some(coords) => coords.resize(viewport),
                None => {
                    self.coords = Some(CoordinateSystem::from_config(viewport, &self.config));
                }
            },
            GraphEvent::ExpressionSet { text } => {
                self.expression = text.as_deref().and_then(Expression::parse);
                if self.expression.is_none() {
                    debug!("expression cleared, keeping previous frame");
                    return Redraw::Skipped;
                }
            }
            GraphEvent::ZoomTick { delta } => {
                let Some(direction) = wheel_zoom_direction(delta) else {
                    return Redraw::Skipped;
                };
                let Some(coords) = self.coords.as_mut() else {
                    return Redraw::Skipped;
                };
                coords.apply_zoom(direction);
                trace!(zoom = coords.zoom_level(), direction, "zoom");
            }
        }
        self.redraw(trigger)
    }

    /// Rebuild and submit the frame for the current state.
    ///
    /// Returns [`Redraw::Skipped`] before the view is mounted and while no
    /// expression is set; the previously submitted frame stays current.
    pub fn redraw(&mut self, trigger: &str) -> Redraw {
        let Some(coords) = self.coords.as_ref() else {
            return Redraw::Skipped;
        };
        let Some(expr) = self.expression.as_ref() else {
            debug!(trigger, "no expression, skipping redraw");
            return Redraw::Skipped;
        };
        let bounds = coords.bounds();
        let theme = self.config.theme;

        let cell = grid_cell_size(bounds, self.config.grid_unit, self.config.grid_divisions);
        let grid = build_grid(cell, bounds, theme.grid);
        let axes = build_axes(bounds, self.config.arrow_fraction, theme.axes);

        let domain = SampleDomain::for_expression(expr, coords, &self.config);
        let sampled = sample_expression(expr, &domain, &self.evaluator, theme.curve);
        if let Some(failure) = &sampled.failure {
            warn!(
                expression = expr.source(),
                index = failure.index,
                input = failure.input,
                error = %failure.error,
                "curve truncated"
            );
        }
        let (curve, failure) = (sampled.batch, sampled.failure);

        let frame = Frame {
            bounds,
            background: theme.background,
            grid,
            axes,
            curve,
        };
        let summary = RedrawSummary {
            curve_points: frame.curve.point_count(),
            segments: frame.segment_count(),
            failure,
        };
        debug!(
            trigger,
            left = bounds.left,
            right = bounds.right,
            top = bounds.top,
            bottom = bounds.bottom,
            curve_points = summary.curve_points,
            segments = summary.segments,
            "redraw"
        );

        self.last_frame = Some(frame.clone());
        self.sink.submit(frame);
        self.sink.present();
        Redraw::Drawn(summary)
    }

    /// Check whether the view has been mounted.
    pub fn is_mounted(&self) -> bool {
        self.coords.is_some()
    }

    /// Current coordinate system, once mounted.
    pub fn coords(&self) -> Option<&CoordinateSystem> {
        self.coords.as_ref()
    }

    /// Current expression, if any.
    pub fn expression(&self) -> Option<&Expression> {
        self.expression.as_ref()
    }

    /// The most recently submitted frame.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Pipeline settings.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// The render sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the render sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExprError;

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<Frame>,
        presents: usize,
    }

    impl RenderSink for RecordingSink {
        fn submit(&mut self, frame: Frame) {
            self.frames.push(frame);
        }

        fn present(&mut self) {
            self.presents += 1;
        }
    }

    fn config() -> GraphConfig {
        // Keep sample counts small.
        GraphConfig::default().with_sampling_gain(1)
    }

    fn mounted() -> GraphView<RecordingSink> {
        let mut view = GraphView::new(RecordingSink::default(), config());
        view.handle(GraphEvent::Mounted {
            viewport: Viewport::new(200.0, 100.0),
        });
        view
    }

    fn set(view: &mut GraphView<RecordingSink>, text: &str) -> Redraw {
        view.handle(GraphEvent::ExpressionSet {
            text: Some(text.to_string()),
        })
    }

    #[test]
    fn events_before_mount_never_submit() {
        let mut view = GraphView::new(RecordingSink::default(), config());
        assert_eq!(set(&mut view, "x"), Redraw::Skipped);
        assert_eq!(view.handle(GraphEvent::ZoomTick { delta: 1.0 }), Redraw::Skipped);
        assert!(view.sink().frames.is_empty());
        assert!(view.expression().is_some());
    }

    #[test]
    fn nothing_is_drawn_without_expression() {
        let mut view = mounted();
        assert!(view.is_mounted());
        assert!(view.last_frame().is_none());
        assert_eq!(view.handle(GraphEvent::ZoomTick { delta: 1.0 }), Redraw::Skipped);
        assert_eq!(
            view.handle(GraphEvent::Resized {
                viewport: Viewport::new(300.0, 300.0),
            }),
            Redraw::Skipped
        );
        assert!(view.sink().frames.is_empty());
        assert_eq!(view.sink().presents, 0);
        // The coordinate system still tracks resize and zoom.
        let coords = view.coords().expect("coords");
        assert!((coords.zoom_level() - 11.0).abs() < 1e-12);
        assert_eq!(coords.viewport(), Viewport::new(300.0, 300.0));
    }

    #[test]
    fn cleared_expression_freezes_last_frame() {
        let mut view = mounted();
        set(&mut view, "x");
        let before = view.last_frame().cloned().expect("frame");
        view.handle(GraphEvent::ExpressionSet { text: None });

        assert_eq!(view.handle(GraphEvent::ZoomTick { delta: 1.0 }), Redraw::Skipped);
        assert_eq!(
            view.handle(GraphEvent::Mounted {
                viewport: Viewport::new(200.0, 100.0),
            }),
            Redraw::Skipped
        );
        assert_eq!(view.sink().frames.len(), 1);
        assert_eq!(view.last_frame(), Some(&before));
        assert!(before.curve.segment_count() > 0);
    }

    #[test]
    fn first_expression_draws_grid_axes_and_curve() {
        let mut view = mounted();
        assert!(set(&mut view, "x").is_drawn());
        let frame = view.last_frame().expect("frame");
        assert_eq!(frame.axes.segment_count(), 10);
        assert!(!frame.grid.is_empty());
        assert!(!frame.curve.is_empty());
        assert_eq!(view.sink().presents, 1);
    }

    #[test]
    fn runaway_expression_degrades_to_empty_curve() {
        let mut view = mounted();
        let text = "(".repeat(200_000) + "x";
        let Redraw::Drawn(summary) = set(&mut view, &text) else {
            panic!("expected a redraw");
        };
        assert_eq!(summary.curve_points, 0);
        assert!(matches!(
            summary.failure.map(|f| f.error),
            Some(ExprError::TooDeep { .. })
        ));
        assert_eq!(view.last_frame().expect("frame").axes.segment_count(), 10);
    }

    #[test]
    fn expression_adds_curve() {
        let mut view = mounted();
        let Redraw::Drawn(summary) = set(&mut view, "x*x") else {
            panic!("expected a redraw");
        };
        // 200 px at one sample per pixel on each side of zero.
        assert_eq!(summary.curve_points, 401);
        assert!(summary.failure.is_none());
        assert_eq!(view.sink().frames.len(), 1);
    }

    #[test]
    fn empty_expression_keeps_last_frame() {
        let mut view = mounted();
        set(&mut view, "x");
        let before = view.last_frame().cloned();
        let submitted = view.sink().frames.len();

        assert_eq!(set(&mut view, ""), Redraw::Skipped);
        assert_eq!(set(&mut view, "   "), Redraw::Skipped);
        assert_eq!(
            view.handle(GraphEvent::ExpressionSet { text: None }),
            Redraw::Skipped
        );
        assert_eq!(view.sink().frames.len(), submitted);
        assert_eq!(view.last_frame().cloned(), before);
    }

    #[test]
    fn bad_expression_still_draws_frame() {
        let mut view = mounted();
        let Redraw::Drawn(summary) = set(&mut view, "x +* 2") else {
            panic!("expected a redraw");
        };
        assert_eq!(summary.curve_points, 0);
        assert!(matches!(
            summary.failure.map(|f| f.error),
            Some(ExprError::UnexpectedToken { .. })
        ));
        let frame = view.last_frame().expect("frame");
        assert_eq!(frame.axes.segment_count(), 10);
        assert!(!frame.grid.is_empty());
    }

    #[test]
    fn discontinuity_truncates_curve() {
        let mut view = mounted();
        let Redraw::Drawn(summary) = set(&mut view, "1/x") else {
            panic!("expected a redraw");
        };
        assert_eq!(summary.curve_points, 200);
        assert_eq!(summary.failure.map(|f| f.input), Some(0.0));
    }

    #[test]
    fn zoom_ticks_use_sign_only() {
        let mut view = mounted();
        let start = view.coords().expect("coords").zoom_level();
        view.handle(GraphEvent::ZoomTick { delta: 120.0 });
        let out = view.coords().expect("coords").zoom_level();
        assert!((out - start * 1.1).abs() < 1e-12);

        view.handle(GraphEvent::ZoomTick { delta: -0.5 });
        let back = view.coords().expect("coords").zoom_level();
        assert!((back - out * 0.9).abs() < 1e-12);

        let submitted = view.sink().frames.len();
        assert_eq!(view.handle(GraphEvent::ZoomTick { delta: 0.0 }), Redraw::Skipped);
        assert_eq!(view.sink().frames.len(), submitted);
    }

    #[test]
    fn zoom_rescales_frame_bounds() {
        let mut view = mounted();
        set(&mut view, "x");
        let before = view.last_frame().expect("frame").bounds;
        view.handle(GraphEvent::ZoomTick { delta: -1.0 });
        let after = view.last_frame().expect("frame").bounds;
        assert!(after.right < before.right);
        assert!(after.top < before.top);
    }

    #[test]
    fn resize_before_mount_mounts() {
        let mut view = GraphView::new(RecordingSink::default(), config());
        assert_eq!(set(&mut view, "x"), Redraw::Skipped);
        let redraw = view.handle(GraphEvent::Resized {
            viewport: Viewport::new(300.0, 300.0),
        });
        assert!(redraw.is_drawn());
        assert!(view.is_mounted());
    }

    #[test]
    fn resize_keeps_zoom() {
        let mut view = mounted();
        view.handle(GraphEvent::ZoomTick { delta: 1.0 });
        let zoom = view.coords().expect("coords").zoom_level();
        view.handle(GraphEvent::Resized {
            viewport: Viewport::new(100.0, 400.0),
        });
        let coords = view.coords().expect("coords");
        assert_eq!(coords.zoom_level(), zoom);
        assert_eq!(coords.bounds().top, zoom);
    }

    #[test]
    fn polar_expression_ignores_viewport_width() {
        let mut view = mounted();
        let Redraw::Drawn(summary) = set(&mut view, "r = 4 * cos(3*t)") else {
            panic!("expected a redraw");
        };
        assert_eq!(summary.curve_points, 1080);
    }

    #[test]
    fn frames_use_theme_colors() {
        let mut view = mounted();
        set(&mut view, "x");
        let frame = view.last_frame().expect("frame");
        assert_eq!(frame.background.to_rgb(), 0x000000);
        assert_eq!(frame.grid.strokes()[0].color.to_rgb(), 0x555555);
        assert_eq!(frame.axes.strokes()[0].color.to_rgb(), 0xffffff);
        assert_eq!(frame.curve.strokes()[0].color.to_rgb(), 0xffaaff);
    }
}
