use std::sync::{Arc, RwLock};

use gpui::prelude::*;
use gpui::{Bounds, Pixels, Point, ScrollWheelEvent, Window, canvas, div, px};

use crate::geom::ScreenPoint;
use crate::graph::{GraphEvent, GraphView, Redraw};
use crate::interaction::pointer_in_rect;

use super::config::GpuiGraphConfig;
use super::frame::{ScreenFrame, build_screen_frame, canvas_rect, canvas_viewport};
use super::paint::{paint_frame, to_hsla};
use super::state::{FrameSlot, GraphState};

/// A GPUI view that graphs one expression and zooms on wheel input.
///
/// The canvas size is measured every frame; the first measurement mounts the
/// graph and later changes resize it.
#[derive(Clone)]
pub struct GpuiGraphView {
    state: Arc<RwLock<GraphState>>,
    config: GpuiGraphConfig,
}

impl GpuiGraphView {
    /// Create a view with the default configuration.
    pub fn new() -> Self {
        Self::with_config(GpuiGraphConfig::default())
    }

    /// Create a view with a custom configuration.
    pub fn with_config(config: GpuiGraphConfig) -> Self {
        let graph = GraphView::new(FrameSlot::default(), config.graph.clone());
        Self {
            state: Arc::new(RwLock::new(GraphState::new(graph))),
            config,
        }
    }

    /// Set the expression text and schedule a repaint.
    ///
    /// Empty or missing text keeps the current picture.
    pub fn set_expression(&mut self, text: Option<String>, cx: &mut Context<Self>) -> Redraw {
        let redraw = self.graph_handle().set_expression(text);
        if redraw.is_drawn() {
            cx.notify();
        }
        redraw
    }

    /// Get a handle for driving the graph from other code paths.
    pub fn graph_handle(&self) -> GraphHandle {
        GraphHandle {
            state: Arc::clone(&self.state),
        }
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, _window: &Window, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = self.state.write().expect("graph lock");
        if let Some(canvas) = state.canvas
            && !pointer_in_rect(canvas, pos)
        {
            return;
        }

        let line_height = px(16.0);
        let delta = ev.delta.pixel_delta(line_height);
        let redraw = state.graph.handle(GraphEvent::ZoomTick {
            delta: f64::from(f32::from(delta.y)),
        });
        if redraw.is_drawn() {
            cx.notify();
        }
    }
}

impl Default for GpuiGraphView {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for GpuiGraphView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let state = Arc::clone(&self.state);
        let config = self.config.clone();
        let background = config.graph.theme.background;

        div()
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, _window, _| {
                        let mut state = state.write().expect("graph lock");
                        sync_canvas(&mut state, bounds);
                        let clip = canvas_rect(bounds);
                        state
                            .graph
                            .sink()
                            .frame()
                            .map(|frame| build_screen_frame(frame, clip, &config))
                    },
                    move |_, frame: Option<ScreenFrame>, window, _cx| {
                        if let Some(frame) = frame {
                            paint_frame(&frame, window);
                        }
                    },
                )
                .size_full(),
            )
            .on_scroll_wheel(cx.listener(|this, ev, window, cx| {
                this.on_scroll(ev, window, cx);
            }))
    }
}

/// A handle for driving the graph held inside a `GpuiGraphView`.
///
/// The handle clones cheaply. Changes made through it show up on the view's
/// next repaint; call `notify` on the view entity to request one.
#[derive(Clone)]
pub struct GraphHandle {
    state: Arc<RwLock<GraphState>>,
}

impl GraphHandle {
    /// Set the expression text.
    pub fn set_expression(&self, text: Option<String>) -> Redraw {
        let mut state = self.state.write().expect("graph lock");
        state.graph.handle(GraphEvent::ExpressionSet { text })
    }

    /// Read the graph state.
    ///
    /// The graph is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&GraphView<FrameSlot>) -> R) -> R {
        let state = self.state.read().expect("graph lock");
        f(&state.graph)
    }

    /// Mutate the graph state.
    ///
    /// The graph is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut GraphView<FrameSlot>) -> R) -> R {
        let mut state = self.state.write().expect("graph lock");
        f(&mut state.graph)
    }
}

fn sync_canvas(state: &mut GraphState, bounds: Bounds<Pixels>) {
    let rect = canvas_rect(bounds);
    state.canvas = Some(rect);
    let viewport = canvas_viewport(rect);
    if state.measured == Some(viewport) {
        return;
    }
    state.measured = Some(viewport);
    let event = if state.graph.is_mounted() {
        GraphEvent::Resized { viewport }
    } else {
        GraphEvent::Mounted { viewport }
    };
    state.graph.handle(event);
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x), f32::from(point.y))
}
