use crate::geom::ScreenRect;
use crate::graph::GraphView;
use crate::render::{Frame, RenderSink};
use crate::view::Viewport;

/// Render sink that keeps the latest frame for the next paint.
#[derive(Debug, Default)]
pub struct FrameSlot {
    frame: Option<Frame>,
    generation: u64,
}

impl FrameSlot {
    /// The frame to paint, if one was submitted.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Number of frames presented so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl RenderSink for FrameSlot {
    fn submit(&mut self, frame: Frame) {
        self.frame = Some(frame);
    }

    fn present(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Graph plus the canvas measurements it was last synced to.
pub(crate) struct GraphState {
    pub(crate) graph: GraphView<FrameSlot>,
    pub(crate) measured: Option<Viewport>,
    pub(crate) canvas: Option<ScreenRect>,
}

impl GraphState {
    pub(crate) fn new(graph: GraphView<FrameSlot>) -> Self {
        Self {
            graph,
            measured: None,
            canvas: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use crate::graph::GraphEvent;

    #[test]
    fn slot_keeps_latest_frame() {
        let mut graph = GraphView::new(FrameSlot::default(), GraphConfig::default());
        assert!(graph.sink().frame().is_none());

        graph.handle(GraphEvent::Mounted {
            viewport: Viewport::new(64.0, 48.0),
        });
        assert_eq!(graph.sink().generation(), 0);
        graph.handle(GraphEvent::ExpressionSet {
            text: Some("x".to_string()),
        });
        graph.handle(GraphEvent::ZoomTick { delta: 1.0 });
        let slot = graph.sink();
        assert_eq!(slot.generation(), 2);
        assert_eq!(slot.frame(), graph.last_frame());
    }
}
