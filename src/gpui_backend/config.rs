use crate::config::GraphConfig;

/// Configuration for the GPUI graph view.
#[derive(Debug, Clone)]
pub struct GpuiGraphConfig {
    /// Pipeline settings shared with every backend.
    pub graph: GraphConfig,
    /// Grid stroke width in pixels.
    pub grid_width: f32,
    /// Axis and arrow-mark stroke width in pixels.
    pub axes_width: f32,
    /// Curve stroke width in pixels.
    pub curve_width: f32,
}

impl GpuiGraphConfig {
    /// Replace the pipeline settings.
    pub fn with_graph(mut self, graph: GraphConfig) -> Self {
        self.graph = graph;
        self
    }
}

impl Default for GpuiGraphConfig {
    fn default() -> Self {
        Self {
            graph: GraphConfig::default(),
            grid_width: 1.0,
            axes_width: 1.0,
            curve_width: 1.5,
        }
    }
}
