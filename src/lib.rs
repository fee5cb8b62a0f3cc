//! gpui_exprgraph graphs a single-variable expression as vector line art.
//! Cartesian `y = f(x)` and polar `r = f(t)` curves are drawn over a grid
//! and axes in an aspect-correct, zoomable coordinate system.

#![forbid(unsafe_code)]

pub mod config;
pub mod coords;
pub mod error;
pub mod expr;
pub mod geom;
pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod render;
pub mod sampling;
pub mod style;
pub mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use config::GraphConfig;
pub use coords::{CoordinateSystem, WorldBounds};
pub use error::{ExprError, Result};
pub use expr::{Evaluator, Expression, ExpressionKind, Interpreter};
pub use geom::{Point, ScreenPoint, ScreenRect};
pub use geometry::{
    SampleFailure, SampledCurve, build_axes, build_grid, grid_cell_size, sample_expression,
};
pub use graph::{GraphEvent, GraphView, Redraw, RedrawSummary};
pub use render::{
    Color, Frame, LineBatch, LineSegment, LineStyle, RenderSink, Stroke, build_line_segments,
    project_batch,
};
pub use sampling::SampleDomain;
pub use style::Theme;
pub use transform::Transform;
pub use view::{Range, Viewport};

#[cfg(feature = "gpui")]
pub use gpui_backend::{FrameSlot, GpuiGraphConfig, GpuiGraphView, GraphHandle};
