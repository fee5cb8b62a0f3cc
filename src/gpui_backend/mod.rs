//! GPUI integration for gpui_exprgraph.
//!
//! This module provides a GPUI view that feeds canvas size and wheel input
//! into a [`GraphView`](crate::graph::GraphView) and paints the frames it
//! produces.

mod config;
mod frame;
mod paint;
mod state;
mod view;

pub use config::GpuiGraphConfig;
pub use state::FrameSlot;
pub use view::{GpuiGraphView, GraphHandle};
