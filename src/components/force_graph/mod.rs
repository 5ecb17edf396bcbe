//! Canvas force-graph engine.
//!
//! Implements the chart contract from [`crate::chart`] on an HTML canvas:
//! - Physics-based node positioning via force simulation
//! - Curved directional edges coloured by their source node, with end symbols
//! - Pan, zoom and node dragging
//! - Hover emphasis and a tooltip box at the pointer
//! - Bottom labels with overlap hiding
//!
//! # Example
//!
//! ```ignore
//! use graph_pulse::chart::Binder;
//! use graph_pulse::components::force_graph::{CanvasLibrary, CanvasSurface};
//!
//! let mut binder = Binder::new(CanvasLibrary::default());
//! binder.initialize(&CanvasSurface::new(canvas, 700.0))?;
//! ```

mod chart;
pub mod geometry;
pub mod label_layout;
mod render;
pub mod scale;
pub mod state;
pub mod theme;

pub use chart::{CanvasChart, CanvasLibrary, CanvasSurface};
pub use theme::Theme;
