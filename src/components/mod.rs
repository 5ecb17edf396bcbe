//! Page components: the chart view and the canvas engine behind it.

pub mod force_graph;
pub mod graph_view;

pub use graph_view::GraphView;
