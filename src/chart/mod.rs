//! The charting contract: configuration objects, capability registration,
//! and the binder that owns one chart instance per surface.
//!
//! A chart library is anything implementing [`ChartLibrary`]; the canvas
//! engine in `components::force_graph` is the one used by the app.

pub mod binder;
pub mod easing;
pub mod mount;
pub mod option;
pub mod registry;
pub mod session;
pub mod tooltip;

pub use binder::{BindPhase, Binder, ChartInstance, ChartLibrary, DisplaySurface};
pub use option::{ChartOption, OptionUpdate, StyleOptions};
pub use mount::{Mount, retry_delay};
pub use session::{LiveGraph, RefreshTimer};
pub use tooltip::{TooltipDatum, format_tooltip};
