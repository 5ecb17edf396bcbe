//! Error types for chart binding and graph configuration.

use thiserror::Error;

use crate::chart::registry::Capability;
use crate::model::NodeId;

/// Failures while binding a chart to its display surface or driving it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BindingError {
	/// No surface handle exists yet (e.g. the node ref has not been filled).
	#[error("display surface is missing")]
	SurfaceMissing,

	/// The surface exists but is not attached to the document yet.
	/// Recoverable: retry once mounting completes.
	#[error("display surface is not attached")]
	SurfaceNotAttached,

	/// The charting library refused to create an instance because a
	/// required capability was never registered.
	#[error("chart capability {0:?} is not registered")]
	MissingCapability(Capability),

	/// The surface could not provide a drawing context.
	#[error("rendering context unavailable: {0}")]
	Context(String),

	/// An update was requested before `initialize` succeeded.
	#[error("chart is not initialized")]
	Unbound,

	/// An edge update was requested before the full configuration was applied.
	#[error("chart has no configuration yet")]
	NotConfigured,

	/// The chart was released (view torn down).
	#[error("chart has been released")]
	Released,
}

impl BindingError {
	/// Whether waiting for the surface to mount may make the error go away.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::SurfaceMissing | Self::SurfaceNotAttached)
	}
}

/// Problems with graph data or demo settings. Never fatal: offending items
/// are logged and dropped, or defaults are used instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
	/// An edge refers to a node id that does not exist.
	#[error("edge {0} -> {1} references a missing node")]
	DanglingEdge(NodeId, NodeId),

	/// A setting that must be positive was zero or negative.
	#[error("`{field}` must be greater than zero")]
	NotPositive {
		/// Name of the offending setting.
		field: &'static str,
	},

	/// The settings document could not be parsed.
	#[error("invalid settings JSON: {0}")]
	Json(String),
}

impl From<serde_json::Error> for ConfigurationError {
	fn from(e: serde_json::Error) -> Self {
		Self::Json(e.to_string())
	}
}
