//! Ownership of a single chart instance bound to a display surface.
//!
//! The binder is the only holder of the chart and of the configuration it was
//! given. State machine:
//!
//! ```text
//! Unbound --initialize--> Initialized --release--> Released
//!                          |  ^   (updates)          |
//!                          +--+                      +--initialize--> Initialized
//! ```
//!
//! Re-initializing an `Initialized` binder releases the previous chart first,
//! so there is never more than one live instance per binder.

use log::{debug, info, warn};

use super::option::{ChartOption, OptionUpdate, StyleOptions};
use super::registry;
use crate::error::BindingError;
use crate::model::{Edge, Node, validate_edges};

/// A region of screen the chart renders into.
pub trait DisplaySurface {
	/// Whether the surface is mounted and can host a chart.
	fn is_attached(&self) -> bool;
}

/// A live chart created by a [`ChartLibrary`].
pub trait ChartInstance {
	/// Apply a full or partial configuration. Fire-and-forget: animations the
	/// change triggers run on their own.
	fn set_option(&mut self, update: &OptionUpdate);

	/// Free rendering resources. Called at most once.
	fn dispose(&mut self);
}

/// The charting library: creates chart instances on surfaces.
pub trait ChartLibrary {
	/// Where charts are drawn.
	type Surface: DisplaySurface;
	/// The instance [`ChartLibrary::init`] creates.
	type Chart: ChartInstance;

	/// Create a chart on `surface`.
	fn init(&self, surface: &Self::Surface) -> Result<Self::Chart, BindingError>;
}

/// Observable binder state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindPhase {
	/// No chart yet.
	Unbound,
	/// A chart is live and accepts updates.
	Initialized,
	/// The chart was disposed. [`Binder::initialize`] can bind again.
	Released,
}

enum BindState<C> {
	Unbound,
	Initialized {
		chart: C,
		applied: Option<ChartOption>,
	},
	Released,
}

/// Owns at most one chart instance and the configuration applied to it.
pub struct Binder<L: ChartLibrary> {
	library: L,
	state: BindState<L::Chart>,
}

impl<L: ChartLibrary> Binder<L> {
	/// A binder with no chart yet.
	pub fn new(library: L) -> Self {
		Self {
			library,
			state: BindState::Unbound,
		}
	}

	/// Current state of the binder.
	pub fn phase(&self) -> BindPhase {
		match self.state {
			BindState::Unbound => BindPhase::Unbound,
			BindState::Initialized { .. } => BindPhase::Initialized,
			BindState::Released => BindPhase::Released,
		}
	}

	/// Whether a full configuration has been applied to the current chart.
	pub fn is_configured(&self) -> bool {
		matches!(
			self.state,
			BindState::Initialized {
				applied: Some(_),
				..
			}
		)
	}

	/// The configuration currently held by the chart.
	pub fn option(&self) -> Option<&ChartOption> {
		match &self.state {
			BindState::Initialized { applied, .. } => applied.as_ref(),
			_ => None,
		}
	}

	/// The live chart, if any.
	pub fn chart(&self) -> Option<&L::Chart> {
		match &self.state {
			BindState::Initialized { chart, .. } => Some(chart),
			_ => None,
		}
	}

	/// Create a chart on `surface`, releasing any chart this binder already holds.
	///
	/// Registers the default chart capabilities (once per process) first. Fails
	/// with [`BindingError::SurfaceNotAttached`] when the surface is not mounted
	/// yet; the previous chart, if any, is kept in that case.
	pub fn initialize(&mut self, surface: &L::Surface) -> Result<(), BindingError> {
		registry::ensure_registered();

		if !surface.is_attached() {
			return Err(BindingError::SurfaceNotAttached);
		}

		if matches!(self.state, BindState::Initialized { .. }) {
			info!("binder: releasing previous chart before re-binding");
			self.dispose_chart();
		}

		let chart = self.library.init(surface)?;
		self.state = BindState::Initialized {
			chart,
			applied: None,
		};
		info!("binder: chart initialized");
		Ok(())
	}

	/// Set the complete chart state.
	///
	/// Edges pointing at missing nodes are logged and dropped. Applying a
	/// configuration identical to the one already held does nothing.
	pub fn apply_full_configuration(
		&mut self,
		nodes: Vec<Node>,
		edges: Vec<Edge>,
		style: &StyleOptions,
	) -> Result<(), BindingError> {
		let (chart, applied) = self.initialized_mut()?;

		let (edges, rejected) = validate_edges(&nodes, &edges);
		for err in &rejected {
			warn!("binder: dropping edge: {}", err);
		}

		let option = ChartOption::compose(nodes, edges, style);
		if applied.as_ref() == Some(&option) {
			debug!("binder: configuration unchanged, skipping");
			return Ok(());
		}

		let update = OptionUpdate::Full(option);
		debug!("binder: full configuration {}", update.to_json());
		chart.set_option(&update);
		if let OptionUpdate::Full(option) = update {
			*applied = Some(option);
		}
		Ok(())
	}

	/// Replace the edge list of the current configuration, leaving nodes and
	/// style untouched.
	pub fn apply_edge_update(&mut self, edges: Vec<Edge>) -> Result<(), BindingError> {
		let (chart, applied) = self.initialized_mut()?;
		let Some(option) = applied else {
			return Err(BindingError::NotConfigured);
		};

		let (edges, rejected) = validate_edges(option.nodes(), &edges);
		for err in &rejected {
			warn!("binder: dropping edge: {}", err);
		}

		let update = OptionUpdate::Edges(edges);
		debug!("binder: edge update {}", update.to_json());
		chart.set_option(&update);
		option.merge(&update);
		Ok(())
	}

	/// Dispose the chart and stop accepting updates. Safe to call repeatedly.
	pub fn release(&mut self) {
		if matches!(self.state, BindState::Released) {
			return;
		}
		self.dispose_chart();
		self.state = BindState::Released;
	}

	fn initialized_mut(
		&mut self,
	) -> Result<(&mut L::Chart, &mut Option<ChartOption>), BindingError> {
		match &mut self.state {
			BindState::Initialized { chart, applied } => Ok((chart, applied)),
			BindState::Unbound => Err(BindingError::Unbound),
			BindState::Released => Err(BindingError::Released),
		}
	}

	fn dispose_chart(&mut self) {
		if let BindState::Initialized { mut chart, .. } =
			std::mem::replace(&mut self.state, BindState::Unbound)
		{
			chart.dispose();
			info!("binder: chart disposed");
		}
	}
}

impl<L: ChartLibrary> Drop for Binder<L> {
	fn drop(&mut self) {
		self.release();
	}
}
