//! A bound chart together with its refresh timer.
//!
//! [`LiveGraph`] acquires the chart and the periodic edge refresh as one
//! resource and releases them together, either through
//! [`LiveGraph::teardown`] or on drop. Ticks only hold a weak reference to
//! the binder, so a tick that fires after teardown finds nothing to update.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Interval;
use log::{debug, info, warn};

use super::binder::{Binder, ChartLibrary};
use crate::config::DemoConfig;
use crate::error::BindingError;
use crate::generator::{generate_edges, generate_nodes_with_size};
use crate::model::NodeId;

/// A cancellable repeating timer.
pub trait RefreshTimer {
	/// Stop the timer. No tick runs afterwards.
	fn cancel(self);
}

impl RefreshTimer for Interval {
	fn cancel(self) {
		drop(Interval::cancel(self));
	}
}

/// Tick callback handed to the scheduler.
pub type Tick = Box<dyn FnMut()>;

/// A chart kept in sync with freshly generated edges until torn down.
pub struct LiveGraph<L, T>
where
	L: ChartLibrary + 'static,
	L::Chart: 'static,
	T: RefreshTimer,
{
	binder: Option<Rc<RefCell<Binder<L>>>>,
	timer: Option<T>,
}

impl<L, T> LiveGraph<L, T>
where
	L: ChartLibrary + 'static,
	L::Chart: 'static,
	T: RefreshTimer,
{
	/// Bind a chart to `surface`, apply the full configuration, then start the
	/// refresh timer through `schedule(interval_ms, tick)`.
	///
	/// If anything fails before the timer is scheduled, the partially built
	/// chart is released before the error is returned.
	pub fn start<S>(
		library: L,
		surface: &L::Surface,
		config: &DemoConfig,
		schedule: S,
	) -> Result<Self, BindingError>
	where
		S: FnOnce(u32, Tick) -> T,
	{
		let mut binder = Binder::new(library);
		binder.initialize(surface)?;

		let nodes = generate_nodes_with_size(config.node_count, config.symbol_size);
		let edges = if config.initial_edges {
			generate_edges(config.node_count, config.pair_count)
		} else {
			Vec::new()
		};
		binder.apply_full_configuration(nodes, edges, &config.style())?;

		let binder = Rc::new(RefCell::new(binder));
		let weak = Rc::downgrade(&binder);
		let (node_count, pair_count) = (config.node_count, config.pair_count);
		let tick: Tick = Box::new(move || refresh_edges(&weak, node_count, pair_count));
		let timer = schedule(config.refresh_interval_ms, tick);

		info!(
			"live graph: {} nodes, refreshing {} pairs every {} ms",
			node_count, pair_count, config.refresh_interval_ms
		);
		Ok(Self {
			binder: Some(binder),
			timer: Some(timer),
		})
	}

	/// Whether the chart is still bound.
	pub fn is_live(&self) -> bool {
		self.binder.is_some()
	}

	/// Run `f` against the binder while the graph is live.
	pub fn with_binder<R>(&self, f: impl FnOnce(&Binder<L>) -> R) -> Option<R> {
		let binder = self.binder.as_ref()?;
		let guard = binder.try_borrow().ok()?;
		Some(f(&guard))
	}

	/// Cancel the timer and release the chart. Idempotent.
	pub fn teardown(&mut self) {
		if let Some(timer) = self.timer.take() {
			timer.cancel();
		}
		if let Some(binder) = self.binder.take() {
			binder.borrow_mut().release();
			info!("live graph: torn down");
		}
	}
}

impl<L, T> Drop for LiveGraph<L, T>
where
	L: ChartLibrary + 'static,
	L::Chart: 'static,
	T: RefreshTimer,
{
	fn drop(&mut self) {
		self.teardown();
	}
}

fn refresh_edges<L: ChartLibrary>(
	binder: &Weak<RefCell<Binder<L>>>,
	node_count: NodeId,
	pair_count: usize,
) {
	let Some(shared) = binder.upgrade() else {
		debug!("refresh: view is gone, skipping tick");
		return;
	};
	let Ok(mut binder) = shared.try_borrow_mut() else {
		warn!("refresh: chart busy, skipping tick");
		return;
	};

	let edges = generate_edges(node_count, pair_count);
	match binder.apply_edge_update(edges) {
		Ok(()) => debug!("refresh: edges replaced"),
		Err(e) => warn!("refresh: edge update failed: {}", e),
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;
	use crate::chart::BindPhase;
	use crate::chart::option::OptionUpdate;
	use crate::chart::test_support::{Call, RecordingLibrary, TestSurface};

	/// Timer that keeps its tick around so tests can fire it by hand,
	/// including after cancellation.
	#[derive(Clone, Default)]
	struct ManualTimer {
		tick: Rc<RefCell<Option<Tick>>>,
		interval_ms: Rc<Cell<u32>>,
		cancelled: Rc<Cell<bool>>,
	}

	impl ManualTimer {
		fn fire(&self) {
			if let Some(tick) = self.tick.borrow_mut().as_mut() {
				tick();
			}
		}

		fn schedule(&self) -> impl FnOnce(u32, Tick) -> ManualTimer + use<> {
			let timer = self.clone();
			move |ms, tick| {
				timer.interval_ms.set(ms);
				*timer.tick.borrow_mut() = Some(tick);
				timer
			}
		}
	}

	impl RefreshTimer for ManualTimer {
		fn cancel(self) {
			self.cancelled.set(true);
		}
	}

	fn start(
		library: &RecordingLibrary,
		timer: &ManualTimer,
		config: &DemoConfig,
	) -> LiveGraph<RecordingLibrary, ManualTimer> {
		LiveGraph::start(
			library.clone(),
			&TestSurface::attached(),
			config,
			timer.schedule(),
		)
		.unwrap()
	}

	#[test]
	fn start_configures_once_and_schedules_refresh() {
		let (library, timer) = (RecordingLibrary::default(), ManualTimer::default());
		let live = start(&library, &timer, &DemoConfig::default());

		assert!(live.is_live());
		assert_eq!(timer.interval_ms.get(), 10_000);
		assert_eq!(library.set_option_count(), 1);
		let OptionUpdate::Full(option) = library.first_full_update() else {
			unreachable!()
		};
		assert_eq!(option.nodes().len(), 10);
		assert!(option.edges().is_empty());
	}

	#[test]
	fn each_tick_replaces_edges_only() {
		let (library, timer) = (RecordingLibrary::default(), ManualTimer::default());
		let live = start(&library, &timer, &DemoConfig::default());
		let nodes = live.with_binder(|b| b.option().unwrap().nodes().to_vec()).unwrap();

		timer.fire();
		timer.fire();

		assert_eq!(library.edge_update_count(), 2);
		live.with_binder(|b| {
			let option = b.option().unwrap();
			assert_eq!(option.nodes(), nodes.as_slice());
			assert_eq!(option.edges().len(), 20);
		});
	}

	#[test]
	fn initial_edges_are_optional() {
		let (library, timer) = (RecordingLibrary::default(), ManualTimer::default());
		let config = DemoConfig {
			initial_edges: true,
			..DemoConfig::default()
		};
		let _live = start(&library, &timer, &config);

		let OptionUpdate::Full(option) = library.first_full_update() else {
			unreachable!()
		};
		assert_eq!(option.edges().len(), 20);
	}

	#[test]
	fn no_updates_after_teardown() {
		let (library, timer) = (RecordingLibrary::default(), ManualTimer::default());
		let mut live = start(&library, &timer, &DemoConfig::default());
		timer.fire();

		live.teardown();
		timer.fire();
		timer.fire();

		assert!(timer.cancelled.get());
		assert!(!live.is_live());
		assert_eq!(library.edge_update_count(), 1);
		assert_eq!(library.live_charts(), 0);
		assert!(matches!(library.calls().last(), Some(Call::Dispose(_))));
	}

	#[test]
	fn drop_releases_timer_and_chart() {
		let (library, timer) = (RecordingLibrary::default(), ManualTimer::default());
		drop(start(&library, &timer, &DemoConfig::default()));

		timer.fire();

		assert!(timer.cancelled.get());
		assert_eq!(library.live_charts(), 0);
		assert_eq!(library.edge_update_count(), 0);
	}

	#[test]
	fn detached_surface_schedules_nothing() {
		let (library, timer) = (RecordingLibrary::default(), ManualTimer::default());

		let result = LiveGraph::start(
			library.clone(),
			&TestSurface::detached(),
			&DemoConfig::default(),
			timer.schedule(),
		);

		assert!(matches!(result, Err(BindingError::SurfaceNotAttached)));
		assert!(timer.tick.borrow().is_none());
		assert_eq!(library.live_charts(), 0);
	}

	#[test]
	fn binder_phase_is_released_after_teardown() {
		let (library, timer) = (RecordingLibrary::default(), ManualTimer::default());
		let mut live = start(&library, &timer, &DemoConfig::default());
		let binder = live.binder.clone().unwrap();

		live.teardown();

		assert_eq!(binder.borrow().phase(), BindPhase::Released);
	}
}
