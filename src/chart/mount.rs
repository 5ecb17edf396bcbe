//! Binding a live graph to a surface that may not be mounted yet.
//!
//! A [`Mount`] belongs to one view and keeps at most one [`LiveGraph`]. While
//! the surface is not attached, binding is retried on a timer. Once the mount
//! is closed, retries already in flight do nothing.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, error, info, warn};

use super::binder::ChartLibrary;
use super::session::{LiveGraph, RefreshTimer, Tick};
use crate::config::DemoConfig;
use crate::error::BindingError;

/// One-shot callback handed to the retry scheduler.
pub type Retry = Box<dyn FnOnce()>;

/// Delay before the next binding attempt, or `None` to give up.
///
/// Only errors that may clear up once the surface mounts are retried, and at
/// most `mount_retry_limit` times. `attempt` counts the failed attempts before
/// this one.
pub fn retry_delay(err: &BindingError, attempt: u32, config: &DemoConfig) -> Option<u32> {
	(err.is_retryable() && attempt < config.mount_retry_limit).then_some(config.mount_retry_delay_ms)
}

struct Slot<L, T, P>
where
	L: ChartLibrary + 'static,
	L::Chart: 'static,
	T: RefreshTimer,
{
	live: Option<LiveGraph<L, T>>,
	pending: Option<P>,
	closed: bool,
}

struct Shared<L, T, P>
where
	L: ChartLibrary + 'static,
	L::Chart: 'static,
	T: RefreshTimer,
{
	library: L,
	config: DemoConfig,
	refresh: Box<dyn Fn(u32, Tick) -> T>,
	retry: Box<dyn Fn(u32, Retry) -> P>,
	slot: RefCell<Slot<L, T, P>>,
}

/// The live graph of one view plus its pending bind retry, if any.
///
/// `T` is the refresh timer and `P` the handle of a scheduled retry; dropping
/// a `P` is expected to cancel it.
pub struct Mount<L, T, P>
where
	L: ChartLibrary + 'static,
	L::Chart: 'static,
	T: RefreshTimer,
{
	shared: Rc<Shared<L, T, P>>,
}

impl<L, T, P> Mount<L, T, P>
where
	L: ChartLibrary + Clone + 'static,
	L::Chart: 'static,
	L::Surface: 'static,
	T: RefreshTimer + 'static,
	P: 'static,
{
	/// `refresh(interval_ms, tick)` starts the edge refresh timer and
	/// `retry(delay_ms, retry)` schedules a single retry.
	pub fn new(
		library: L,
		config: DemoConfig,
		refresh: impl Fn(u32, Tick) -> T + 'static,
		retry: impl Fn(u32, Retry) -> P + 'static,
	) -> Self {
		Self {
			shared: Rc::new(Shared {
				library,
				config,
				refresh: Box::new(refresh),
				retry: Box::new(retry),
				slot: RefCell::new(Slot {
					live: None,
					pending: None,
					closed: false,
				}),
			}),
		}
	}

	/// Bind to `surface`, replacing any graph this mount already holds.
	pub fn bind(&self, surface: L::Surface) {
		attempt_bind(&self.shared, surface, 0);
	}

	/// Whether a graph is currently bound.
	pub fn is_live(&self) -> bool {
		self.shared.slot.borrow().live.is_some()
	}

	/// Whether a binding retry is scheduled.
	pub fn has_pending_retry(&self) -> bool {
		self.shared.slot.borrow().pending.is_some()
	}

	/// Cancel a pending retry and tear down the graph. Later binds and retries
	/// do nothing. Idempotent.
	pub fn close(&self) {
		let (live, pending) = {
			let mut slot = self.shared.slot.borrow_mut();
			slot.closed = true;
			(slot.live.take(), slot.pending.take())
		};
		drop(pending);
		if let Some(mut graph) = live {
			graph.teardown();
		}
	}
}

fn attempt_bind<L, T, P>(shared: &Rc<Shared<L, T, P>>, surface: L::Surface, attempt: u32)
where
	L: ChartLibrary + Clone + 'static,
	L::Chart: 'static,
	L::Surface: 'static,
	T: RefreshTimer + 'static,
	P: 'static,
{
	let previous = {
		let mut slot = shared.slot.borrow_mut();
		if slot.closed {
			debug!("mount: closed, not binding");
			return;
		}
		slot.pending = None;
		slot.live.take()
	};
	// At most one chart per view.
	if let Some(mut graph) = previous {
		graph.teardown();
	}

	let started = LiveGraph::start(
		shared.library.clone(),
		&surface,
		&shared.config,
		|interval_ms, tick| (shared.refresh)(interval_ms, tick),
	);
	match started {
		Ok(graph) => {
			if attempt > 0 {
				info!("mount: bound after {} retries", attempt);
			}
			shared.slot.borrow_mut().live = Some(graph);
		}
		Err(e) => match retry_delay(&e, attempt, &shared.config) {
			Some(delay) => {
				warn!("mount: {} (attempt {}), retrying in {} ms", e, attempt + 1, delay);
				let weak: Weak<Shared<L, T, P>> = Rc::downgrade(shared);
				let pending = (shared.retry)(
					delay,
					Box::new(move || {
						if let Some(shared) = weak.upgrade() {
							attempt_bind(&shared, surface, attempt + 1);
						}
					}),
				);
				shared.slot.borrow_mut().pending = Some(pending);
			}
			None => error!("mount: binding failed after {} attempts: {}", attempt + 1, e),
		},
	}
}
