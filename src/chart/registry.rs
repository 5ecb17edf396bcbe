//! Process-wide chart capability registration.
//!
//! Chart instances refuse to start unless the series type, renderer and
//! tooltip support they need have been registered. Registration is global and
//! idempotent: registering the same capability twice has no further effect.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, Once, OnceLock};

use log::debug;

/// A feature a chart instance may depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
	/// The graph series type.
	GraphChart,
	/// The 2d canvas renderer.
	CanvasRenderer,
	/// Hover tooltips.
	TooltipComponent,
}

/// Capabilities needed by the force graph view.
pub const DEFAULT_CAPABILITIES: [Capability; 3] = [
	Capability::GraphChart,
	Capability::CanvasRenderer,
	Capability::TooltipComponent,
];

static REGISTRY: OnceLock<Mutex<BTreeSet<Capability>>> = OnceLock::new();
static DEFAULTS: Once = Once::new();

fn registry() -> MutexGuard<'static, BTreeSet<Capability>> {
	let lock = REGISTRY.get_or_init(|| Mutex::new(BTreeSet::new()));
	// The set is always left consistent, so a poisoned lock is still usable.
	lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Register capabilities. Returns how many were newly added.
pub fn register(capabilities: &[Capability]) -> usize {
	let mut set = registry();
	let added = capabilities.iter().filter(|c| set.insert(**c)).count();
	if added > 0 {
		debug!("chart registry: {} capabilities added", added);
	}
	added
}

/// Register [`DEFAULT_CAPABILITIES`] exactly once per process.
pub fn ensure_registered() {
	DEFAULTS.call_once(|| {
		register(&DEFAULT_CAPABILITIES);
	});
}

/// Whether `capability` has been registered.
pub fn is_registered(capability: Capability) -> bool {
	registry().contains(&capability)
}

/// First capability in `required` that is not registered.
pub fn first_missing(required: &[Capability]) -> Option<Capability> {
	required.iter().copied().find(|c| !is_registered(*c))
}

#[cfg(test)]
mod tests {
	use std::thread;

	use super::*;

	fn registered() -> Vec<Capability> {
		registry().iter().copied().collect()
	}

	#[test]
	fn defaults_are_present_after_ensure() {
		ensure_registered();
		ensure_registered();

		for cap in DEFAULT_CAPABILITIES {
			assert!(is_registered(cap));
		}
		assert_eq!(first_missing(&DEFAULT_CAPABILITIES), None);
	}

	#[test]
	fn registering_twice_adds_nothing_new() {
		ensure_registered();
		assert_eq!(register(&DEFAULT_CAPABILITIES), 0);

		let snapshot = registered();
		let unique: BTreeSet<_> = snapshot.iter().collect();
		assert_eq!(snapshot.len(), unique.len());
	}

	#[test]
	fn concurrent_registration_is_safe() {
		let handles: Vec<_> = (0..8)
			.map(|_| thread::spawn(ensure_registered))
			.collect();
		for h in handles {
			h.join().unwrap();
		}
		assert_eq!(registered().len(), DEFAULT_CAPABILITIES.len());
	}
}
