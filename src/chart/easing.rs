//! Easing curves for chart transitions.

use serde::{Deserialize, Serialize};

/// Named easing curve, serialized with the usual chart-library names
/// (`"linear"`, `"cubicOut"`, `"quinticOut"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
	/// Constant speed.
	Linear,
	/// Fast start, `1 - (1 - t)^3`.
	CubicOut,
	/// Faster start, `1 - (1 - t)^5`.
	#[default]
	QuinticOut,
}

impl Easing {
	/// Map linear progress `t` (clamped to `[0, 1]`) onto the curve.
	pub fn apply(self, t: f64) -> f64 {
		let t = t.clamp(0.0, 1.0);
		match self {
			Easing::Linear => t,
			Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
			Easing::QuinticOut => 1.0 - (1.0 - t).powi(5),
		}
	}
}

/// A single eased transition driven by frame deltas.
#[derive(Clone, Debug)]
pub struct Transition {
	easing: Easing,
	duration: f64,
	elapsed: f64,
}

impl Transition {
	/// A transition lasting `duration_ms`. Zero duration finishes immediately.
	pub fn new(easing: Easing, duration_ms: u32) -> Self {
		Self {
			easing,
			duration: duration_ms as f64 / 1000.0,
			elapsed: 0.0,
		}
	}

	/// A transition that is already complete.
	pub fn finished() -> Self {
		Self {
			easing: Easing::Linear,
			duration: 0.0,
			elapsed: 0.0,
		}
	}

	/// Move `dt` seconds forward, stopping at the end.
	pub fn advance(&mut self, dt: f64) {
		self.elapsed = (self.elapsed + dt).min(self.duration);
	}

	/// Eased progress in `[0, 1]`.
	pub fn progress(&self) -> f64 {
		if self.duration <= 0.0 {
			return 1.0;
		}
		self.easing.apply(self.elapsed / self.duration)
	}

	#[cfg(test)]
	fn is_done(&self) -> bool {
		self.elapsed >= self.duration
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn curves_hit_their_endpoints() {
		for easing in [Easing::Linear, Easing::CubicOut, Easing::QuinticOut] {
			assert_eq!(easing.apply(0.0), 0.0);
			assert_eq!(easing.apply(1.0), 1.0);
			assert_eq!(easing.apply(3.0), 1.0);
		}
	}

	#[test]
	fn quintic_out_front_loads_motion() {
		assert!(Easing::QuinticOut.apply(0.3) > Easing::CubicOut.apply(0.3));
		assert!(Easing::CubicOut.apply(0.3) > Easing::Linear.apply(0.3));
	}

	#[test]
	fn transition_completes_after_duration() {
		let mut t = Transition::new(Easing::QuinticOut, 500);
		assert_eq!(t.progress(), 0.0);

		t.advance(0.25);
		assert!(!t.is_done());
		assert!(t.progress() > 0.5);

		t.advance(1.0);
		assert!(t.is_done());
		assert_eq!(t.progress(), 1.0);
	}

	#[test]
	fn zero_duration_is_immediately_done() {
		let t = Transition::new(Easing::Linear, 0);
		assert!(t.is_done());
		assert_eq!(t.progress(), 1.0);
		assert!(Transition::finished().is_done());
	}

	#[test]
	fn easing_names_match_chart_conventions() {
		assert_eq!(
			serde_json::to_string(&Easing::QuinticOut).unwrap(),
			"\"quinticOut\""
		);
	}
}
