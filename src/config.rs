//! Demo settings.
//!
//! Read as JSON from a `<script id="demo-config">` element when present.
//! Missing fields take their defaults. Invalid values are logged and replaced
//! by their defaults one field at a time; only a document that fails to parse
//! is rejected as a whole.

use std::cmp::Ordering;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::chart::option::StyleOptions;
use crate::error::ConfigurationError;
use crate::model::NodeId;

/// Settings for the demo page and its chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
	/// Heading shown above the chart.
	pub title: String,
	/// Nodes in the graph, with ids `0..node_count`.
	pub node_count: NodeId,
	/// Random pairs per refresh; each pair yields two edges.
	pub pair_count: usize,
	/// Time between edge refreshes.
	pub refresh_interval_ms: u32,
	/// Surface height in CSS pixels. Width follows the container.
	pub surface_height: f64,
	/// Node diameter before zoom scaling.
	pub symbol_size: f64,
	/// Length of the re-layout animation.
	pub animation_duration_ms: u32,
	/// Start with a random edge set instead of waiting for the first refresh.
	pub initial_edges: bool,
	/// How many times to retry binding while the surface is not attached.
	pub mount_retry_limit: u32,
	/// Wait between two binding attempts.
	pub mount_retry_delay_ms: u32,
}

impl Default for DemoConfig {
	fn default() -> Self {
		Self {
			title: "Force Graph".into(),
			node_count: 10,
			pair_count: 10,
			refresh_interval_ms: 10_000,
			surface_height: 700.0,
			symbol_size: 30.0,
			animation_duration_ms: 500,
			initial_edges: false,
			mount_retry_limit: 20,
			mount_retry_delay_ms: 50,
		}
	}
}

impl DemoConfig {
	/// Parse a settings document.
	///
	/// Fails only when the JSON itself is malformed. Out-of-range values are
	/// logged and reset to their defaults, keeping the rest of the document.
	pub fn from_json(text: &str) -> Result<Self, ConfigurationError> {
		let mut config: DemoConfig = serde_json::from_str(text)?;
		for err in config.sanitize() {
			warn!("settings: {}, using the default", err);
		}
		Ok(config)
	}

	/// Reset every value that must be positive but is not to its default.
	/// Returns one error per field that was reset.
	pub fn sanitize(&mut self) -> Vec<ConfigurationError> {
		let defaults = Self::default();
		let mut reset = Vec::new();
		ensure_positive("node_count", &mut self.node_count, defaults.node_count, &mut reset);
		ensure_positive("pair_count", &mut self.pair_count, defaults.pair_count, &mut reset);
		ensure_positive(
			"refresh_interval_ms",
			&mut self.refresh_interval_ms,
			defaults.refresh_interval_ms,
			&mut reset,
		);
		ensure_positive(
			"surface_height",
			&mut self.surface_height,
			defaults.surface_height,
			&mut reset,
		);
		ensure_positive("symbol_size", &mut self.symbol_size, defaults.symbol_size, &mut reset);
		reset
	}

	/// Chart style derived from these settings.
	pub fn style(&self) -> StyleOptions {
		let mut style = StyleOptions::default();
		style.series.animation_duration = self.animation_duration_ms;
		style
	}
}

fn ensure_positive<T: PartialOrd + Default>(
	field: &'static str,
	value: &mut T,
	default: T,
	reset: &mut Vec<ConfigurationError>,
) {
	if (*value).partial_cmp(&T::default()) != Some(Ordering::Greater) {
		*value = default;
		reset.push(ConfigurationError::NotPositive { field });
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_reference_demo() {
		let config = DemoConfig::default();
		assert_eq!(config.node_count, 10);
		assert_eq!(config.pair_count, 10);
		assert_eq!(config.refresh_interval_ms, 10_000);
		assert_eq!(config.surface_height, 700.0);
		assert!(config.clone().sanitize().is_empty());
	}

	#[test]
	fn partial_json_keeps_other_defaults() {
		let config = DemoConfig::from_json(r#"{"node_count": 25, "title": "Live"}"#).unwrap();
		assert_eq!(config.node_count, 25);
		assert_eq!(config.title, "Live");
		assert_eq!(config.pair_count, 10);
	}

	#[test]
	fn invalid_values_fall_back_one_field_at_a_time() {
		let config =
			DemoConfig::from_json(r#"{"title": "Live", "node_count": 25, "pair_count": 0}"#).unwrap();

		assert_eq!(config.title, "Live");
		assert_eq!(config.node_count, 25);
		assert_eq!(config.pair_count, 10);
	}

	#[test]
	fn sanitize_reports_every_reset_field() {
		let mut config = DemoConfig {
			refresh_interval_ms: 0,
			surface_height: -5.0,
			..DemoConfig::default()
		};

		assert_eq!(
			config.sanitize(),
			vec![
				ConfigurationError::NotPositive {
					field: "refresh_interval_ms"
				},
				ConfigurationError::NotPositive {
					field: "surface_height"
				},
			]
		);
		assert_eq!(config, DemoConfig::default());
	}

	#[test]
	fn malformed_json_is_a_configuration_error() {
		assert!(matches!(
			DemoConfig::from_json("{ nope"),
			Err(ConfigurationError::Json(_))
		));
	}

	#[test]
	fn style_carries_animation_duration() {
		let config = DemoConfig {
			animation_duration_ms: 120,
			..DemoConfig::default()
		};
		assert_eq!(config.style().series.animation_duration, 120);
	}
}
