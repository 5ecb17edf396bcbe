//! Tooltip and label text formatting.

use serde::{Deserialize, Serialize};

use crate::model::NodeId;

/// The item under the pointer, tagged by data kind.
#[derive(Clone, Debug, PartialEq)]
pub enum TooltipDatum {
	/// A node, by name.
	Node {
		/// Display label of the node.
		name: String,
	},
	/// An edge, by endpoint ids.
	Edge {
		/// Id of the start node.
		source: NodeId,
		/// Id of the end node.
		target: NodeId,
	},
	/// Anything else the chart may report (background, series, ...).
	Other,
}

/// Which formatter the tooltip uses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TooltipFormatter {
	/// Node name for nodes, `"source -> target"` for edges, `"unknown"` otherwise.
	#[default]
	ByDataType,
	/// A label template, see [`render_template`].
	Template(String),
}

impl TooltipFormatter {
	/// Tooltip text for `datum` in the series called `series_name`.
	pub fn format(&self, datum: &TooltipDatum, series_name: &str) -> String {
		match self {
			TooltipFormatter::ByDataType => format_tooltip(datum),
			TooltipFormatter::Template(template) => {
				render_template(template, &datum_name(datum), series_name)
			}
		}
	}
}

/// Default tooltip text for a datum.
pub fn format_tooltip(datum: &TooltipDatum) -> String {
	match datum {
		TooltipDatum::Node { name } => name.clone(),
		TooltipDatum::Edge { source, target } => format!("{} -> {}", source, target),
		TooltipDatum::Other => "unknown".to_string(),
	}
}

fn datum_name(datum: &TooltipDatum) -> String {
	match datum {
		TooltipDatum::Node { name } => name.clone(),
		TooltipDatum::Edge { source, target } => format!("{} > {}", source, target),
		TooltipDatum::Other => String::new(),
	}
}

/// Expand a label template: `{b}` becomes the item name, `{a}` the series name.
pub fn render_template(template: &str, name: &str, series_name: &str) -> String {
	template.replace("{b}", name).replace("{a}", series_name)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_tooltip_is_its_name() {
		let datum = TooltipDatum::Node {
			name: "test 3".into(),
		};
		assert_eq!(format_tooltip(&datum), "test 3");
	}

	#[test]
	fn edge_tooltip_shows_direction() {
		let datum = TooltipDatum::Edge {
			source: 4,
			target: 7,
		};
		assert_eq!(format_tooltip(&datum), "4 -> 7");
	}

	#[test]
	fn anything_else_is_unknown() {
		assert_eq!(format_tooltip(&TooltipDatum::Other), "unknown");
	}

	#[test]
	fn template_formatter_expands_placeholders() {
		let formatter = TooltipFormatter::Template("{a}: {b}".into());
		let datum = TooltipDatum::Node { name: "n".into() };
		assert_eq!(formatter.format(&datum, "graph"), "graph: n");
		assert_eq!(render_template("{b}", "test 1", "s"), "test 1");
	}
}
