//! Chart configuration objects.
//!
//! A [`ChartOption`] is the complete state handed to a chart instance: the
//! visual settings ([`StyleOptions`]) plus the current node and edge lists.
//! After the first full configuration the binder only sends
//! [`OptionUpdate::Edges`], which replaces the edge list and nothing else.
//!
//! Field names serialize in the camelCase shape chart libraries expect, so a
//! `debug!` dump of an option reads like a familiar chart config.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::easing::Easing;
use super::tooltip::TooltipFormatter;
use crate::model::{Edge, Node};

/// How the tooltip is triggered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TooltipTrigger {
	/// Hovering a single node or edge.
	#[default]
	Item,
	/// No tooltip.
	None,
}

/// Tooltip settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOption {
	/// Whether tooltips are shown at all.
	pub show: bool,
	/// What brings the tooltip up.
	pub trigger: TooltipTrigger,
	/// Text for the hovered item.
	pub formatter: TooltipFormatter,
}

impl Default for TooltipOption {
	fn default() -> Self {
		Self {
			show: true,
			trigger: TooltipTrigger::Item,
			formatter: TooltipFormatter::ByDataType,
		}
	}
}

/// Node placement algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Layout {
	/// Physics simulation with repulsion between nodes and springs on edges.
	#[default]
	Force,
	/// Nodes stay where they were placed (on a circle).
	None,
}

/// Force simulation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceOption {
	/// Charge pushing every pair of nodes apart.
	pub repulsion: f32,
	/// Spring stiffness along edges.
	pub edge_spring: f32,
	/// Cap on the force applied to one node per step.
	pub max_force: f32,
	/// Scale from force to velocity.
	pub node_speed: f32,
	/// Velocity damping per step, `0..1`.
	pub friction: f32,
	/// Pull towards the view center, per second.
	pub gravity: f64,
}

impl Default for ForceOption {
	fn default() -> Self {
		Self {
			repulsion: 150.0,
			edge_spring: 0.05,
			max_force: 100.0,
			node_speed: 3000.0,
			friction: 0.9,
			gravity: 0.1,
		}
	}
}

/// Decoration drawn at one end of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeSymbol {
	/// Plain line end.
	None,
	/// Small dot.
	Circle,
	/// Arrow head pointing at the node.
	Arrow,
}

/// Where a node label sits relative to its symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelPosition {
	/// Above the symbol.
	Top,
	/// Below the symbol.
	#[default]
	Bottom,
	/// Right of the symbol.
	Right,
	/// Centered on the symbol.
	Inside,
}

/// Node label settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelOption {
	/// Draw node labels.
	pub show: bool,
	/// Placement around the symbol.
	pub position: LabelPosition,
	/// Template; `{b}` is the node name, `{a}` the series name.
	pub formatter: String,
	/// Font size in pixels before zoom scaling.
	pub font_size: f64,
}

impl Default for LabelOption {
	fn default() -> Self {
		Self {
			show: true,
			position: LabelPosition::Bottom,
			formatter: "{b}".into(),
			font_size: 12.0,
		}
	}
}

/// Edge label settings. Hidden unless `show` is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeLabelOption {
	/// Draw edge labels.
	pub show: bool,
	/// Font size in pixels before zoom scaling.
	pub font_size: f64,
}

impl Default for EdgeLabelOption {
	fn default() -> Self {
		Self {
			show: false,
			font_size: 20.0,
		}
	}
}

/// Label placement rules.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelLayout {
	/// Skip labels that would overlap one already drawn.
	pub hide_overlap: bool,
}

/// Where an edge takes its stroke color from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineColor {
	/// Color of the source node.
	#[default]
	Source,
	/// Color of the target node.
	Target,
	/// One CSS color for every edge.
	Fixed(String),
}

/// Edge stroke settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
	/// Where the stroke color comes from.
	pub color: LineColor,
	/// Bend of the edge relative to its length; 0 is straight.
	pub curveness: f64,
	/// Stroke width in pixels.
	pub width: f64,
	/// Stroke opacity, `0..=1`.
	pub opacity: f64,
}

impl Default for LineStyle {
	fn default() -> Self {
		Self {
			color: LineColor::Source,
			curveness: 0.2,
			width: 1.0,
			opacity: 0.7,
		}
	}
}

/// Visual and interaction settings of the graph series, without data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStyle {
	/// Series name, `{a}` in templates.
	pub name: String,
	/// Placement algorithm.
	pub layout: Layout,
	/// Simulation parameters for [`Layout::Force`].
	pub force: ForceOption,
	/// Animate configuration changes.
	pub animation: bool,
	/// Curve of the change animation.
	pub animation_easing: Easing,
	/// Milliseconds.
	pub animation_duration: u32,
	/// Decoration at the source and the target end.
	pub edge_symbol: [EdgeSymbol; 2],
	/// Sizes of the two end decorations.
	pub edge_symbol_size: [f64; 2],
	/// Edge label settings.
	pub edge_label: EdgeLabelOption,
	/// Pan and zoom with the mouse.
	pub roam: bool,
	/// Nodes can be dragged.
	pub draggable: bool,
	/// Node label settings.
	pub label: LabelOption,
	/// Label overlap handling.
	pub label_layout: LabelLayout,
	/// Edge stroke.
	pub line_style: LineStyle,
}

impl Default for SeriesStyle {
	fn default() -> Self {
		Self {
			name: "graph".into(),
			layout: Layout::Force,
			force: ForceOption::default(),
			animation: true,
			animation_easing: Easing::QuinticOut,
			animation_duration: 500,
			edge_symbol: [EdgeSymbol::Circle, EdgeSymbol::Arrow],
			edge_symbol_size: [4.0, 10.0],
			edge_label: EdgeLabelOption::default(),
			roam: true,
			draggable: true,
			label: LabelOption::default(),
			label_layout: LabelLayout { hide_overlap: true },
			line_style: LineStyle::default(),
		}
	}
}

/// Everything in a configuration except the graph data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOptions {
	/// Tooltip settings.
	pub tooltip: TooltipOption,
	/// Series style.
	pub series: SeriesStyle,
}

/// The graph series: style plus data.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSeries {
	#[serde(rename = "type")]
	kind: &'static str,
	/// Series style.
	#[serde(flatten)]
	pub style: SeriesStyle,
	/// Nodes in display order.
	pub nodes: Vec<Node>,
	/// Current edges.
	pub edges: Vec<Edge>,
}

impl Default for GraphSeries {
	fn default() -> Self {
		Self {
			kind: "graph",
			style: SeriesStyle::default(),
			nodes: Vec::new(),
			edges: Vec::new(),
		}
	}
}

/// A complete chart configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChartOption {
	/// Tooltip settings.
	pub tooltip: TooltipOption,
	/// The single graph series.
	#[serde(serialize_with = "serialize_single_series")]
	pub series: GraphSeries,
}

fn serialize_single_series<S: serde::Serializer>(
	series: &GraphSeries,
	serializer: S,
) -> Result<S::Ok, S::Error> {
	serializer.collect_seq(std::iter::once(series))
}

impl ChartOption {
	/// Combine style settings with graph data.
	pub fn compose(nodes: Vec<Node>, edges: Vec<Edge>, style: &StyleOptions) -> Self {
		Self {
			tooltip: style.tooltip.clone(),
			series: GraphSeries {
				style: style.series.clone(),
				nodes,
				edges,
				..GraphSeries::default()
			},
		}
	}

	/// Nodes of the series.
	pub fn nodes(&self) -> &[Node] {
		&self.series.nodes
	}

	/// Edges of the series.
	pub fn edges(&self) -> &[Edge] {
		&self.series.edges
	}

	/// Style of the series.
	pub fn style(&self) -> &SeriesStyle {
		&self.series.style
	}

	/// Apply an update in place. `Edges` touches only the edge list.
	pub fn merge(&mut self, update: &OptionUpdate) {
		match update {
			OptionUpdate::Full(option) => *self = option.clone(),
			OptionUpdate::Edges(edges) => self.series.edges = edges.clone(),
		}
	}

	/// JSON shape of the option, for logging.
	pub fn to_json(&self) -> Value {
		serde_json::to_value(self).unwrap_or(Value::Null)
	}
}

/// What a chart instance receives through `set_option`.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionUpdate {
	/// Replace the whole configuration.
	Full(ChartOption),
	/// Replace only the series edges.
	Edges(Vec<Edge>),
}

impl OptionUpdate {
	/// JSON shape of the update, partial for `Edges`.
	pub fn to_json(&self) -> Value {
		match self {
			OptionUpdate::Full(option) => option.to_json(),
			OptionUpdate::Edges(edges) => json!({ "series": [{ "edges": edges }] }),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::generator::generate_nodes;

	#[test]
	fn defaults_follow_the_demo_chart() {
		let style = StyleOptions::default();
		let series = &style.series;

		assert_eq!(series.layout, Layout::Force);
		assert!(series.animation);
		assert_eq!(series.animation_easing, Easing::QuinticOut);
		assert_eq!(series.animation_duration, 500);
		assert_eq!(series.edge_symbol, [EdgeSymbol::Circle, EdgeSymbol::Arrow]);
		assert_eq!(series.edge_symbol_size, [4.0, 10.0]);
		assert_eq!(series.edge_label.font_size, 20.0);
		assert!(series.roam && series.draggable);
		assert_eq!(series.label.position, LabelPosition::Bottom);
		assert_eq!(series.label.formatter, "{b}");
		assert!(series.label_layout.hide_overlap);
		assert_eq!(series.line_style.color, LineColor::Source);
		assert_eq!(series.line_style.curveness, 0.2);
		assert_eq!(style.tooltip.trigger, TooltipTrigger::Item);
	}

	#[test]
	fn edge_merge_leaves_nodes_and_style_alone() {
		let mut option = ChartOption::compose(
			generate_nodes(3),
			vec![Edge::new(0, 1)],
			&StyleOptions::default(),
		);
		let before = option.clone();

		option.merge(&OptionUpdate::Edges(vec![Edge::new(2, 2)]));

		assert_eq!(option.nodes(), before.nodes());
		assert_eq!(option.style(), before.style());
		assert_eq!(option.tooltip, before.tooltip);
		assert_eq!(option.edges(), &[Edge::new(2, 2)]);
	}

	#[test]
	fn full_merge_replaces_everything() {
		let mut option = ChartOption::default();
		let next = ChartOption::compose(generate_nodes(2), vec![], &StyleOptions::default());

		option.merge(&OptionUpdate::Full(next.clone()));

		assert_eq!(option, next);
	}

	#[test]
	fn json_shape_matches_chart_conventions() {
		let option = ChartOption::compose(
			generate_nodes(1),
			vec![Edge::new(0, 0)],
			&StyleOptions::default(),
		);
		let json = option.to_json();

		assert_eq!(json["tooltip"]["trigger"], "item");
		let series = &json["series"][0];
		assert_eq!(series["type"], "graph");
		assert_eq!(series["layout"], "force");
		assert_eq!(series["animationEasing"], "quinticOut");
		assert_eq!(series["labelLayout"]["hideOverlap"], true);
		assert_eq!(series["lineStyle"]["color"], "source");
		assert_eq!(series["nodes"][0]["name"], "test 0");
		assert_eq!(series["edges"][0]["source"], 0);

		let partial = OptionUpdate::Edges(vec![Edge::new(1, 0)]).to_json();
		assert_eq!(partial["series"][0]["edges"][0]["target"], 0);
		assert!(partial["series"][0].get("nodes").is_none());
	}
}
