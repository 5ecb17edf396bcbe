//! Simulation and interaction state behind a canvas chart.
//!
//! Wraps the `force_graph` physics simulation with per-node display data, the
//! pan/zoom transform, pointer interaction and hover emphasis. Nothing in here
//! touches the DOM, so the whole state machine runs in plain unit tests.
//!
//! The simulation is rebuilt whenever the edge list changes. Node positions are
//! carried over by id, so a refresh only rewires springs and never makes nodes
//! jump.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::geometry::{Curve, Point, SelfLoop, distance};
use super::scale::{ScaleConfig, ScaledValues};
use super::theme::{Color, Theme};
use crate::chart::easing::Transition;
use crate::chart::option::{
	ChartOption, Layout, LineColor, OptionUpdate, SeriesStyle, TooltipOption, TooltipTrigger,
};
use crate::chart::tooltip::{TooltipDatum, render_template};
use crate::model::{Edge, Node, NodeId};

/// Radius of the circle new nodes are placed on.
const INITIAL_RING_RADIUS: f64 = 100.0;
const NODE_MASS: f32 = 10.0;
const ZOOM_STEP: f64 = 1.1;

/// Per-node display data attached to each simulation node.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Node id.
	pub id: NodeId,
	/// Name shown in tooltips.
	pub name: String,
	/// Label text after template expansion.
	pub label: String,
	/// Fill taken from the palette by position.
	pub color: Color,
	/// Symbol diameter before zoom scaling.
	pub symbol_size: f64,
	/// Pinned in place by the simulation.
	pub fixed: bool,
}

impl NodeInfo {
	fn new(node: &Node, index: usize, style: &SeriesStyle, theme: &Theme) -> Self {
		Self {
			id: node.id,
			name: node.name.clone(),
			label: render_template(&style.label.formatter, &node.name, &style.name),
			color: theme.palette.get(index),
			symbol_size: node.symbol_size,
			fixed: node.fixed,
		}
	}
}

/// A node's position for one frame.
#[derive(Clone, Debug)]
pub struct NodeView {
	/// Graph-space x.
	pub x: f64,
	/// Graph-space y.
	pub y: f64,
	/// Display data of the node.
	pub info: NodeInfo,
}

impl NodeView {
	/// Graph-space position as a point.
	pub fn position(&self) -> Point {
		(self.x, self.y)
	}
}

/// Snapshot of all node positions, taken once per frame or event.
#[derive(Clone, Debug, Default)]
pub struct Frame {
	/// Nodes in simulation order.
	pub nodes: Vec<NodeView>,
	index: HashMap<NodeId, usize>,
}

impl Frame {
	/// Look a node up by id.
	pub fn node(&self, id: NodeId) -> Option<&NodeView> {
		self.index.get(&id).map(|&i| &self.nodes[i])
	}
}

/// Where an edge is drawn, already cut at the node borders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeShape {
	/// A curved edge between two nodes.
	Curve(Curve),
	/// An edge from a node to itself.
	Loop(SelfLoop),
}

impl EdgeShape {
	/// Distance from `p` to the drawn edge.
	pub fn distance_to(&self, p: Point) -> f64 {
		match self {
			EdgeShape::Curve(curve) => curve.distance_to(p),
			EdgeShape::Loop(self_loop) => self_loop.distance_to(p),
		}
	}
}

/// Pan and zoom applied to the whole graph.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	/// Screen x of the graph origin.
	pub x: f64,
	/// Screen y of the graph origin.
	pub y: f64,
	/// Zoom factor.
	pub k: f64,
}

impl ViewTransform {
	/// Map a screen point into graph space.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Point {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Map a graph-space point onto the screen.
	pub fn graph_to_screen(&self, p: Point) -> Point {
		(p.0 * self.k + self.x, p.1 * self.k + self.y)
	}

	/// Zoom by `factor` keeping the screen point `(sx, sy)` in place.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, min: f64, max: f64) {
		let k = (self.k * factor).clamp(min, max);
		let ratio = k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = k;
	}
}

/// An in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Node being dragged.
	pub node: Option<NodeId>,
	/// Screen point where the drag began.
	pub start: Point,
	/// Graph position of the node when the drag began.
	pub node_start: Point,
}

/// An in-progress pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Whether a pan is running.
	pub active: bool,
	/// Screen point where the pan began.
	pub start: Point,
	/// Transform offset when the pan began.
	pub transform_start: Point,
}

/// What the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTarget {
	/// A node, by id.
	Node(NodeId),
	/// Index into the current edge list.
	Edge(usize),
}

/// Smoothed per-node emphasis for hover effects.
///
/// Each node's intensity eases towards 1 while it is in focus and back to 0
/// afterwards, with exponential smoothing so the change slows as it settles.
#[derive(Clone, Debug, Default)]
pub struct Emphasis {
	focus: HashSet<NodeId>,
	intensity: HashMap<NodeId, f64>,
	cached_max: f64,
}

impl Emphasis {
	const FADE_IN_SPEED: f64 = 6.0;
	const FADE_OUT_SPEED: f64 = 4.0;

	/// Replace the set of nodes fading in.
	pub fn focus(&mut self, nodes: impl IntoIterator<Item = NodeId>) {
		self.focus = nodes.into_iter().collect();
	}

	/// Whether `id` is in the current focus.
	pub fn is_focused(&self, id: NodeId) -> bool {
		self.focus.contains(&id)
	}

	/// Ease all intensities by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let fade_in = 1.0 - (-Self::FADE_IN_SPEED * dt).exp();
		let fade_out = (-Self::FADE_OUT_SPEED * dt).exp();

		for &id in &self.focus {
			let value = self.intensity.entry(id).or_insert(0.0);
			*value += (1.0 - *value) * fade_in;
		}

		let mut max: f64 = 0.0;
		self.intensity.retain(|id, value| {
			if !self.focus.contains(id) {
				*value *= fade_out;
			}
			max = max.max(*value);
			*value > 0.005
		});
		self.cached_max = max;
	}

	/// Current intensity of a node, `0..=1`.
	pub fn node(&self, id: NodeId) -> f64 {
		self.intensity.get(&id).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge(&self, source: NodeId, target: NodeId) -> f64 {
		(self.node(source) * self.node(target)).sqrt()
	}

	/// Largest intensity after the last tick.
	pub fn max(&self) -> f64 {
		self.cached_max
	}
}

/// Core state of a canvas chart.
///
/// Created when the chart is initialized, configured through
/// [`ForceGraphState::apply`], and advanced by the animation loop through
/// [`ForceGraphState::tick`].
pub struct ForceGraphState {
	/// The physics simulation.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Node drag in progress.
	pub drag: DragState,
	/// Pan in progress.
	pub pan: PanState,
	/// Hover emphasis per node.
	pub emphasis: Emphasis,
	/// Item under the pointer.
	pub hover: Option<HoverTarget>,
	/// Last pointer position in screen space.
	pub pointer: Option<Point>,
	/// Surface width in CSS pixels.
	pub width: f64,
	/// Surface height in CSS pixels.
	pub height: f64,
	/// Zoom scaling rules.
	pub scale: ScaleConfig,
	theme: Theme,
	style: SeriesStyle,
	tooltip: TooltipOption,
	nodes: Vec<NodeInfo>,
	edges: Vec<Edge>,
	id_to_idx: HashMap<NodeId, DefaultNodeIdx>,
	/// Nodes grow in after a full configuration.
	appear: Transition,
	/// Edges fade in after every edge update.
	edge_fade: Transition,
}

impl ForceGraphState {
	/// Empty state for a `width` by `height` surface, centered on the origin.
	pub fn new(width: f64, height: f64, theme: Theme) -> Self {
		let style = SeriesStyle::default();
		Self {
			graph: ForceGraph::new(simulation_parameters(&style)),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			emphasis: Emphasis::default(),
			hover: None,
			pointer: None,
			width,
			height,
			scale: ScaleConfig::default(),
			theme,
			style,
			tooltip: TooltipOption::default(),
			nodes: Vec::new(),
			edges: Vec::new(),
			id_to_idx: HashMap::new(),
			appear: Transition::finished(),
			edge_fade: Transition::finished(),
		}
	}

	/// Colors used for drawing.
	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	/// Series style of the current configuration.
	pub fn style(&self) -> &SeriesStyle {
		&self.style
	}

	/// Current edges, self-loops included.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Number of configured nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Eased progress of the node grow-in, `0..=1`.
	pub fn appear_progress(&self) -> f64 {
		self.appear.progress()
	}

	/// Eased progress of the edge fade-in, `0..=1`.
	pub fn edge_progress(&self) -> f64 {
		self.edge_fade.progress()
	}

	/// Apply a full configuration or an edge update.
	pub fn apply(&mut self, update: &OptionUpdate) {
		match update {
			OptionUpdate::Full(option) => self.apply_option(option),
			OptionUpdate::Edges(edges) => self.set_edges(edges.clone()),
		}
	}

	/// Take over a complete configuration. Nodes that survive keep their position.
	pub fn apply_option(&mut self, option: &ChartOption) {
		let previous = self.positions();
		self.style = option.style().clone();
		self.tooltip = option.tooltip.clone();
		self.nodes = option
			.nodes()
			.iter()
			.enumerate()
			.map(|(i, node)| NodeInfo::new(node, i, &self.style, &self.theme))
			.collect();
		self.edges = option.edges().to_vec();
		// A drag in progress must not pin its node in the new simulation.
		self.drag = DragState::default();
		self.rebuild(&previous);

		self.appear = self.transition();
		self.edge_fade = self.transition();
		self.set_hover(None);
		debug!(
			"canvas: configured {} nodes, {} edges",
			self.nodes.len(),
			self.edges.len()
		);
	}

	/// Replace the edges, keeping nodes where they are.
	pub fn set_edges(&mut self, edges: Vec<Edge>) {
		let previous = self.positions();
		self.edges = edges;
		self.rebuild(&previous);
		self.edge_fade = self.transition();

		match self.hover {
			Some(HoverTarget::Edge(_)) => self.set_hover(None),
			Some(HoverTarget::Node(id)) => {
				let focus = self.neighbourhood(id);
				self.emphasis.focus(focus);
			}
			None => {}
		}
	}

	fn transition(&self) -> Transition {
		if self.style.animation {
			Transition::new(self.style.animation_easing, self.style.animation_duration)
		} else {
			Transition::finished()
		}
	}

	fn rebuild(&mut self, previous: &HashMap<NodeId, Point>) {
		let mut graph = ForceGraph::new(simulation_parameters(&self.style));
		self.id_to_idx.clear();

		let count = self.nodes.len();
		for (i, info) in self.nodes.iter().enumerate() {
			let (x, y) = previous
				.get(&info.id)
				.copied()
				.unwrap_or_else(|| ring_position(i, count));
			let idx = graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: NODE_MASS,
				is_anchor: info.fixed || self.drag.node == Some(info.id),
				user_data: info.clone(),
			});
			self.id_to_idx.insert(info.id, idx);
		}

		// Self-loops have no length to spring towards; they are only drawn.
		for edge in self.edges.iter().filter(|e| !e.is_self_loop()) {
			if let (Some(&a), Some(&b)) = (
				self.id_to_idx.get(&edge.source),
				self.id_to_idx.get(&edge.target),
			) {
				graph.add_edge(a, b, EdgeData::default());
			}
		}
		self.graph = graph;
	}

	fn positions(&self) -> HashMap<NodeId, Point> {
		let mut positions = HashMap::with_capacity(self.nodes.len());
		self.graph.visit_nodes(|node| {
			positions.insert(node.data.user_data.id, (node.x() as f64, node.y() as f64));
		});
		positions
	}

	/// Positions of all nodes right now.
	pub fn frame(&self) -> Frame {
		let mut frame = Frame::default();
		self.graph.visit_nodes(|node| {
			frame.index.insert(node.data.user_data.id, frame.nodes.len());
			frame.nodes.push(NodeView {
				x: node.x() as f64,
				y: node.y() as f64,
				info: node.data.user_data.clone(),
			});
		});
		frame
	}

	/// Sizes for the current zoom.
	pub fn scaled(&self) -> ScaledValues {
		ScaledValues::new(&self.scale, &self.style, self.transform.k)
	}

	/// Advance physics, transitions and emphasis by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		if self.style.layout == Layout::Force {
			self.graph.update(dt as f32);
			let pull = (self.style.force.gravity * dt).min(1.0) as f32;
			if pull > 0.0 {
				self.graph.visit_nodes_mut(|node| {
					if !node.data.is_anchor {
						node.data.x -= node.data.x * pull;
						node.data.y -= node.data.y * pull;
					}
				});
			}
		}
		self.appear.advance(dt);
		self.edge_fade.advance(dt);
		self.emphasis.tick(dt);
	}

	/// Keep the graph centered when the surface changes size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}

	/// Geometry of an edge in `frame`, cut at the node borders.
	pub fn edge_shape(&self, frame: &Frame, edge: &Edge, scale: &ScaledValues) -> Option<EdgeShape> {
		let source = frame.node(edge.source)?;
		let source_radius = scale.node_radius(source.info.symbol_size);
		if edge.is_self_loop() {
			return Some(EdgeShape::Loop(SelfLoop::above(
				source.position(),
				source_radius,
			)));
		}
		let target = frame.node(edge.target)?;
		let target_radius = scale.node_radius(target.info.symbol_size);
		Curve::between(
			source.position(),
			target.position(),
			self.style.line_style.curveness,
		)
		.trimmed(source_radius, target_radius)
		.map(EdgeShape::Curve)
	}

	/// Stroke color of `edge` per the line style.
	pub fn edge_color(&self, frame: &Frame, edge: &Edge) -> Color {
		let from_node = |id: NodeId| {
			frame
				.node(id)
				.map(|n| n.info.color)
				.unwrap_or(self.theme.label_color)
		};
		match &self.style.line_style.color {
			LineColor::Source => from_node(edge.source),
			LineColor::Target => from_node(edge.target),
			LineColor::Fixed(css) => Color::parse(css),
		}
	}

	/// Topmost node under the graph-space point `p`.
	pub fn node_at(&self, frame: &Frame, p: Point, scale: &ScaledValues) -> Option<NodeId> {
		frame
			.nodes
			.iter()
			.rev()
			.find(|n| {
				distance(n.position(), p) <= scale.node_radius(n.info.symbol_size) + scale.hit_slack
			})
			.map(|n| n.info.id)
	}

	/// Topmost edge under the graph-space point `p`.
	pub fn edge_at(&self, frame: &Frame, p: Point, scale: &ScaledValues) -> Option<usize> {
		let reach = scale.line_width / 2.0 + scale.hit_slack;
		self.edges
			.iter()
			.enumerate()
			.rev()
			.find(|(_, edge)| {
				self.edge_shape(frame, edge, scale)
					.is_some_and(|shape| shape.distance_to(p) <= reach)
			})
			.map(|(i, _)| i)
	}

	fn neighbourhood(&self, id: NodeId) -> Vec<NodeId> {
		let mut nodes = vec![id];
		for edge in &self.edges {
			if edge.source == id {
				nodes.push(edge.target);
			} else if edge.target == id {
				nodes.push(edge.source);
			}
		}
		nodes
	}

	/// Change the hovered item and what is emphasized with it.
	pub fn set_hover(&mut self, target: Option<HoverTarget>) {
		if self.hover == target {
			return;
		}
		self.hover = target;
		let focus = match target {
			Some(HoverTarget::Node(id)) => self.neighbourhood(id),
			Some(HoverTarget::Edge(i)) => self
				.edges
				.get(i)
				.map(|e| vec![e.source, e.target])
				.unwrap_or_default(),
			None => Vec::new(),
		};
		self.emphasis.focus(focus);
	}

	/// The hovered item as the tooltip formatter sees it.
	pub fn hovered_datum(&self) -> Option<TooltipDatum> {
		match self.hover? {
			HoverTarget::Node(id) => self
				.nodes
				.iter()
				.find(|n| n.id == id)
				.map(|n| TooltipDatum::Node {
					name: n.name.clone(),
				}),
			HoverTarget::Edge(i) => self.edges.get(i).map(|e| TooltipDatum::Edge {
				source: e.source,
				target: e.target,
			}),
		}
	}

	/// Tooltip text for the hovered item, if a tooltip should be shown.
	pub fn tooltip_text(&self) -> Option<String> {
		if !self.tooltip.show
			|| self.tooltip.trigger != TooltipTrigger::Item
			|| self.drag.node.is_some()
		{
			return None;
		}
		let datum = self.hovered_datum()?;
		Some(self.tooltip.formatter.format(&datum, &self.style.name))
	}

	/// Start dragging the node under the pointer, or panning.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		let p = self.transform.screen_to_graph(sx, sy);
		let frame = self.frame();
		if self.style.draggable {
			let hit = self
				.node_at(&frame, p, &self.scaled())
				.and_then(|id| frame.node(id));
			if let Some(node) = hit {
				let id = node.info.id;
				self.drag = DragState {
					node: Some(id),
					start: (sx, sy),
					node_start: node.position(),
				};
				self.set_anchor(id, true);
				return;
			}
		}
		if self.style.roam {
			self.pan = PanState {
				active: true,
				start: (sx, sy),
				transform_start: (self.transform.x, self.transform.y),
			};
		}
	}

	/// Continue a drag or pan, otherwise update the hover.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		self.pointer = Some((sx, sy));
		if let Some(id) = self.drag.node {
			let k = self.transform.k;
			let x = self.drag.node_start.0 + (sx - self.drag.start.0) / k;
			let y = self.drag.node_start.1 + (sy - self.drag.start.1) / k;
			self.move_node(id, x, y);
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start.0 + (sx - self.pan.start.0);
			self.transform.y = self.pan.transform_start.1 + (sy - self.pan.start.1);
		} else {
			let p = self.transform.screen_to_graph(sx, sy);
			let frame = self.frame();
			let scale = self.scaled();
			let target = self
				.node_at(&frame, p, &scale)
				.map(HoverTarget::Node)
				.or_else(|| self.edge_at(&frame, p, &scale).map(HoverTarget::Edge));
			self.set_hover(target);
		}
	}

	/// End a drag or pan. A dragged node is let go unless it is fixed.
	pub fn pointer_up(&mut self) {
		if let Some(id) = self.drag.node.take() {
			let fixed = self.nodes.iter().any(|n| n.id == id && n.fixed);
			self.set_anchor(id, fixed);
		}
		self.pan.active = false;
	}

	/// Pointer left the surface: end interaction and hover.
	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.pointer = None;
		self.set_hover(None);
	}

	/// Zoom around the pointer. Returns whether the wheel event was consumed.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) -> bool {
		if !self.style.roam {
			return false;
		}
		let factor = if delta_y > 0.0 { 1.0 / ZOOM_STEP } else { ZOOM_STEP };
		self.transform
			.zoom_at(sx, sy, factor, self.scale.min_zoom, self.scale.max_zoom);
		true
	}

	fn set_anchor(&mut self, id: NodeId, anchored: bool) {
		self.graph.visit_nodes_mut(|node| {
			if node.data.user_data.id == id {
				node.data.is_anchor = anchored;
			}
		});
	}

	fn move_node(&mut self, id: NodeId, x: f64, y: f64) {
		self.graph.visit_nodes_mut(|node| {
			if node.data.user_data.id == id {
				node.data.x = x as f32;
				node.data.y = y as f32;
			}
		});
	}
}

fn simulation_parameters(style: &SeriesStyle) -> SimulationParameters {
	let force = &style.force;
	SimulationParameters {
		force_charge: force.repulsion,
		force_spring: force.edge_spring,
		force_max: force.max_force,
		node_speed: force.node_speed,
		damping_factor: force.friction,
	}
}

fn ring_position(index: usize, count: usize) -> Point {
	let angle = index as f64 * 2.0 * PI / count.max(1) as f64;
	(
		INITIAL_RING_RADIUS * angle.cos(),
		INITIAL_RING_RADIUS * angle.sin(),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::chart::option::StyleOptions;
	use crate::generator::generate_nodes;

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn configured(nodes: NodeId, edges: Vec<Edge>, style: &StyleOptions) -> ForceGraphState {
		let mut state = ForceGraphState::new(W, H, Theme::default());
		state.apply(&OptionUpdate::Full(ChartOption::compose(
			generate_nodes(nodes),
			edges,
			style,
		)));
		state
	}

	/// Screen position of a node, with the default centered transform.
	fn screen_of(state: &ForceGraphState, id: NodeId) -> Point {
		let frame = state.frame();
		state
			.transform
			.graph_to_screen(frame.node(id).unwrap().position())
	}

	#[test]
	fn full_configuration_places_nodes_on_a_ring() {
		let state = configured(4, vec![], &StyleOptions::default());
		let frame = state.frame();

		assert_eq!(frame.nodes.len(), 4);
		for node in &frame.nodes {
			assert!((distance(node.position(), (0.0, 0.0)) - INITIAL_RING_RADIUS).abs() < 1e-3);
		}
		assert_eq!(frame.node(2).unwrap().info.label, "test 2");
		assert_eq!(frame.node(0).unwrap().info.color, state.theme().palette.get(0));
	}

	#[test]
	fn edge_update_keeps_node_positions() {
		let mut state = configured(5, vec![Edge::new(0, 1)], &StyleOptions::default());
		state.tick(0.05);
		let before = state.positions();

		state.apply(&OptionUpdate::Edges(vec![Edge::new(2, 3), Edge::new(3, 2)]));

		assert_eq!(state.positions(), before);
		assert_eq!(state.edges(), &[Edge::new(2, 3), Edge::new(3, 2)]);
		assert_eq!(state.node_count(), 5);
	}

	#[test]
	fn edge_update_restarts_the_fade() {
		let mut state = configured(3, vec![], &StyleOptions::default());
		state.tick(1.0);
		assert_eq!(state.edge_progress(), 1.0);

		state.set_edges(vec![Edge::new(0, 1)]);

		assert_eq!(state.edge_progress(), 0.0);
		assert_eq!(state.appear_progress(), 1.0);
	}

	#[test]
	fn self_loops_are_drawn_as_loops() {
		let state = configured(2, vec![Edge::new(1, 1)], &StyleOptions::default());
		let frame = state.frame();
		let shape = state.edge_shape(&frame, &Edge::new(1, 1), &state.scaled());
		assert!(matches!(shape, Some(EdgeShape::Loop(_))));
	}

	#[test]
	fn colors_follow_the_source_node() {
		let state = configured(3, vec![], &StyleOptions::default());
		let frame = state.frame();
		assert_eq!(
			state.edge_color(&frame, &Edge::new(2, 0)),
			state.theme().palette.get(2)
		);
	}

	#[test]
	fn hovering_a_node_shows_its_name() {
		let mut state = configured(4, vec![Edge::new(0, 1)], &StyleOptions::default());
		let (sx, sy) = screen_of(&state, 0);

		state.pointer_move(sx, sy);

		assert_eq!(state.hover, Some(HoverTarget::Node(0)));
		assert_eq!(state.tooltip_text().as_deref(), Some("test 0"));
		assert!(state.emphasis.is_focused(1));
		assert!(!state.emphasis.is_focused(2));
	}

	#[test]
	fn hovering_an_edge_shows_source_and_target() {
		let mut state = configured(4, vec![Edge::new(0, 1)], &StyleOptions::default());
		let frame = state.frame();
		let Some(EdgeShape::Curve(curve)) =
			state.edge_shape(&frame, &Edge::new(0, 1), &state.scaled())
		else {
			panic!("expected a curved edge");
		};
		let (sx, sy) = state.transform.graph_to_screen(curve.point(0.5));

		state.pointer_move(sx, sy);

		assert_eq!(state.hover, Some(HoverTarget::Edge(0)));
		assert_eq!(state.tooltip_text().as_deref(), Some("0 -> 1"));
	}

	#[test]
	fn empty_space_has_no_tooltip() {
		let mut state = configured(4, vec![], &StyleOptions::default());
		state.pointer_move(W / 2.0, H / 2.0);
		assert_eq!(state.hover, None);
		assert_eq!(state.tooltip_text(), None);
	}

	#[test]
	fn hidden_tooltip_stays_hidden() {
		let mut style = StyleOptions::default();
		style.tooltip.show = false;
		let mut state = configured(4, vec![], &style);
		let (sx, sy) = screen_of(&state, 0);

		state.pointer_move(sx, sy);

		assert_eq!(state.hover, Some(HoverTarget::Node(0)));
		assert_eq!(state.tooltip_text(), None);
	}

	#[test]
	fn edge_hover_is_cleared_by_an_edge_update() {
		let mut state = configured(4, vec![Edge::new(0, 1)], &StyleOptions::default());
		state.set_hover(Some(HoverTarget::Edge(0)));

		state.set_edges(vec![]);

		assert_eq!(state.hover, None);
		assert_eq!(state.hovered_datum(), None);
	}

	#[test]
	fn dragging_moves_and_then_releases_the_node() {
		let mut state = configured(4, vec![], &StyleOptions::default());
		let (sx, sy) = screen_of(&state, 0);

		state.pointer_down(sx, sy);
		state.pointer_move(sx + 30.0, sy - 10.0);

		let node = state.frame().node(0).unwrap().position();
		assert!((node.0 - (INITIAL_RING_RADIUS + 30.0)).abs() < 1e-3);
		assert!((node.1 + 10.0).abs() < 1e-3);
		assert_eq!(state.tooltip_text(), None);

		state.pointer_up();
		let mut anchored = true;
		state.graph.visit_nodes(|n| {
			if n.data.user_data.id == 0 {
				anchored = n.data.is_anchor;
			}
		});
		assert!(!anchored);
		assert!(state.drag.node.is_none());
	}

	#[test]
	fn reconfiguring_mid_drag_leaves_the_node_free() {
		let mut state = configured(4, vec![], &StyleOptions::default());
		let (sx, sy) = screen_of(&state, 0);
		state.pointer_down(sx, sy);

		state.apply(&OptionUpdate::Full(ChartOption::compose(
			generate_nodes(5),
			vec![],
			&StyleOptions::default(),
		)));
		state.pointer_up();

		let mut anchored = Vec::new();
		state.graph.visit_nodes(|n| {
			if n.data.is_anchor {
				anchored.push(n.data.user_data.id);
			}
		});
		assert!(anchored.is_empty(), "still anchored: {:?}", anchored);
		assert!(state.drag.node.is_none());
	}

	#[test]
	fn background_drag_pans_only_with_roam() {
		let mut state = configured(2, vec![], &StyleOptions::default());
		state.pointer_down(10.0, 10.0);
		state.pointer_move(60.0, 30.0);
		state.pointer_up();
		assert_eq!((state.transform.x, state.transform.y), (W / 2.0 + 50.0, H / 2.0 + 20.0));

		let mut style = StyleOptions::default();
		style.series.roam = false;
		let mut fixed = configured(2, vec![], &style);
		fixed.pointer_down(10.0, 10.0);
		fixed.pointer_move(60.0, 30.0);
		assert_eq!((fixed.transform.x, fixed.transform.y), (W / 2.0, H / 2.0));
		assert!(!fixed.wheel(0.0, 0.0, -1.0));
	}

	#[test]
	fn zoom_is_clamped_and_keeps_the_pointer_in_place() {
		let mut state = configured(2, vec![], &StyleOptions::default());
		let before = state.transform.screen_to_graph(100.0, 100.0);

		assert!(state.wheel(100.0, 100.0, -1.0));
		let after = state.transform.screen_to_graph(100.0, 100.0);
		assert!(distance(before, after) < 1e-9);

		for _ in 0..100 {
			state.wheel(100.0, 100.0, -1.0);
		}
		assert_eq!(state.transform.k, state.scale.max_zoom);
	}

	#[test]
	fn static_layout_does_not_move_nodes() {
		let mut style = StyleOptions::default();
		style.series.layout = Layout::None;
		let mut state = configured(3, vec![Edge::new(0, 1)], &style);
		let before = state.positions();

		state.tick(0.5);

		assert_eq!(state.positions(), before);
	}

	#[test]
	fn emphasis_fades_in_and_out() {
		let mut emphasis = Emphasis::default();
		emphasis.focus([1, 2]);
		emphasis.tick(0.1);
		let lit = emphasis.node(1);
		assert!(lit > 0.0 && lit < 1.0);
		assert!(emphasis.edge(1, 2) > 0.0);
		assert_eq!(emphasis.edge(1, 3), 0.0);

		emphasis.focus(Vec::<NodeId>::new());
		for _ in 0..200 {
			emphasis.tick(0.05);
		}
		assert_eq!(emphasis.node(1), 0.0);
		assert_eq!(emphasis.max(), 0.0);
	}

	#[test]
	fn resize_keeps_the_graph_centered() {
		let mut state = configured(2, vec![], &StyleOptions::default());
		state.resize(W + 200.0, H);
		assert_eq!(state.transform.x, (W + 200.0) / 2.0);
	}
}
