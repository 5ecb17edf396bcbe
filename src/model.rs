//! Graph data structures shared by the generator, the binder and the renderer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Stable node identifier.
pub type NodeId = u32;

/// Default visual size of a node symbol, in screen pixels (diameter).
pub const DEFAULT_SYMBOL_SIZE: f64 = 30.0;

/// A labeled point in the graph. Created once, never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	/// Unique identifier. Edges reference nodes by this id.
	pub id: NodeId,
	/// Display label.
	pub name: String,
	/// Symbol diameter hint in screen pixels.
	#[serde(default = "default_symbol_size")]
	pub symbol_size: f64,
	/// Pinned nodes are not moved by the force simulation.
	#[serde(default)]
	pub fixed: bool,
}

fn default_symbol_size() -> f64 {
	DEFAULT_SYMBOL_SIZE
}

/// A directed connection between two nodes by id.
///
/// Ids are not checked on construction; see [`validate_edges`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
	/// Id of the start node.
	pub source: NodeId,
	/// Id of the end node.
	pub target: NodeId,
}

impl Edge {
	/// Edge from `source` to `target`.
	pub fn new(source: NodeId, target: NodeId) -> Self {
		Self { source, target }
	}

	/// The same pair pointing the other way.
	pub fn reversed(self) -> Self {
		Self {
			source: self.target,
			target: self.source,
		}
	}

	/// Whether both ends are the same node.
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}
}

/// Complete graph data: nodes and edges.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// All nodes.
	pub nodes: Vec<Node>,
	/// All edges.
	pub edges: Vec<Edge>,
}

/// Split `edges` into those whose endpoints both exist in `nodes` and a list
/// of errors describing the rest. Order is preserved; self-loops and
/// duplicates are kept.
pub fn validate_edges(nodes: &[Node], edges: &[Edge]) -> (Vec<Edge>, Vec<ConfigurationError>) {
	let ids: HashSet<NodeId> = nodes.iter().map(|n| n.id).collect();
	let mut kept = Vec::with_capacity(edges.len());
	let mut rejected = Vec::new();

	for edge in edges {
		if ids.contains(&edge.source) && ids.contains(&edge.target) {
			kept.push(*edge);
		} else {
			rejected.push(ConfigurationError::DanglingEdge(edge.source, edge.target));
		}
	}
	(kept, rejected)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: NodeId) -> Node {
		Node {
			id,
			name: format!("n{id}"),
			symbol_size: DEFAULT_SYMBOL_SIZE,
			fixed: false,
		}
	}

	#[test]
	fn dangling_edges_are_rejected_in_order() {
		let nodes = vec![node(0), node(1)];
		let edges = vec![Edge::new(0, 1), Edge::new(1, 7), Edge::new(9, 0), Edge::new(1, 0)];

		let (kept, rejected) = validate_edges(&nodes, &edges);

		assert_eq!(kept, vec![Edge::new(0, 1), Edge::new(1, 0)]);
		assert_eq!(
			rejected,
			vec![
				ConfigurationError::DanglingEdge(1, 7),
				ConfigurationError::DanglingEdge(9, 0),
			]
		);
	}

	#[test]
	fn self_loops_and_duplicates_are_kept() {
		let nodes = vec![node(3)];
		let edges = vec![Edge::new(3, 3), Edge::new(3, 3)];

		let (kept, rejected) = validate_edges(&nodes, &edges);

		assert_eq!(kept.len(), 2);
		assert!(kept.iter().all(Edge::is_self_loop));
		assert!(rejected.is_empty());
	}

	#[test]
	fn node_json_uses_chart_field_names() {
		let json = serde_json::to_value(node(4)).unwrap();
		assert_eq!(json["symbolSize"], 30.0);
		assert_eq!(json["name"], "n4");

		let parsed: Node = serde_json::from_str(r#"{"id": 2, "name": "x"}"#).unwrap();
		assert_eq!(parsed.symbol_size, DEFAULT_SYMBOL_SIZE);
		assert!(!parsed.fixed);
	}
}
