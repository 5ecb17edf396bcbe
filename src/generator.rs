//! Sample graph data: a fixed node set and randomly reshuffled edges.

use rand::Rng;

use crate::model::{DEFAULT_SYMBOL_SIZE, Edge, Node, NodeId};

/// Generate `count` nodes with ids `0..count` named `"test {id}"`.
pub fn generate_nodes(count: NodeId) -> Vec<Node> {
	generate_nodes_with_size(count, DEFAULT_SYMBOL_SIZE)
}

/// Same as [`generate_nodes`] with an explicit symbol size.
pub fn generate_nodes_with_size(count: NodeId, symbol_size: f64) -> Vec<Node> {
	(0..count)
		.map(|id| Node {
			id,
			name: format!("test {}", id),
			symbol_size,
			fixed: false,
		})
		.collect()
}

/// Draw `pair_count` random node pairs and emit each pair in both directions.
///
/// Endpoints are uniform over `0..node_count`. Self-loops and duplicate
/// pairs are possible and left in. Returns an empty list when `node_count`
/// is zero.
pub fn generate_edges(node_count: NodeId, pair_count: usize) -> Vec<Edge> {
	generate_edges_with(&mut rand::thread_rng(), node_count, pair_count)
}

/// [`generate_edges`] with a caller-supplied random source.
pub fn generate_edges_with<R: Rng + ?Sized>(
	rng: &mut R,
	node_count: NodeId,
	pair_count: usize,
) -> Vec<Edge> {
	if node_count == 0 {
		return Vec::new();
	}
	let mut edges = Vec::with_capacity(pair_count * 2);

	for _ in 0..pair_count {
		let edge = Edge::new(rng.gen_range(0..node_count), rng.gen_range(0..node_count));
		edges.push(edge);
		edges.push(edge.reversed());
	}
	edges
}
