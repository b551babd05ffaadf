use crate::graph::{Edge, Graph, Node, NodeKind};

/// Node and edge lists as the host content layer supplies them.
#[derive(Clone, Debug)]
pub struct GraphData<K> {
	pub nodes: Vec<Node<K>>,
	pub edges: Vec<Edge>,
}

impl<K> Default for GraphData<K> {
	fn default() -> Self {
		Self {
			nodes: Vec::new(),
			edges: Vec::new(),
		}
	}
}

impl<K: NodeKind> GraphData<K> {
	pub fn into_graph(self) -> Graph<K> {
		Graph::build(self.nodes, self.edges)
	}
}
