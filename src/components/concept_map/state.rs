use std::collections::HashSet;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::components::types::GraphData;
use crate::graph::{
	Bounds, ConceptCategory, Graph, InteractionController, LayoutParams, Positions, layout, node_at,
};

/// Everything the concept-map canvas needs between frames.
pub struct ConceptMapState {
	pub graph: Graph<ConceptCategory>,
	pub positions: Positions,
	pub view: InteractionController,
	pub neighbors: HashSet<String>,
	pub width: f64,
	pub height: f64,
}

impl ConceptMapState {
	/// Lays the graph out once; `seed` drives the initial scatter.
	pub fn new(data: GraphData<ConceptCategory>, width: f64, height: f64, seed: u64) -> Self {
		let graph = data.into_graph();
		let bounds = Bounds::new(width, height);
		let mut rng = StdRng::seed_from_u64(seed);
		let positions = layout(&graph, bounds, &LayoutParams::default(), &mut rng);
		info!(
			"concept map: laid out {} nodes, {} edges in {}x{}",
			graph.len(),
			graph.edges().len(),
			width,
			height
		);

		Self {
			graph,
			positions,
			view: InteractionController::default(),
			neighbors: HashSet::new(),
			width,
			height,
		}
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let p = self.view.screen_to_graph(sx, sy);
		let order = self
			.graph
			.nodes()
			.iter()
			.map(|n| (n.id.as_str(), n.radius));
		node_at(order, &self.positions, p).map(str::to_owned)
	}

	pub fn set_hover(&mut self, id: Option<String>) {
		if self.view.hovered() == id.as_deref() {
			return;
		}
		self.neighbors = match &id {
			Some(id) => self.graph.neighbors(id),
			None => HashSet::new(),
		};
		self.view.set_hover(id.as_deref());
	}

	pub fn is_highlighted(&self, id: &str) -> bool {
		self.view.is_hovered(id) || self.view.is_selected(id) || self.neighbors.contains(id)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.view.hovered().is_some() || self.view.selected().is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Edge, Node};

	fn sample() -> ConceptMapState {
		let data = GraphData {
			nodes: vec![
				Node::new("rust", "Rust", ConceptCategory::Core).at(200.0, 200.0),
				Node::new("own", "Ownership", ConceptCategory::Concept).at(400.0, 200.0),
				Node::new("vec", "Vec<T>", ConceptCategory::Example).at(600.0, 400.0),
			],
			edges: vec![Edge::new("rust", "own")],
		};
		ConceptMapState::new(data, 800.0, 600.0, 1)
	}

	#[test]
	fn test_hover_highlights_neighbors() {
		let mut s = sample();
		s.set_hover(Some("own".into()));
		assert!(s.is_highlighted("own"));
		assert!(s.is_highlighted("rust"));
		assert!(!s.is_highlighted("vec"));

		s.set_hover(None);
		assert!(!s.has_active_highlight());
	}

	#[test]
	fn test_hit_test_uses_view_transform() {
		let s = sample();
		let vec = s.positions["vec"];
		assert_eq!(s.node_at_position(vec.x, vec.y).as_deref(), Some("vec"));
		assert_eq!(s.node_at_position(-500.0, -500.0), None);
	}
}
