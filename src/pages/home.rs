use leptos::prelude::*;

use crate::components::concept_map::ConceptMapCanvas;
use crate::components::types::GraphData;
use crate::graph::{ConceptCategory, Edge, Node};

/// Concept map for the ownership lesson.
fn ownership_concepts() -> GraphData<ConceptCategory> {
	use ConceptCategory::*;

	let nodes = vec![
		Node::new("ownership", "Ownership", Core),
		Node::new("borrowing", "Borrowing", Concept),
		Node::new("lifetimes", "Lifetimes", Concept),
		Node::new("move", "Move semantics", Concept),
		Node::new("drop", "Drop", Concept),
		Node::new("shared", "&T", Example),
		Node::new("unique", "&mut T", Example),
		Node::new("box", "Box<T>", Example),
		Node::new("rc", "Rc<T>", Related),
		Node::new("refcell", "RefCell<T>", Related),
	];
	let edges = vec![
		Edge::new("ownership", "borrowing").labeled("lends"),
		Edge::new("ownership", "move"),
		Edge::new("ownership", "drop").labeled("ends in"),
		Edge::new("borrowing", "lifetimes").labeled("bounded by"),
		Edge::new("borrowing", "shared"),
		Edge::new("borrowing", "unique"),
		Edge::new("move", "box"),
		Edge::new("ownership", "rc").labeled("shared via"),
		Edge::new("rc", "refcell"),
	];

	GraphData { nodes, edges }
}

#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(ownership_concepts);

	view! {
		<div class="fullscreen-graph">
			<ConceptMapCanvas data=graph_data />
			<div class="graph-overlay">
				<h1>"Ownership at a glance"</h1>
				<p class="subtitle">
					"Hover to see related ideas. Click to select. Scroll to zoom. Drag to pan. Double-click to reset."
				</p>
				<a href="/flow">"Flow chart"</a>
			</div>
		</div>
	}
}
