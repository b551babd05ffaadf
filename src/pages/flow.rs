use leptos::prelude::*;

use crate::components::flow_chart::FlowChartCanvas;
use crate::components::types::GraphData;
use crate::graph::{Edge, FlowNodeType, Node, PathHint};

/// Flow chart for a sign check. Both decision branches light up together.
fn sign_check() -> GraphData<FlowNodeType> {
	use FlowNodeType::*;

	let nodes = vec![
		Node::new("start", "Start", Start).at(300.0, 50.0),
		Node::new("read", "Read n", Input).at(300.0, 140.0),
		Node::new("check", "n >= 0?", Decision).at(300.0, 240.0),
		Node::new("pos", "Print \"positive\"", Output).at(150.0, 350.0),
		Node::new("neg", "Print \"negative\"", Output).at(450.0, 350.0),
		Node::new("end", "End", End).at(300.0, 460.0),
	];
	let edges = vec![
		Edge::new("start", "read"),
		Edge::new("read", "check"),
		Edge::new("check", "pos").hint(PathHint::Yes),
		Edge::new("check", "neg").hint(PathHint::No),
		Edge::new("pos", "end"),
		Edge::new("neg", "end"),
	];

	GraphData { nodes, edges }
}

#[component]
pub fn Flow() -> impl IntoView {
	let graph_data = Signal::derive(sign_check);

	view! {
		<div class="page">
			<h1>"How a program runs"</h1>
			<FlowChartCanvas data=graph_data width=Some(600.0) height=Some(520.0) />
			<a href="/">"Concept map"</a>
		</div>
	}
}
