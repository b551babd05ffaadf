use std::collections::BTreeSet;

use concept_graph::graph::{
	AnimationStatus, AnimatorConfig, Bounds, ConceptCategory, Edge, FlowNodeType, Graph,
	InteractionController, LayoutParams, Node, TraversalAnimator, layout,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn frontier(anim: &TraversalAnimator) -> BTreeSet<&str> {
	anim.frontier().iter().map(String::as_str).collect()
}

#[test]
fn test_layout_respects_bounds_for_many_seeds() {
	let nodes: Vec<_> = (0..24)
		.map(|i| Node::new(format!("n{}", i), format!("Node {}", i), ConceptCategory::Concept))
		.collect();
	let edges: Vec<_> = (1..24)
		.map(|i| Edge::new(format!("n{}", i), format!("n{}", i / 3)))
		.collect();
	let graph = Graph::build(nodes, edges);

	for (seed, bounds) in [
		(1, Bounds::new(800.0, 600.0)),
		(2, Bounds::new(200.0, 200.0)),
		(3, Bounds::new(1200.0, 90.0)),
		(4, Bounds::new(61.0, 61.0)),
	] {
		let out = layout(&graph, bounds, &LayoutParams::default(), &mut StdRng::seed_from_u64(seed));
		assert_eq!(out.len(), graph.len());
		for node in graph.nodes() {
			let p = out[&node.id];
			assert!(p.is_finite(), "seed {}: {} is not finite", seed, node.id);
			assert!(
				bounds.contains(p, node.radius),
				"seed {}: {} at {:?} escapes {:?}",
				seed,
				node.id,
				p,
				bounds
			);
		}
	}
}

#[test]
fn test_layout_of_empty_graph() {
	let graph = Graph::<ConceptCategory>::build(vec![], vec![]);
	let out = layout(
		&graph,
		Bounds::new(800.0, 600.0),
		&LayoutParams::default(),
		&mut StdRng::seed_from_u64(0),
	);
	assert!(out.is_empty());
}

#[test]
fn test_layout_with_stacked_nodes_never_goes_nan() {
	let nodes: Vec<_> = (0..5)
		.map(|i| Node::new(i.to_string(), "", ConceptCategory::Example).at(150.0, 150.0))
		.collect();
	let graph = Graph::build(nodes, vec![Edge::new("0", "1")]);
	let out = layout(
		&graph,
		Bounds::new(300.0, 300.0),
		&LayoutParams::default(),
		&mut StdRng::seed_from_u64(11),
	);
	assert!(out.values().all(|p| p.is_finite()));
}

#[test]
fn test_linear_flow_frontier_sequence() {
	let graph = Graph::build(
		vec![
			Node::new("start", "Start", FlowNodeType::Start),
			Node::new("p1", "Step", FlowNodeType::Process),
			Node::new("end", "End", FlowNodeType::End),
		],
		vec![Edge::new("start", "p1"), Edge::new("p1", "end")],
	);
	let mut anim = TraversalAnimator::new(graph, AnimatorConfig::default());

	anim.start();
	let mut seen = vec![frontier(&anim).into_iter().map(str::to_owned).collect::<Vec<_>>()];
	let mut statuses = Vec::new();
	for _ in 0..3 {
		anim.tick();
		seen.push(frontier(&anim).into_iter().map(str::to_owned).collect());
		statuses.push(anim.status());
	}

	assert_eq!(seen, vec![vec!["start"], vec!["p1"], vec!["end"], vec![]]);
	assert_eq!(
		statuses,
		vec![
			AnimationStatus::Running,
			AnimationStatus::Running,
			AnimationStatus::Completed
		]
	);
}

#[test]
fn test_cyclic_flow_completes_within_bound() {
	let graph = Graph::build(
		vec![
			Node::new("a", "A", FlowNodeType::Start),
			Node::new("b", "B", FlowNodeType::Process),
		],
		vec![Edge::new("a", "b"), Edge::new("b", "a")],
	);
	let mut anim = TraversalAnimator::new(graph, AnimatorConfig::default());
	anim.start();
	for _ in 0..20 {
		anim.tick();
	}
	assert_eq!(anim.status(), AnimationStatus::Completed);
}

#[test]
fn test_zoom_extremes() {
	let mut ctl = InteractionController::default();
	ctl.apply_zoom(1000.0);
	assert_eq!(ctl.transform().scale, 0.5);
	ctl.apply_zoom(-1000.0);
	assert_eq!(ctl.transform().scale, 2.0);
}

#[test]
fn test_select_twice_clears_three_times_reselects() {
	let mut ctl = InteractionController::default();
	ctl.select_node("x");
	ctl.select_node("x");
	assert_eq!(ctl.selected(), None);
	ctl.select_node("x");
	assert_eq!(ctl.selected(), Some("x"));
}

#[test]
fn test_build_drops_edge_to_missing_node() {
	let graph = Graph::build(
		vec![Node::new("a", "A", ConceptCategory::Core)],
		vec![Edge::new("a", "missing"), Edge::new("missing", "a")],
	);
	assert!(graph.edges().is_empty());
	assert_eq!(graph.conditions().len(), 2);
}
