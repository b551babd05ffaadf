//! Iterative force-directed layout.
//!
//! All-pairs repulsion makes each iteration O(n²). That is fine for the
//! few dozen nodes a concept map carries; large graphs would need spatial
//! partitioning, which this solver does not attempt.

use std::collections::HashMap;

use log::debug;
use rand::Rng;

use super::condition::Condition;
use super::model::{Bounds, Graph, Point};

/// Final position of every node, keyed by node id.
pub type Positions = HashMap<String, Point>;

/// Solver constants.
#[derive(Clone, Debug)]
pub struct LayoutParams {
	/// Fixed number of solver rounds.
	pub iterations: usize,
	/// Numerator of the inverse-square push between overlapping nodes.
	pub repulsion: f64,
	/// Linear spring factor pulling edge endpoints together.
	pub attraction: f64,
	/// Distance substituted for coincident nodes.
	pub epsilon: f64,
	/// Cap on a single repulsion push. Unbounded by default.
	pub max_force: f64,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			iterations: 50,
			repulsion: 800.0,
			attraction: 0.01,
			epsilon: 0.01,
			max_force: f64::INFINITY,
		}
	}
}

/// Computes a position for every node of `graph` inside `bounds`.
///
/// Nodes without an initial position are seeded uniformly in the central
/// 80% of the canvas from `rng`. Runs exactly `params.iterations` rounds of
/// repulsion, attraction and containment; there is no convergence check.
pub fn layout<K, R>(graph: &Graph<K>, bounds: Bounds, params: &LayoutParams, rng: &mut R) -> Positions
where
	R: Rng + ?Sized,
{
	// Fields are public; re-sanitize in case the caller skipped `Bounds::new`.
	let bounds = Bounds::new(bounds.width, bounds.height);
	if graph.is_empty() {
		debug!("layout: {}", Condition::EmptyGraph);
		return Positions::new();
	}

	let nodes = graph.nodes();
	let radii: Vec<f64> = nodes.iter().map(|n| n.radius.max(0.0)).collect();
	let mut pos: Vec<Point> = nodes
		.iter()
		.map(|n| match n.position {
			Some(p) if p.is_finite() => p,
			_ => seed(bounds, rng),
		})
		.collect();
	contain(&mut pos, &radii, bounds);

	let index: HashMap<&str, usize> = nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (n.id.as_str(), i))
		.collect();
	let springs: Vec<(usize, usize)> = graph
		.edges()
		.iter()
		.filter_map(|e| Some((*index.get(e.source.as_str())?, *index.get(e.target.as_str())?)))
		.filter(|(a, b)| a != b)
		.collect();

	let mut reported_overlap = false;
	for _ in 0..params.iterations {
		for i in 0..pos.len() {
			for j in (i + 1)..pos.len() {
				let (mut dx, mut dy) = (pos[j].x - pos[i].x, pos[j].y - pos[i].y);
				let mut d = (dx * dx + dy * dy).sqrt();
				if d < params.epsilon {
					if !reported_overlap {
						debug!(
							"layout: {}",
							Condition::DegenerateDistance {
								a: nodes[i].id.clone(),
								b: nodes[j].id.clone(),
							}
						);
						reported_overlap = true;
					}
					// Separate along x so coincident nodes get a direction.
					(dx, dy, d) = (params.epsilon, 0.0, params.epsilon);
				}
				if d >= radii[i] + radii[j] {
					continue;
				}

				let force = (params.repulsion / (d * d)).min(params.max_force);
				let (fx, fy) = (dx / d * force, dy / d * force);
				pos[i].x -= fx;
				pos[i].y -= fy;
				pos[j].x += fx;
				pos[j].y += fy;
			}
		}

		for &(a, b) in &springs {
			let (fx, fy) = (
				(pos[b].x - pos[a].x) * params.attraction,
				(pos[b].y - pos[a].y) * params.attraction,
			);
			pos[a].x += fx;
			pos[a].y += fy;
			pos[b].x -= fx;
			pos[b].y -= fy;
		}

		contain(&mut pos, &radii, bounds);
	}

	nodes.iter().map(|n| n.id.clone()).zip(pos).collect()
}

fn seed<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Point {
	let x = bounds.width * (0.1 + 0.8 * rng.random::<f64>());
	let y = bounds.height * (0.1 + 0.8 * rng.random::<f64>());
	Point::new(x, y)
}

fn contain(pos: &mut [Point], radii: &[f64], bounds: Bounds) {
	for (p, &r) in pos.iter_mut().zip(radii) {
		p.x = clamp_axis(p.x, r, bounds.width);
		p.y = clamp_axis(p.y, r, bounds.height);
	}
}

/// Clamps to `[r, extent - r]`, centering when that interval is empty.
fn clamp_axis(v: f64, r: f64, extent: f64) -> f64 {
	if extent < 2.0 * r || !v.is_finite() {
		extent / 2.0
	} else {
		v.clamp(r, extent - r)
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::graph::model::{ConceptCategory, Edge, Node};

	fn node(id: &str) -> Node<ConceptCategory> {
		Node::new(id, id, ConceptCategory::Concept)
	}

	#[test]
	fn test_empty_graph_returns_empty_map() {
		let graph = Graph::<ConceptCategory>::build(vec![], vec![]);
		let mut rng = StdRng::seed_from_u64(1);
		let out = layout(&graph, Bounds::new(800.0, 600.0), &LayoutParams::default(), &mut rng);
		assert!(out.is_empty());
	}

	#[test]
	fn test_coincident_nodes_stay_finite_and_separate() {
		let graph = Graph::build(
			vec![node("a").at(100.0, 100.0), node("b").at(100.0, 100.0)],
			vec![],
		);
		let mut rng = StdRng::seed_from_u64(7);
		let out = layout(&graph, Bounds::new(400.0, 400.0), &LayoutParams::default(), &mut rng);

		let (a, b) = (out["a"], out["b"]);
		assert!(a.is_finite() && b.is_finite());
		assert!((a.x - b.x).abs() > 1.0, "coincident nodes should be pushed apart");
	}

	#[test]
	fn test_edge_pulls_endpoints_together() {
		let graph = Graph::build(
			vec![node("a").at(100.0, 300.0), node("b").at(500.0, 300.0)],
			vec![Edge::new("a", "b")],
		);
		let mut rng = StdRng::seed_from_u64(3);
		let out = layout(&graph, Bounds::new(600.0, 600.0), &LayoutParams::default(), &mut rng);

		let d = (out["b"].x - out["a"].x).abs();
		assert!(d < 400.0, "distance {} should shrink", d);
	}

	#[test]
	fn test_same_seed_same_layout() {
		let nodes: Vec<_> = (0..8).map(|i| node(&i.to_string())).collect();
		let edges: Vec<_> = (1..8).map(|i| Edge::new(i.to_string(), "0")).collect();
		let graph = Graph::build(nodes, edges);
		let bounds = Bounds::new(800.0, 600.0);
		let params = LayoutParams::default();

		let first = layout(&graph, bounds, &params, &mut StdRng::seed_from_u64(42));
		let second = layout(&graph, bounds, &params, &mut StdRng::seed_from_u64(42));
		assert_eq!(first, second);
	}

	#[test]
	fn test_zero_iterations_still_contained() {
		let graph = Graph::build(vec![node("a").at(-50.0, 10_000.0)], vec![]);
		let params = LayoutParams {
			iterations: 0,
			..LayoutParams::default()
		};
		let out = layout(&graph, Bounds::new(200.0, 200.0), &params, &mut StdRng::seed_from_u64(0));
		assert_eq!(out["a"], Point::new(30.0, 170.0));
	}

	#[test]
	fn test_non_finite_bounds_stay_finite() {
		let graph = Graph::build(vec![node("a"), node("b").at(50.0, 50.0)], vec![]);
		for bounds in [
			Bounds {
				width: f64::NAN,
				height: 100.0,
			},
			Bounds {
				width: f64::INFINITY,
				height: -5.0,
			},
		] {
			let out = layout(&graph, bounds, &LayoutParams::default(), &mut StdRng::seed_from_u64(2));
			assert_eq!(out.len(), 2);
			assert!(out.values().all(|p| p.is_finite()), "{:?} gave {:?}", bounds, out);
		}
	}

	#[test]
	fn test_repulsion_follows_inverse_square_uncapped() {
		let graph = Graph::build(vec![node("a").at(300.0, 300.0), node("b").at(302.0, 300.0)], vec![]);
		let params = LayoutParams {
			iterations: 1,
			..LayoutParams::default()
		};
		let out = layout(&graph, Bounds::new(1000.0, 1000.0), &params, &mut StdRng::seed_from_u64(0));
		// 800 / 2² = 200 per node
		assert_eq!(out["a"].x, 100.0);
		assert_eq!(out["b"].x, 502.0);
	}

	#[test]
	fn test_max_force_caps_push() {
		let graph = Graph::build(vec![node("a").at(300.0, 300.0), node("b").at(302.0, 300.0)], vec![]);
		let params = LayoutParams {
			iterations: 1,
			max_force: 100.0,
			..LayoutParams::default()
		};
		let out = layout(&graph, Bounds::new(1000.0, 1000.0), &params, &mut StdRng::seed_from_u64(0));
		assert_eq!(out["a"].x, 200.0);
		assert_eq!(out["b"].x, 402.0);
	}

	#[test]
	fn test_canvas_smaller_than_node_centers_it() {
		let graph = Graph::build(vec![node("a")], vec![]);
		let mut rng = StdRng::seed_from_u64(9);
		let out = layout(&graph, Bounds::new(40.0, 500.0), &LayoutParams::default(), &mut rng);
		assert_eq!(out["a"].x, 20.0);
		assert!(out["a"].y >= 30.0 && out["a"].y <= 470.0);
	}
}
