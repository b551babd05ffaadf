//! Node/edge data model and graph construction.

use std::collections::{HashMap, HashSet};

use log::warn;

use super::condition::Condition;

/// Radius used for nodes that do not set their own.
pub const DEFAULT_RADIUS: f64 = 30.0;

/// A point in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Neither coordinate is NaN or infinite.
	pub fn is_finite(&self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

/// Canvas extent for layout and animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Canvas width in graph units.
	pub width: f64,
	/// Canvas height in graph units.
	pub height: f64,
}

impl Bounds {
	/// Negative or non-finite extents collapse to zero.
	pub fn new(width: f64, height: f64) -> Self {
		let sane = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
		Self {
			width: sane(width),
			height: sane(height),
		}
	}

	/// Whether a circle of `radius` at `p` lies fully inside the bounds.
	pub fn contains(&self, p: Point, radius: f64) -> bool {
		let axis = |v: f64, extent: f64| {
			if extent < 2.0 * radius {
				v == extent / 2.0
			} else {
				v >= radius && v <= extent - radius
			}
		};
		axis(p.x, self.width) && axis(p.y, self.height)
	}
}

/// Tag carried by every node; only affects presentation, except where an
/// engine component says otherwise.
pub trait NodeKind: Clone + std::fmt::Debug {
	/// Fill color used by the renderer.
	fn color(&self) -> &'static str;
}

/// Node tag for the concept map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConceptCategory {
	/// The lesson's central idea.
	Core,
	/// A supporting idea.
	#[default]
	Concept,
	/// A concrete example.
	Example,
	/// An adjacent topic.
	Related,
}

impl NodeKind for ConceptCategory {
	fn color(&self) -> &'static str {
		match self {
			ConceptCategory::Core => "#1f77b4",
			ConceptCategory::Concept => "#2ca02c",
			ConceptCategory::Example => "#ff7f0e",
			ConceptCategory::Related => "#9467bd",
		}
	}
}

/// Outline a flow-chart node is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
	/// Pill, for terminals.
	Rounded,
	/// Plain box.
	Rect,
	/// Branch point.
	Diamond,
	/// Input/output.
	Parallelogram,
}

/// Node tag for the flow chart. `Start` seeds the traversal animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlowNodeType {
	/// Entry point of the flow.
	Start,
	/// Terminal step.
	End,
	/// Ordinary statement.
	#[default]
	Process,
	/// Branch whose outgoing edges carry yes/no hints.
	Decision,
	/// Reads a value.
	Input,
	/// Writes a value.
	Output,
}

impl FlowNodeType {
	/// Outline for this node type.
	pub fn shape(&self) -> Shape {
		match self {
			FlowNodeType::Start | FlowNodeType::End => Shape::Rounded,
			FlowNodeType::Process => Shape::Rect,
			FlowNodeType::Decision => Shape::Diamond,
			FlowNodeType::Input | FlowNodeType::Output => Shape::Parallelogram,
		}
	}
}

impl NodeKind for FlowNodeType {
	fn color(&self) -> &'static str {
		match self {
			FlowNodeType::Start => "#2ca02c",
			FlowNodeType::End => "#d62728",
			FlowNodeType::Process => "#1f77b4",
			FlowNodeType::Decision => "#bcbd22",
			FlowNodeType::Input | FlowNodeType::Output => "#17becf",
		}
	}
}

/// A graph node tagged with a kind `K`.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<K> {
	/// Unique within a graph.
	pub id: String,
	/// Display text.
	pub label: String,
	/// Color/shape tag.
	pub kind: K,
	/// Initial position; nodes without one are seeded by the layout.
	pub position: Option<Point>,
	/// Collision and hit-test radius.
	pub radius: f64,
}

impl<K> Node<K> {
	/// Unpositioned node with [`DEFAULT_RADIUS`].
	pub fn new(id: impl Into<String>, label: impl Into<String>, kind: K) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			kind,
			position: None,
			radius: DEFAULT_RADIUS,
		}
	}

	/// Sets the initial position.
	pub fn at(mut self, x: f64, y: f64) -> Self {
		self.position = Some(Point::new(x, y));
		self
	}

	/// Overrides the default radius.
	pub fn with_radius(mut self, radius: f64) -> Self {
		self.radius = radius;
		self
	}
}

/// Cosmetic branch tag on edges leaving a decision node. Never consulted
/// by the traversal animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathHint {
	/// Condition held.
	Yes,
	/// Condition failed.
	No,
}

/// A directed link between two node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Id of the tail node.
	pub source: String,
	/// Id of the head node.
	pub target: String,
	/// Text drawn at the midpoint.
	pub label: Option<String>,
	/// Branch tag, for edges leaving a decision.
	pub path_hint: Option<PathHint>,
}

impl Edge {
	/// Unlabeled edge `source -> target`.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			label: None,
			path_hint: None,
		}
	}

	/// Sets the midpoint label.
	pub fn labeled(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Sets the branch tag.
	pub fn hint(mut self, hint: PathHint) -> Self {
		self.path_hint = Some(hint);
		self
	}
}

/// Validated, immutable node/edge set. Every stored edge references live
/// nodes on both ends.
#[derive(Clone, Debug)]
pub struct Graph<K> {
	nodes: Vec<Node<K>>,
	index: HashMap<String, usize>,
	edges: Vec<Edge>,
	conditions: Vec<Condition>,
}

impl<K: NodeKind> Graph<K> {
	/// Builds a graph from host input.
	///
	/// Duplicate ids are resolved last-write-wins, keeping the slot of the
	/// first occurrence. Edges naming an unknown id are dropped.
	pub fn build(
		nodes: impl IntoIterator<Item = Node<K>>,
		edges: impl IntoIterator<Item = Edge>,
	) -> Self {
		let mut graph = Self {
			nodes: Vec::new(),
			index: HashMap::new(),
			edges: Vec::new(),
			conditions: Vec::new(),
		};

		for node in nodes {
			match graph.index.get(&node.id) {
				Some(&slot) => {
					let condition = Condition::DuplicateNodeId(node.id.clone());
					warn!("{}", condition);
					graph.conditions.push(condition);
					graph.nodes[slot] = node;
				}
				None => {
					graph.index.insert(node.id.clone(), graph.nodes.len());
					graph.nodes.push(node);
				}
			}
		}

		for edge in edges {
			if graph.index.contains_key(&edge.source) && graph.index.contains_key(&edge.target) {
				graph.edges.push(edge);
			} else {
				let condition = Condition::DanglingEdgeReference {
					source: edge.source,
					target: edge.target,
				};
				warn!("{}", condition);
				graph.conditions.push(condition);
			}
		}

		graph
	}
}

impl<K> Graph<K> {
	/// Node with the given id.
	pub fn node(&self, id: &str) -> Option<&Node<K>> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// Nodes in first-insertion order.
	pub fn nodes(&self) -> &[Node<K>] {
		&self.nodes
	}

	/// Surviving edges in input order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True when there are no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Whether a node with `id` exists.
	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// What `build` recovered from, in the order it was seen.
	pub fn conditions(&self) -> &[Condition] {
		&self.conditions
	}

	/// Targets of the edges leaving `id`, in edge order.
	pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
		self.edges
			.iter()
			.filter(move |e| e.source == id)
			.map(|e| e.target.as_str())
	}

	/// Nodes sharing an edge with `id` in either direction.
	pub fn neighbors(&self, id: &str) -> HashSet<String> {
		let mut out = HashSet::new();
		for edge in &self.edges {
			if edge.source == id {
				out.insert(edge.target.clone());
			} else if edge.target == id {
				out.insert(edge.source.clone());
			}
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn concept(id: &str) -> Node<ConceptCategory> {
		Node::new(id, id.to_uppercase(), ConceptCategory::Concept)
	}

	#[test]
	fn test_dangling_edge_is_dropped() {
		let graph = Graph::build(
			vec![concept("a"), concept("b")],
			vec![Edge::new("a", "b"), Edge::new("a", "ghost")],
		);

		assert_eq!(graph.edges().len(), 1);
		assert_eq!(graph.edges()[0].target, "b");
		assert_eq!(
			graph.conditions(),
			&[Condition::DanglingEdgeReference {
				source: "a".into(),
				target: "ghost".into(),
			}]
		);
	}

	#[test]
	fn test_duplicate_id_last_write_wins() {
		let graph = Graph::build(
			vec![
				concept("a"),
				concept("b"),
				Node::new("a", "Second", ConceptCategory::Core),
			],
			vec![],
		);

		assert_eq!(graph.len(), 2);
		let a = graph.node("a").unwrap();
		assert_eq!(a.label, "Second");
		assert_eq!(a.kind, ConceptCategory::Core);
		// keeps its original slot
		assert_eq!(graph.nodes()[0].id, "a");
	}

	#[test]
	fn test_neighbors_are_undirected() {
		let graph = Graph::build(
			vec![concept("a"), concept("b"), concept("c")],
			vec![Edge::new("a", "b"), Edge::new("c", "a")],
		);

		let n = graph.neighbors("a");
		assert!(n.contains("b"));
		assert!(n.contains("c"));
		assert_eq!(graph.outgoing("a").collect::<Vec<_>>(), vec!["b"]);
	}

	#[test]
	fn test_bounds_sanitize_negative_extent() {
		let b = Bounds::new(-10.0, f64::NAN);
		assert_eq!(b.width, 0.0);
		assert_eq!(b.height, 0.0);
	}

	#[test]
	fn test_flow_shapes() {
		assert_eq!(FlowNodeType::Decision.shape(), Shape::Diamond);
		assert_eq!(FlowNodeType::Start.shape(), Shape::Rounded);
	}
}
