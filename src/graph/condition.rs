use std::fmt;

/// Recoverable conditions the engine runs into.
///
/// None of these are returned as errors: each is resolved locally, logged,
/// and where useful recorded on the value that observed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
	/// An edge named a node id that is not in the graph; the edge was dropped.
	DanglingEdgeReference {
		/// Tail id as given.
		source: String,
		/// Head id as given.
		target: String,
	},
	/// Two input nodes shared an id; the later one replaced the earlier.
	DuplicateNodeId(String),
	/// Layout or animation was asked to run over zero nodes.
	EmptyGraph,
	/// Two nodes sat on the same point during repulsion.
	DegenerateDistance {
		/// First node of the pair.
		a: String,
		/// Second node of the pair.
		b: String,
	},
	/// `start()` was called while a run was active; the call was ignored.
	AnimationAlreadyRunning,
	/// The flow graph has no start node; the run completed immediately.
	NoStartNode,
}

impl fmt::Display for Condition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Condition::DanglingEdgeReference { source, target } => {
				write!(f, "dropped edge {} -> {}: unknown node id", source, target)
			}
			Condition::DuplicateNodeId(id) => {
				write!(f, "duplicate node id {}, keeping the last definition", id)
			}
			Condition::EmptyGraph => write!(f, "graph has no nodes"),
			Condition::DegenerateDistance { a, b } => {
				write!(f, "nodes {} and {} overlap exactly", a, b)
			}
			Condition::AnimationAlreadyRunning => {
				write!(f, "animation already running, start ignored")
			}
			Condition::NoStartNode => write!(f, "flow graph has no start node"),
		}
	}
}
