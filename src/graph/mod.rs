//! Graph-visualization engine: data model, force layout, traversal
//! animation and view interaction. No web dependencies live here.

mod condition;
mod interaction;
mod layout;
mod model;
mod traversal;

pub use condition::Condition;
pub use interaction::{
	InteractionConfig, InteractionController, MAX_SCALE, MIN_SCALE, ViewTransform, node_at,
};
pub use layout::{LayoutParams, Positions, layout};
pub use model::{
	Bounds, ConceptCategory, DEFAULT_RADIUS, Edge, FlowNodeType, Graph, Node, NodeKind, PathHint,
	Point, Shape,
};
pub use traversal::{
	AnimationState, AnimationStatus, AnimatorConfig, StartOutcome, TraversalAnimator,
};
