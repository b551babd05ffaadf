use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::components::types::GraphData;
use crate::graph::{
	AnimatorConfig, Bounds, FlowNodeType, InteractionController, LayoutParams, Positions,
	StartOutcome, TraversalAnimator, layout, node_at,
};

pub struct FlowChartState {
	pub animator: TraversalAnimator,
	pub positions: Positions,
	pub view: InteractionController,
	pub width: f64,
	pub height: f64,
}

impl FlowChartState {
	/// Flow nodes keep the positions the host gave them; only nodes missing
	/// one are scattered by `seed`. Nothing is simulated.
	pub fn new(data: GraphData<FlowNodeType>, width: f64, height: f64, seed: u64) -> Self {
		let graph = data.into_graph();
		let fixed = LayoutParams {
			iterations: 0,
			..LayoutParams::default()
		};
		let positions = layout(
			&graph,
			Bounds::new(width, height),
			&fixed,
			&mut StdRng::seed_from_u64(seed),
		);
		info!("flow chart: {} steps, {} links", graph.len(), graph.edges().len());

		Self {
			animator: TraversalAnimator::new(graph, AnimatorConfig::default()),
			positions,
			view: InteractionController::default(),
			width,
			height,
		}
	}

	pub fn run(&mut self) -> StartOutcome {
		self.animator.start()
	}

	pub fn stop(&mut self) {
		self.animator.stop();
	}

	/// Called once per frame with the frame duration in seconds.
	pub fn tick(&mut self, dt: f64) {
		self.animator.advance(dt);
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let p = self.view.screen_to_graph(sx, sy);
		let order = self
			.animator
			.graph()
			.nodes()
			.iter()
			.map(|n| (n.id.as_str(), n.radius));
		node_at(order, &self.positions, p).map(str::to_owned)
	}
}

impl Drop for FlowChartState {
	fn drop(&mut self) {
		debug!("flow chart: torn down, stopping animation");
		self.animator.stop();
	}
}
