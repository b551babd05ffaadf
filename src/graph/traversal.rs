//! Timed breadth-wise walk over a flow graph.
//!
//! The walk follows every outgoing edge of every frontier node. Decision
//! nodes are not evaluated: both the `yes` and the `no` branch light up on
//! the same step, so the animation shows all paths at once.

use std::collections::BTreeSet;

use log::{debug, info};

use super::condition::Condition;
use super::model::{FlowNodeType, Graph};

/// Lifecycle of one animation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationStatus {
	/// No run.
	#[default]
	Idle,
	/// Ticks are scheduled.
	Running,
	/// The walk ended; no further ticks.
	Completed,
}

/// What the renderer reads to style the flow chart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimationState {
	/// Node ids highlighted on the current step.
	pub frontier: BTreeSet<String>,
	/// Ticks taken since `start`.
	pub step_index: usize,
	/// Run lifecycle.
	pub status: AnimationStatus,
}

/// What a call to [`TraversalAnimator::start`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
	/// A new run began at the start node.
	Started,
	/// A run was active; nothing changed.
	AlreadyRunning,
	/// No start node: the run went straight to `Completed`.
	NoStartNode,
}

/// Timing for [`TraversalAnimator`].
#[derive(Clone, Debug)]
pub struct AnimatorConfig {
	/// Seconds between ticks.
	pub tick_interval: f64,
	/// A run completes on or before this many ticks.
	pub max_steps: usize,
	/// Seconds to hold `Completed` before falling back to `Idle`.
	pub linger: Option<f64>,
}

impl Default for AnimatorConfig {
	fn default() -> Self {
		Self {
			tick_interval: 1.0,
			max_steps: 20,
			linger: Some(1.0),
		}
	}
}

/// The one scheduled tick of a run; dropping it cancels the tick.
#[derive(Clone, Copy, Debug)]
struct PendingTick {
	remaining: f64,
}

/// Owns a flow graph and its single animation run.
pub struct TraversalAnimator {
	graph: Graph<FlowNodeType>,
	config: AnimatorConfig,
	state: AnimationState,
	pending: Option<PendingTick>,
	linger_left: Option<f64>,
}

impl TraversalAnimator {
	/// Idle animator over `graph`.
	pub fn new(graph: Graph<FlowNodeType>, config: AnimatorConfig) -> Self {
		Self {
			graph,
			config,
			state: AnimationState::default(),
			pending: None,
			linger_left: None,
		}
	}

	/// The flow graph being walked.
	pub fn graph(&self) -> &Graph<FlowNodeType> {
		&self.graph
	}

	/// Current run state.
	pub fn state(&self) -> &AnimationState {
		&self.state
	}

	/// Current lifecycle status.
	pub fn status(&self) -> AnimationStatus {
		self.state.status
	}

	/// Nodes highlighted on this step.
	pub fn frontier(&self) -> &BTreeSet<String> {
		&self.state.frontier
	}

	/// Whether `id` is on the frontier.
	pub fn is_highlighted(&self, id: &str) -> bool {
		self.state.frontier.contains(id)
	}

	/// Begins a run from the first start node. Rejected while running.
	pub fn start(&mut self) -> StartOutcome {
		if self.state.status == AnimationStatus::Running {
			debug!("animator: {}", Condition::AnimationAlreadyRunning);
			return StartOutcome::AlreadyRunning;
		}

		let start = self
			.graph
			.nodes()
			.iter()
			.find(|n| n.kind == FlowNodeType::Start)
			.map(|n| n.id.clone());

		let Some(start) = start else {
			debug!("animator: {}", Condition::NoStartNode);
			self.state.step_index = 0;
			self.complete();
			return StartOutcome::NoStartNode;
		};

		info!("animator: run started at {}", start);
		self.state = AnimationState {
			frontier: BTreeSet::from([start]),
			step_index: 0,
			status: AnimationStatus::Running,
		};
		self.linger_left = None;
		self.pending = Some(PendingTick {
			remaining: self.config.tick_interval,
		});
		StartOutcome::Started
	}

	/// Advances the frontier one step. No-op unless running.
	pub fn tick(&mut self) {
		if self.state.status != AnimationStatus::Running {
			return;
		}

		let next: BTreeSet<String> = self
			.state
			.frontier
			.iter()
			.flat_map(|id| self.graph.outgoing(id))
			.map(str::to_owned)
			.collect();

		if next.is_empty() || self.state.step_index + 1 >= self.config.max_steps {
			self.complete();
			return;
		}

		self.state.frontier = next;
		self.state.step_index += 1;
		debug!(
			"animator: step {} frontier {:?}",
			self.state.step_index, self.state.frontier
		);
	}

	/// Cancels any pending tick and returns to `Idle`.
	pub fn stop(&mut self) {
		self.pending = None;
		self.linger_left = None;
		self.state = AnimationState::default();
	}

	/// Feeds elapsed wall-clock seconds from the host loop, firing one tick
	/// per `tick_interval` and the post-completion reset once `linger` runs out.
	pub fn advance(&mut self, dt: f64) {
		let mut budget = dt.max(0.0);

		while self.state.status == AnimationStatus::Running {
			let interval = self.config.tick_interval;
			let Some(pending) = self.pending.as_mut() else {
				break;
			};
			if pending.remaining > budget {
				pending.remaining -= budget;
				return;
			}
			budget -= pending.remaining;
			pending.remaining = interval;
			self.tick();
		}

		if self.state.status == AnimationStatus::Completed {
			if let Some(left) = self.linger_left.as_mut() {
				*left -= budget;
				if *left <= 0.0 {
					self.stop();
				}
			}
		}
	}

	fn complete(&mut self) {
		info!("animator: run completed after {} steps", self.state.step_index);
		self.pending = None;
		self.linger_left = self.config.linger;
		self.state.frontier.clear();
		self.state.status = AnimationStatus::Completed;
	}
}
