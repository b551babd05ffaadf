//! Pan/zoom transform and selection/hover state.

use std::collections::HashMap;

use super::model::Point;

/// Furthest zoom-out.
pub const MIN_SCALE: f64 = 0.5;
/// Furthest zoom-in.
pub const MAX_SCALE: f64 = 2.0;

/// Pan and zoom applied when mapping graph space to the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal pan in screen pixels.
	pub translate_x: f64,
	/// Vertical pan in screen pixels.
	pub translate_y: f64,
	/// Zoom factor, within `[MIN_SCALE, MAX_SCALE]`.
	pub scale: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			translate_x: 0.0,
			translate_y: 0.0,
			scale: 1.0,
		}
	}
}

/// Zoom tuning.
#[derive(Clone, Debug)]
pub struct InteractionConfig {
	/// Scale change per unit of wheel delta.
	pub zoom_sensitivity: f64,
	/// Lower zoom limit.
	pub min_scale: f64,
	/// Upper zoom limit.
	pub max_scale: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			zoom_sensitivity: 0.001,
			min_scale: MIN_SCALE,
			max_scale: MAX_SCALE,
		}
	}
}

#[derive(Clone, Debug, Default)]
struct PanState {
	active: bool,
	start_x: f64,
	start_y: f64,
	transform_start_x: f64,
	transform_start_y: f64,
}

/// Holds the view transform and the selected/hovered node ids. Every
/// operation is total; nothing here touches the graph.
#[derive(Clone, Debug)]
pub struct InteractionController {
	config: InteractionConfig,
	initial: ViewTransform,
	transform: ViewTransform,
	selected: Option<String>,
	hovered: Option<String>,
	pan: PanState,
}

impl Default for InteractionController {
	fn default() -> Self {
		Self::new(InteractionConfig::default())
	}
}

impl InteractionController {
	/// A configured scale range is narrowed to `[MIN_SCALE, MAX_SCALE]`;
	/// non-finite values fall back to the defaults.
	pub fn new(mut config: InteractionConfig) -> Self {
		let defaults = InteractionConfig::default();
		let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
		config.zoom_sensitivity = finite_or(config.zoom_sensitivity, defaults.zoom_sensitivity);
		config.min_scale = finite_or(config.min_scale, defaults.min_scale);
		config.max_scale = finite_or(config.max_scale, defaults.max_scale);
		config.min_scale = config.min_scale.clamp(MIN_SCALE, MAX_SCALE);
		config.max_scale = config.max_scale.clamp(config.min_scale, MAX_SCALE);
		Self {
			config,
			initial: ViewTransform::default(),
			transform: ViewTransform::default(),
			selected: None,
			hovered: None,
			pan: PanState::default(),
		}
	}

	/// Sets the view that `reset` returns to, and applies it.
	pub fn with_initial(mut self, translate_x: f64, translate_y: f64) -> Self {
		self.initial = ViewTransform {
			translate_x,
			translate_y,
			scale: 1.0,
		};
		self.transform = self.initial;
		self
	}

	/// Current pan and zoom.
	pub fn transform(&self) -> ViewTransform {
		self.transform
	}

	/// Selected node id, if any.
	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// Hovered node id, if any.
	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// Whether `id` is the selected node.
	pub fn is_selected(&self, id: &str) -> bool {
		self.selected.as_deref() == Some(id)
	}

	/// Whether `id` is the hovered node.
	pub fn is_hovered(&self, id: &str) -> bool {
		self.hovered.as_deref() == Some(id)
	}

	/// Positive deltas zoom out. Translation is left alone.
	pub fn apply_zoom(&mut self, delta: f64) {
		if !delta.is_finite() {
			return;
		}
		self.transform.scale = (self.transform.scale - delta * self.config.zoom_sensitivity)
			.clamp(self.config.min_scale, self.config.max_scale);
	}

	/// Selects `id`, or clears the selection if `id` is already selected.
	pub fn select_node(&mut self, id: &str) {
		if self.is_selected(id) {
			self.selected = None;
		} else {
			self.selected = Some(id.to_owned());
		}
	}

	/// Replaces the hover state unconditionally.
	pub fn set_hover(&mut self, id: Option<&str>) {
		self.hovered = id.map(str::to_owned);
	}

	/// Starts a drag-pan at screen point `(x, y)`.
	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.translate_x,
			transform_start_y: self.transform.translate_y,
		};
	}

	/// Moves an active pan so the start point follows the pointer.
	pub fn pan_to(&mut self, x: f64, y: f64) {
		if !self.pan.active {
			return;
		}
		self.transform.translate_x = self.pan.transform_start_x + (x - self.pan.start_x);
		self.transform.translate_y = self.pan.transform_start_y + (y - self.pan.start_y);
	}

	/// Ends the active pan.
	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// True between `begin_pan` and `end_pan`.
	pub fn is_panning(&self) -> bool {
		self.pan.active
	}

	/// Restores the initial view and clears selection and hover.
	pub fn reset(&mut self) {
		self.transform = self.initial;
		self.selected = None;
		self.hovered = None;
		self.pan = PanState::default();
	}

	/// Inverse of the view transform.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Point {
		Point::new(
			(sx - self.transform.translate_x) / self.transform.scale,
			(sy - self.transform.translate_y) / self.transform.scale,
		)
	}
}

/// Topmost node whose circle contains the graph-space point `p`.
///
/// "Topmost" is the last one drawn, i.e. the last in `order`.
pub fn node_at<'a>(
	order: impl IntoIterator<Item = (&'a str, f64)>,
	positions: &HashMap<String, Point>,
	p: Point,
) -> Option<&'a str> {
	let mut found = None;
	for (id, radius) in order {
		let Some(c) = positions.get(id) else {
			continue;
		};
		let (dx, dy) = (c.x - p.x, c.y - p.y);
		if (dx * dx + dy * dy).sqrt() <= radius {
			found = Some(id);
		}
	}
	found
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_zoom_clamps_to_range() {
		let mut ctl = InteractionController::default();
		ctl.apply_zoom(1000.0);
		assert_eq!(ctl.transform().scale, 0.5);
		ctl.apply_zoom(-1000.0);
		assert_eq!(ctl.transform().scale, 2.0);
	}

	#[test]
	fn test_zoom_leaves_translation() {
		let mut ctl = InteractionController::default().with_initial(40.0, -20.0);
		ctl.apply_zoom(-100.0);
		let t = ctl.transform();
		assert!((t.scale - 1.1).abs() < 1e-9);
		assert_eq!((t.translate_x, t.translate_y), (40.0, -20.0));
	}

	#[test]
	fn test_configured_range_cannot_escape_bounds() {
		let mut ctl = InteractionController::new(InteractionConfig {
			zoom_sensitivity: 1.0,
			min_scale: 0.01,
			max_scale: 50.0,
		});
		ctl.apply_zoom(10.0);
		assert_eq!(ctl.transform().scale, MIN_SCALE);
		ctl.apply_zoom(-10.0);
		assert_eq!(ctl.transform().scale, MAX_SCALE);
	}

	#[test]
	fn test_non_finite_config_falls_back() {
		let mut ctl = InteractionController::new(InteractionConfig {
			zoom_sensitivity: f64::INFINITY,
			min_scale: f64::NAN,
			max_scale: f64::NEG_INFINITY,
		});
		ctl.apply_zoom(100.0);
		assert!((ctl.transform().scale - 0.9).abs() < 1e-9);
		ctl.apply_zoom(1000.0);
		assert_eq!(ctl.transform().scale, MIN_SCALE);
		ctl.apply_zoom(-1000.0);
		assert_eq!(ctl.transform().scale, MAX_SCALE);
	}

	#[test]
	fn test_select_toggles() {
		let mut ctl = InteractionController::default();
		ctl.select_node("x");
		assert_eq!(ctl.selected(), Some("x"));
		ctl.select_node("x");
		assert_eq!(ctl.selected(), None);
		ctl.select_node("x");
		assert_eq!(ctl.selected(), Some("x"));
		ctl.select_node("y");
		assert_eq!(ctl.selected(), Some("y"));
	}

	#[test]
	fn test_hover_is_independent_of_selection() {
		let mut ctl = InteractionController::default();
		ctl.select_node("a");
		ctl.set_hover(Some("b"));
		ctl.set_hover(Some("c"));
		assert_eq!(ctl.hovered(), Some("c"));
		assert_eq!(ctl.selected(), Some("a"));
		ctl.set_hover(None);
		assert_eq!(ctl.hovered(), None);
	}

	#[test]
	fn test_pan_and_reset() {
		let mut ctl = InteractionController::default().with_initial(100.0, 100.0);
		ctl.pan_to(50.0, 50.0);
		assert_eq!(ctl.transform().translate_x, 100.0, "pan without begin is ignored");

		ctl.begin_pan(10.0, 10.0);
		ctl.pan_to(30.0, 5.0);
		ctl.end_pan();
		assert_eq!(ctl.transform().translate_x, 120.0);
		assert_eq!(ctl.transform().translate_y, 95.0);

		ctl.select_node("a");
		ctl.reset();
		assert_eq!(ctl.transform(), ViewTransform {
			translate_x: 100.0,
			translate_y: 100.0,
			scale: 1.0,
		});
		assert_eq!(ctl.selected(), None);
	}

	#[test]
	fn test_hit_testing_prefers_last_drawn() {
		let positions = HashMap::from([
			("a".to_string(), Point::new(0.0, 0.0)),
			("b".to_string(), Point::new(10.0, 0.0)),
		]);
		let order = [("a", 30.0), ("b", 30.0)];
		assert_eq!(node_at(order, &positions, Point::new(5.0, 0.0)), Some("b"));
		assert_eq!(node_at(order, &positions, Point::new(200.0, 0.0)), None);
	}
}
