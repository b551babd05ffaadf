use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ConceptMapState;
use crate::graph::NodeKind;

pub fn render(state: &ConceptMapState, ctx: &CanvasRenderingContext2d) {
	let t = state.view.transform();
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(t.translate_x, t.translate_y);
	let _ = ctx.scale(t.scale, t.scale);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ConceptMapState, ctx: &CanvasRenderingContext2d) {
	let k = state.view.transform().scale;
	let dim = state.has_active_highlight();

	for edge in state.graph.edges() {
		let (Some(a), Some(b)) = (
			state.positions.get(&edge.source),
			state.positions.get(&edge.target),
		) else {
			continue;
		};

		let lit = state.is_highlighted(&edge.source) && state.is_highlighted(&edge.target);
		let alpha = match (dim, lit) {
			(false, _) => 0.6,
			(true, true) => 0.9,
			(true, false) => 0.15,
		};
		ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {})", alpha));
		ctx.set_line_width(1.5 / k);
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();

		if let Some(label) = &edge.label {
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha));
			ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
			let _ = ctx.fill_text(label, (a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
		}
	}
}

fn draw_nodes(state: &ConceptMapState, ctx: &CanvasRenderingContext2d) {
	let k = state.view.transform().scale;
	let dim = state.has_active_highlight();

	for node in state.graph.nodes() {
		let Some(p) = state.positions.get(&node.id) else {
			continue;
		};
		let alpha = if dim && !state.is_highlighted(&node.id) {
			0.3
		} else {
			1.0
		};

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, node.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.kind.color());
		ctx.fill();

		if state.view.is_selected(&node.id) {
			ctx.set_stroke_style_str("white");
			ctx.set_line_width(2.0 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		ctx.set_text_align("center");
		ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
		let _ = ctx.fill_text(&node.label, p.x, p.y + 4.0);
		ctx.set_global_alpha(1.0);
	}
}
