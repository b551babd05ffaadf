use web_sys::CanvasRenderingContext2d;

use super::state::FlowChartState;
use crate::graph::{NodeKind, PathHint, Point, Shape};

const ACTIVE: &str = "#ffd166";

pub fn render(state: &FlowChartState, ctx: &CanvasRenderingContext2d) {
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

fn draw_edges(state: &FlowChartState, ctx: &CanvasRenderingContext2d) {
	let k = state.view.transform().scale;
	let arrow = 8.0 / k;
	let graph = state.animator.graph();

	for edge in graph.edges() {
		let (Some(a), Some(b)) = (
			state.positions.get(&edge.source),
			state.positions.get(&edge.target),
		) else {
			continue;
		};
		let (dx, dy) = (b.x - a.x, b.y - a.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let stop = graph.node(&edge.target).map_or(0.0, |n| n.radius);
		let (ux, uy) = (dx / dist, dy / dist);
		let tip = Point::new(b.x - ux * stop, b.y - uy * stop);

		let lit = state.animator.is_highlighted(&edge.target);
		let color = if lit { ACTIVE } else { "rgba(100, 180, 255, 0.7)" };
		ctx.set_stroke_style_str(color);
		ctx.set_fill_style_str(color);
		ctx.set_line_width(1.5 / k);

		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(tip.x - ux * arrow, tip.y - uy * arrow);
		ctx.stroke();

		let (px, py) = (-uy * arrow * 0.5, ux * arrow * 0.5);
		let (back_x, back_y) = (tip.x - ux * arrow, tip.y - uy * arrow);
		ctx.begin_path();
		ctx.move_to(tip.x, tip.y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		let label = match (edge.label.as_deref(), edge.path_hint) {
			(Some(label), _) => Some(label),
			(None, Some(PathHint::Yes)) => Some("yes"),
			(None, Some(PathHint::No)) => Some("no"),
			(None, None) => None,
		};
		if let Some(label) = label {
			ctx.set_fill_style_str("white");
			ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
			let _ = ctx.fill_text(label, (a.x + b.x) / 2.0 + 4.0, (a.y + b.y) / 2.0);
		}
	}
}

fn draw_nodes(state: &FlowChartState, ctx: &CanvasRenderingContext2d) {
	let k = state.view.transform().scale;

	for node in state.animator.graph().nodes() {
		let Some(p) = state.positions.get(&node.id) else {
			continue;
		};
		let (hw, hh) = (node.radius * 1.6, node.radius * 0.7);

		trace_shape(ctx, node.kind.shape(), *p, hw, hh);
		ctx.set_fill_style_str(node.kind.color());
		ctx.fill();

		if state.animator.is_highlighted(&node.id) {
			ctx.set_stroke_style_str(ACTIVE);
			ctx.set_line_width(4.0 / k);
			ctx.stroke();
		} else if state.view.is_hovered(&node.id) {
			ctx.set_stroke_style_str("white");
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		ctx.set_text_align("center");
		ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
		let _ = ctx.fill_text(&node.label, p.x, p.y + 4.0);
	}
}

fn trace_shape(ctx: &CanvasRenderingContext2d, shape: Shape, p: Point, hw: f64, hh: f64) {
	ctx.begin_path();
	match shape {
		Shape::Rect => ctx.rect(p.x - hw, p.y - hh, 2.0 * hw, 2.0 * hh),
		Shape::Rounded => {
			let r = hh;
			ctx.move_to(p.x - hw + r, p.y - hh);
			ctx.line_to(p.x + hw - r, p.y - hh);
			let _ = ctx.arc_to(p.x + hw, p.y - hh, p.x + hw, p.y + hh, r);
			let _ = ctx.arc_to(p.x + hw, p.y + hh, p.x - hw, p.y + hh, r);
			let _ = ctx.arc_to(p.x - hw, p.y + hh, p.x - hw, p.y - hh, r);
			let _ = ctx.arc_to(p.x - hw, p.y - hh, p.x + hw, p.y - hh, r);
		}
		Shape::Diamond => {
			ctx.move_to(p.x, p.y - hh * 1.4);
			ctx.line_to(p.x + hw, p.y);
			ctx.line_to(p.x, p.y + hh * 1.4);
			ctx.line_to(p.x - hw, p.y);
		}
		Shape::Parallelogram => {
			let skew = hh * 0.6;
			ctx.move_to(p.x - hw + skew, p.y - hh);
			ctx.line_to(p.x + hw + skew, p.y - hh);
			ctx.line_to(p.x + hw - skew, p.y + hh);
			ctx.line_to(p.x - hw - skew, p.y + hh);
		}
	}
	ctx.close_path();
}
