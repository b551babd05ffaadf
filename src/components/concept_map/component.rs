use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{MouseEvent, WheelEvent};

use super::render;
use super::state::ConceptMapState;
use crate::components::canvas::{context_2d, fit_canvas, local_point, random_seed};
use crate::components::types::GraphData;
use crate::graph::ConceptCategory;

/// Force-laid-out concept map. The layout runs once per `data` change;
/// hover highlights neighbors, click toggles selection, wheel zooms and
/// dragging the background pans.
#[component]
pub fn ConceptMapCanvas(
	#[prop(into)] data: Signal<GraphData<ConceptCategory>>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ConceptMapState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (w, h) = fit_canvas(&canvas, width, height);
		*state_init.borrow_mut() = Some(ConceptMapState::new(data.get(), w, h, random_seed()));

		// The frame loop outlives data changes; start it once.
		if animate_init.borrow().is_some() {
			return;
		}
		let Some(ctx) = context_2d(&canvas) else {
			log::warn!("concept map: canvas has no 2d context");
			return;
		};

		let (state_weak, animate_inner) = (Rc::downgrade(&state_init), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			// Widget torn down: stop scheduling frames.
			let Some(state) = state_weak.upgrade() else {
				return;
			};
			if let Some(ref s) = *state.borrow() {
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(cb), Some(win)) = (&*animate_init.borrow(), web_sys::window()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			match s.node_at_position(x, y) {
				Some(id) => s.view.select_node(&id),
				None => s.view.begin_pan(x, y),
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.view.is_panning() {
				s.view.pan_to(x, y);
			} else {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.view.end_pan();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.view.end_pan();
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.view.apply_zoom(ev.delta_y());
		}
	};

	let state_dc = state;
	let on_dblclick = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_dc.borrow_mut() {
			s.view.reset();
			s.neighbors.clear();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="concept-map-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:dblclick=on_dblclick
			style="display: block; cursor: grab;"
		/>
	}
}
