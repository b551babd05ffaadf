use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{MouseEvent, WheelEvent};

use super::render;
use super::state::FlowChartState;
use crate::components::canvas::{context_2d, fit_canvas, local_point, random_seed};
use crate::components::types::GraphData;
use crate::graph::{AnimationStatus, FlowNodeType, StartOutcome};

/// Flow chart with a Run/Stop control that animates a walk from the start
/// node, one step per second.
#[component]
pub fn FlowChartCanvas(
	#[prop(into)] data: Signal<GraphData<FlowNodeType>>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<FlowChartState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (status, set_status) = signal(AnimationStatus::Idle);
	let (state_init, animate_init) = (state.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (w, h) = fit_canvas(&canvas, width, height);
		*state_init.borrow_mut() = Some(FlowChartState::new(data.get(), w, h, random_seed()));

		if animate_init.borrow().is_some() {
			return;
		}
		let Some(ctx) = context_2d(&canvas) else {
			log::warn!("flow chart: canvas has no 2d context");
			return;
		};

		let (state_weak, animate_inner) = (Rc::downgrade(&state_init), animate_init.clone());
		let mut last = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			// Widget torn down: dropping its state already stopped the run.
			let Some(state) = state_weak.upgrade() else {
				return;
			};
			let now = js_sys::Date::now();
			let dt = (now - last) / 1000.0;
			last = now;

			if let Some(ref mut s) = *state.borrow_mut() {
				s.tick(dt);
				let current = s.animator.status();
				if status.get_untracked() != current {
					set_status.set(current);
				}
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

	let state_run = state.clone();
	let on_run = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_run.borrow_mut() {
			if s.run() == StartOutcome::NoStartNode {
				log::info!("flow chart: nothing to run");
			}
		}
	};

	let state_stop = state.clone();
	let on_stop = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_stop.borrow_mut() {
			s.stop();
		}
	};

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
				s.view.set_hover(hovered.as_deref());
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
			s.view.set_hover(None);
		}
	};

	let state_wh = state;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.view.apply_zoom(ev.delta_y());
		}
	};

	view! {
		<div class="flow-chart">
			<div class="flow-chart-controls">
				<button
					on:click=on_run
					disabled=move || status.get() == AnimationStatus::Running
				>
					"Run"
				</button>
				<button on:click=on_stop>"Stop"</button>
				<span class="flow-chart-status">{move || format!("{:?}", status.get())}</span>
			</div>
			<canvas
				node_ref=canvas_ref
				class="flow-chart-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
		</div>
	}
}
