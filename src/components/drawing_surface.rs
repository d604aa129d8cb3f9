use super::use_pointer_event;
use crate::binder::BindOptions;
use crate::engine::{CaptureHost, EngineConfig, PointerId, RenderModel, StrokeColor, StrokeEngine};
use crate::util::{surface_target, JsError, ResultExt, SurfaceCoordinates};
use leptos::*;

const STROKE_WIDTH: &str = "3";

/// Captures pointers on the surface element once it is mounted.
#[derive(Clone, Copy)]
struct SurfaceCapture(NodeRef<html::Div>);

impl CaptureHost for SurfaceCapture {
	fn capture_pointer(&self, pointer_id: PointerId) -> bool {
		let Some(element) = self.0.get_untracked() else {
			return false;
		};
		let element: &web_sys::Element = &element;
		element
			.set_pointer_capture(pointer_id)
			.map_err(JsError::from)
			.ok_or_log()
			.is_some()
	}
}

#[component]
pub fn DrawingSurface(
	/// Color of new strokes. Defaults to `config.default_color`.
	#[prop(optional, into)]
	color: Option<MaybeSignal<StrokeColor>>,
	#[prop(optional)] config: Option<EngineConfig>,
) -> impl IntoView {
	let config = config.unwrap_or_default();
	let color = color.unwrap_or_else(|| MaybeSignal::Static(config.default_color.clone()));
	let filter = BindOptions::builder()
		.maybe_pointer_type(config.pointer_type)
		.build();

	let node_ref = create_node_ref::<html::Div>();
	let render_model = create_rw_signal(RenderModel::default());
	let is_drawing = Signal::derive(move || render_model.with(|model| model.in_progress().is_some()));

	let engine = {
		let mut engine = StrokeEngine::new(SurfaceCapture(node_ref), config);
		engine.subscribe(move |model: &RenderModel| render_model.set(model.clone()));
		store_value(engine)
	};

	let target = surface_target(node_ref);

	use_pointer_event(
		target,
		"pointerdown",
		BindOptions {
			passive: Some(false),
			..filter
		},
		move |e: &web_sys::PointerEvent| {
			let Some(point) = e.surface_point() else {
				return;
			};
			let color = color.get_untracked();
			engine.update_value(|engine| {
				engine.activate_with_color(e.pointer_id(), point, color);
			});
		},
	);

	use_pointer_event(target, "pointermove", filter, move |e: &web_sys::PointerEvent| {
		let Some(point) = e.surface_point() else {
			return;
		};
		engine.update_value(|engine| {
			engine.sample(e.pointer_id(), point);
		});
	});

	use_pointer_event(target, ["pointerup"], filter, move |e: &web_sys::PointerEvent| {
		engine.update_value(|engine| {
			engine.release(e.pointer_id());
		});
	});

	use_pointer_event(
		target,
		"pointercancel",
		BindOptions {
			capture: true,
			..filter
		},
		move |_: &web_sys::PointerEvent| {
			engine.update_value(|engine| {
				engine.cancel();
			});
		},
	);

	use_pointer_event(
		target,
		"lostpointercapture",
		filter,
		move |e: &web_sys::PointerEvent| {
			engine.update_value(|engine| {
				engine.capture_lost(e.pointer_id());
			});
		},
	);

	view! {
		<div
			node_ref=node_ref
			class="DrawingSurface"
			style="touch-action: none; position: relative; height: 100%; width: 100%; background-color: hsl(28.57, 55.84%, 80.2%);"
		>
			<div
				class="DrawingIndicator"
				style="position: absolute; top: 15px; left: calc(50% - 10px); height: 20px; width: 20px; border-radius: 50%; transition: all 100ms ease-in-out;"
				style:background-color={move || if is_drawing.get() { "seagreen" } else { "sienna" }}
			></div>
			<svg class="Strokes" width="100%" height="100%" style="pointer-events: none;">
				{move || {
					render_model.with(|model| {
						model
							.iter()
							.map(|stroke| {
								view! {
									<path
										d=stroke.svg_path_data()
										stroke=stroke.color().to_string()
										stroke-width=STROKE_WIDTH
										fill="none"
										stroke-linecap="round"
										stroke-linejoin="round"
									/>
								}
							})
							.collect_view()
					})
				}}
			</svg>
		</div>
	}
}
