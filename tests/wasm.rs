#![cfg(target_arch = "wasm32")]

use scribble::binder::*;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

// https://rustwasm.github.io/wasm-bindgen/wasm-bindgen-test/browsers.html
wasm_bindgen_test_configure!(run_in_browser);

fn surface() -> web_sys::EventTarget {
	let document = web_sys::window().unwrap().document().unwrap();
	let element = document.create_element("div").unwrap();
	document.body().unwrap().append_child(&element).unwrap();
	element.unchecked_into()
}

fn pointer_event(event_type: &str, pointer_type: &str) -> web_sys::PointerEvent {
	pointer_event_at(event_type, pointer_type, 0, 0)
}

fn pointer_event_at(event_type: &str, pointer_type: &str, x: i32, y: i32) -> web_sys::PointerEvent {
	let init = web_sys::PointerEventInit::new();
	init.set_pointer_type(pointer_type);
	init.set_client_x(x);
	init.set_client_y(y);
	init.set_pointer_id(1);
	init.set_cancelable(true);
	init.set_bubbles(true);
	web_sys::PointerEvent::new_with_event_init_dict(event_type, &init).unwrap()
}

fn dispatch(target: &web_sys::EventTarget, event: &web_sys::PointerEvent) {
	target.dispatch_event(event).unwrap();
}

#[wasm_bindgen_test]
fn binder_filters_and_suppresses_default() {
	let target = surface();
	let count = Rc::new(Cell::new(0));
	let mut binder = EventBinder::<web_sys::EventTarget>::new({
		let count = count.clone();
		move |_: &web_sys::PointerEvent| count.set(count.get() + 1)
	});
	let options = BindOptions::builder()
		.pointer_type(PointerType::Pen)
		.passive(false)
		.build();
	let outcome = binder
		.sync(Some(target.clone()), &"pointerdown".into(), options)
		.unwrap();
	assert_eq!(outcome, SyncOutcome::Bound);

	let touch = pointer_event("pointerdown", "touch");
	dispatch(&target, &touch);
	assert_eq!(count.get(), 0);
	assert!(!touch.default_prevented());

	let pen = pointer_event("pointerdown", "pen");
	dispatch(&target, &pen);
	assert_eq!(count.get(), 1);
	assert!(pen.default_prevented());
}

#[wasm_bindgen_test]
fn binder_removes_listeners() {
	let target = surface();
	let count = Rc::new(Cell::new(0));
	let mut binder = EventBinder::<web_sys::EventTarget>::new({
		let count = count.clone();
		move |_: &web_sys::PointerEvent| count.set(count.get() + 1)
	});
	let types = EventTypes::from(["pointerup", "pointercancel"]);
	let options = BindOptions::builder().capture(true).build();
	binder.sync(Some(target.clone()), &types, options).unwrap();
	assert_eq!(
		binder.sync(Some(target.clone()), &types, options).unwrap(),
		SyncOutcome::Unchanged
	);

	dispatch(&target, &pointer_event("pointerup", "mouse"));
	dispatch(&target, &pointer_event("pointercancel", "mouse"));
	assert_eq!(count.get(), 2);

	binder.unbind();
	dispatch(&target, &pointer_event("pointerup", "mouse"));
	assert_eq!(count.get(), 2);
}

mod surface {
	use super::{dispatch, pointer_event_at};
	use leptos::*;
	use scribble::DrawingSurface;
	use wasm_bindgen::JsCast;
	use wasm_bindgen_test::*;

	/// Mounts a surface in a fixed 200x200 box at the viewport origin, so client and surface
	/// coordinates coincide.
	fn mount_surface() -> web_sys::Element {
		let document = web_sys::window().unwrap().document().unwrap();
		let parent = document.create_element("div").unwrap();
		parent
			.set_attribute(
				"style",
				"position: fixed; left: 0; top: 0; width: 200px; height: 200px;",
			)
			.unwrap();
		document.body().unwrap().append_child(&parent).unwrap();
		mount_to(parent.clone().unchecked_into(), || view! { <DrawingSurface/> });
		parent
	}

	fn find(parent: &web_sys::Element, selector: &str) -> Option<web_sys::Element> {
		parent.query_selector(selector).unwrap()
	}

	fn indicator_style(parent: &web_sys::Element) -> String {
		find(parent, ".DrawingIndicator")
			.unwrap()
			.get_attribute("style")
			.unwrap_or_default()
	}

	#[wasm_bindgen_test]
	fn surface_draws_a_stroke() {
		let parent = mount_surface();
		let surface: web_sys::EventTarget = find(&parent, ".DrawingSurface").unwrap().into();
		assert!(indicator_style(&parent).contains("sienna"));
		assert!(find(&parent, "path").is_none());

		dispatch(&surface, &pointer_event_at("pointerdown", "mouse", 10, 10));
		dispatch(&surface, &pointer_event_at("pointermove", "mouse", 20, 15));
		assert!(indicator_style(&parent).contains("seagreen"));
		assert_eq!(
			find(&parent, "path").unwrap().get_attribute("d").unwrap(),
			"M10 10 L20 15"
		);

		dispatch(&surface, &pointer_event_at("pointerup", "mouse", 20, 15));
		assert!(indicator_style(&parent).contains("sienna"));
		let path = find(&parent, "path").unwrap();
		assert_eq!(path.get_attribute("d").unwrap(), "M10 10 L20 15");
		assert_eq!(path.get_attribute("stroke").unwrap(), "black");
	}

	#[wasm_bindgen_test]
	fn surface_discards_cancelled_stroke() {
		let parent = mount_surface();
		let surface: web_sys::EventTarget = find(&parent, ".DrawingSurface").unwrap().into();

		dispatch(&surface, &pointer_event_at("pointerdown", "pen", 5, 5));
		assert!(find(&parent, "path").is_some());
		dispatch(&surface, &pointer_event_at("pointercancel", "pen", 5, 5));
		assert!(find(&parent, "path").is_none());
		assert!(indicator_style(&parent).contains("sienna"));
	}
}
