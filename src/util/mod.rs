use crate::engine::Point;
use leptos::*;
use wasm_bindgen::JsCast;

pub trait ResultExt<T, E> {
	/// Logs the error, if any, and discards it.
	fn ok_or_log(self) -> Option<T>
	where
		E: std::fmt::Display;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
	fn ok_or_log(self) -> Option<T>
	where
		E: std::fmt::Display,
	{
		self.inspect_err(|err| tracing::error!("{}", err)).ok()
	}
}

#[derive(thiserror::Error, Debug)]
#[error("javascript error: {0}")]
pub struct JsError(String);

static_assertions::assert_impl_all!(JsError: std::error::Error, Send, Sync);

impl From<wasm_bindgen::JsValue> for JsError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		JsError(format!("{:?}", value))
	}
}

pub trait SurfaceCoordinates {
	/// Position relative to the top-left corner of the element the listener is attached to.
	fn surface_point(&self) -> Option<Point>;
}

impl SurfaceCoordinates for web_sys::PointerEvent {
	fn surface_point(&self) -> Option<Point> {
		let element = self
			.current_target()
			.and_then(|target| target.dyn_into::<web_sys::Element>().ok())?;
		let rect = element.get_bounding_client_rect();
		Some(Point::new(
			(f64::from(self.client_x()) - rect.left()) as f32,
			(f64::from(self.client_y()) - rect.top()) as f32,
		))
	}
}

/// The element behind `node_ref` as an event target, once it exists.
pub fn surface_target(node_ref: NodeRef<html::Div>) -> Signal<Option<web_sys::EventTarget>> {
	Signal::derive(move || {
		node_ref.get().map(|element| {
			let element: &web_sys::HtmlElement = &element;
			element.clone().into()
		})
	})
}
