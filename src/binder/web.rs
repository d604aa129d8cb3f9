use super::{BindOptions, Handler, ListenerTarget, PointerSource, PointerType};
use crate::util::{JsError, ResultExt};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

impl PointerSource for web_sys::PointerEvent {
	fn pointer_type(&self) -> Option<PointerType> {
		let name = web_sys::PointerEvent::pointer_type(self);
		name
			.parse::<PointerType>()
			.inspect_err(|err| tracing::trace!("{}", err))
			.ok()
	}

	fn prevent_default(&self) {
		web_sys::Event::prevent_default(self)
	}
}

impl ListenerTarget for web_sys::EventTarget {
	type Event = web_sys::PointerEvent;
	type Listener = Closure<dyn Fn(web_sys::Event)>;
	type Error = JsError;

	fn add_listener(
		&self,
		event_type: &str,
		options: &BindOptions,
		listener: Handler<web_sys::PointerEvent>,
	) -> Result<Self::Listener, JsError> {
		let closure = Closure::<dyn Fn(web_sys::Event)>::new(move |event: web_sys::Event| {
			match event.dyn_into::<web_sys::PointerEvent>() {
				Ok(event) => listener(&event),
				Err(event) => {
					tracing::warn!(event_type = %event.type_(), "ignoring non-pointer event")
				}
			}
		});

		let init = web_sys::AddEventListenerOptions::new();
		init.set_capture(options.capture);
		if let Some(passive) = options.passive {
			init.set_passive(passive);
		}
		self.add_event_listener_with_callback_and_add_event_listener_options(
			event_type,
			closure.as_ref().unchecked_ref(),
			&init,
		)?;
		Ok(closure)
	}

	fn remove_listener(&self, event_type: &str, options: &BindOptions, listener: Self::Listener) {
		self
			.remove_event_listener_with_callback_and_bool(
				event_type,
				listener.as_ref().unchecked_ref(),
				options.capture,
			)
			.map_err(JsError::from)
			.ok_or_log();
	}
}
