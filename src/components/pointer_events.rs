use crate::binder::{BindOptions, EventBinder, EventTypes};
use crate::util::ResultExt;
use leptos::*;

/// Attaches `handler` to `target` for every type in `types` for the lifetime of the current
/// reactive owner.
///
/// Listeners are (re-)registered whenever `target` changes and removed when it becomes `None` or
/// the owner is cleaned up.
pub fn use_pointer_event(
	target: Signal<Option<web_sys::EventTarget>>,
	types: impl Into<EventTypes>,
	options: BindOptions,
	handler: impl Fn(&web_sys::PointerEvent) + 'static,
) {
	let types = types.into();
	let binder = store_value(EventBinder::<web_sys::EventTarget>::new(handler));

	create_effect(move |_| {
		let target = target.get();
		binder.update_value(|binder| {
			if let Some(outcome) = binder.sync(target, &types, options).ok_or_log() {
				tracing::debug!(?outcome, ?types, "pointer listeners synced");
			}
		});
	});

	on_cleanup(move || {
		binder.try_update_value(|binder| binder.unbind());
	});
}
