//! Scoped subscription of pointer-event listeners to a target surface.
//!
//! A [`Binding`] owns the listeners it registered and removes exactly those when dropped. An
//! [`EventBinder`] reconciles a binding against a target that may come and go, re-registering
//! only when the target, the event types or the options actually change.

use itertools::Itertools;
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

pub mod filter;
pub use filter::*;

pub mod web;

/// Shared event handler. Listeners only ever see the event by reference.
pub type Handler<E> = Rc<dyn Fn(&E)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PointerType {
	#[display("mouse")]
	Mouse,
	#[display("pen")]
	Pen,
	#[display("touch")]
	Touch,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown pointer type {0:?}")]
pub struct UnknownPointerType(pub String);

static_assertions::assert_impl_all!(UnknownPointerType: std::error::Error, Send, Sync);

impl std::str::FromStr for PointerType {
	type Err = UnknownPointerType;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"mouse" => Ok(PointerType::Mouse),
			"pen" => Ok(PointerType::Pen),
			"touch" => Ok(PointerType::Touch),
			other => Err(UnknownPointerType(other.to_owned())),
		}
	}
}

#[derive(bon::Builder, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BindOptions {
	/// Only deliver events reported by this kind of pointer. `None` accepts all of them.
	pub pointer_type: Option<PointerType>,
	/// `Some(false)` suppresses the platform's default action before the handler runs.
	pub passive: Option<bool>,
	/// Register for the capture phase instead of the bubble phase.
	#[builder(default)]
	pub capture: bool,
}

/// One or more event-type names, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventTypes(Vec<Cow<'static, str>>);

impl EventTypes {
	pub fn new<I, S>(types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Cow<'static, str>>,
	{
		Self(types.into_iter().map(Into::into).unique().collect())
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|t| t.as_ref())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<&'static str> for EventTypes {
	fn from(value: &'static str) -> Self {
		Self::new([value])
	}
}

impl<const N: usize> From<[&'static str; N]> for EventTypes {
	fn from(value: [&'static str; N]) -> Self {
		Self::new(value)
	}
}

impl From<Vec<&'static str>> for EventTypes {
	fn from(value: Vec<&'static str>) -> Self {
		Self::new(value)
	}
}

/// What the dispatch pipeline needs to know about a native pointer event.
pub trait PointerSource {
	/// The reported pointer type, or `None` if the platform reported something unrecognized.
	fn pointer_type(&self) -> Option<PointerType>;

	fn prevent_default(&self);
}

/// A surface that native listeners can be attached to.
pub trait ListenerTarget: Clone + PartialEq {
	type Event: PointerSource + 'static;
	/// Token returned on registration and handed back on removal.
	type Listener;
	type Error: std::error::Error;

	fn add_listener(
		&self,
		event_type: &str,
		options: &BindOptions,
		listener: Handler<Self::Event>,
	) -> Result<Self::Listener, Self::Error>;

	fn remove_listener(&self, event_type: &str, options: &BindOptions, listener: Self::Listener);
}

/// Listeners registered on a target. Dropping the binding removes them.
pub struct Binding<T: ListenerTarget> {
	target: T,
	options: BindOptions,
	listeners: Vec<(String, T::Listener)>,
}

impl<T: ListenerTarget> Binding<T> {
	pub fn target(&self) -> &T {
		&self.target
	}

	pub fn options(&self) -> &BindOptions {
		&self.options
	}

	pub fn event_types(&self) -> impl Iterator<Item = &str> {
		self.listeners.iter().map(|(t, _)| t.as_str())
	}
}

impl<T: ListenerTarget> Drop for Binding<T> {
	fn drop(&mut self) {
		for (event_type, listener) in self.listeners.drain(..) {
			tracing::debug!(
				event_type = event_type.as_str(),
				capture = self.options.capture,
				"removing listener"
			);
			self.target.remove_listener(&event_type, &self.options, listener);
		}
	}
}

/// Registers `handler` for every type in `types`. All listeners share one filter pipeline.
///
/// On failure, listeners added before the failing one are removed again.
pub fn bind<T: ListenerTarget>(
	target: T,
	types: &EventTypes,
	options: BindOptions,
	handler: Handler<T::Event>,
) -> Result<Binding<T>, T::Error> {
	let pipeline = Rc::new(Pipeline::from_options(&options, handler));
	let listener: Handler<T::Event> = Rc::new(move |event: &T::Event| {
		pipeline.dispatch(event);
	});

	let mut binding = Binding {
		target,
		options,
		listeners: Vec::with_capacity(types.len()),
	};
	for event_type in types.iter() {
		tracing::debug!(event_type, capture = options.capture, "adding listener");
		let registered = binding
			.target
			.add_listener(event_type, &options, listener.clone())?;
		binding.listeners.push((event_type.to_owned(), registered));
	}
	Ok(binding)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
	/// Listeners were (re-)registered.
	Bound,
	/// The requested configuration is already in place.
	Unchanged,
	/// There is no target; nothing is registered.
	Detached,
}

struct Bound<T: ListenerTarget> {
	types: EventTypes,
	binding: Binding<T>,
}

/// Keeps a [`Binding`] in line with a target that may not exist yet.
pub struct EventBinder<T: ListenerTarget> {
	handler: Rc<RefCell<Handler<T::Event>>>,
	bound: Option<Bound<T>>,
}

impl<T: ListenerTarget> EventBinder<T> {
	pub fn new(handler: impl Fn(&T::Event) + 'static) -> Self {
		Self {
			handler: Rc::new(RefCell::new(Rc::new(handler))),
			bound: None,
		}
	}

	/// Replaces the handler. Registered listeners pick it up without being re-registered.
	pub fn set_handler(&self, handler: impl Fn(&T::Event) + 'static) {
		*self.handler.borrow_mut() = Rc::new(handler);
	}

	pub fn is_bound(&self) -> bool {
		self.bound.is_some()
	}

	pub fn sync(
		&mut self,
		target: Option<T>,
		types: &EventTypes,
		options: BindOptions,
	) -> Result<SyncOutcome, T::Error> {
		if let (Some(bound), Some(target)) = (&self.bound, &target) {
			if bound.binding.target() == target
				&& &bound.types == types
				&& bound.binding.options() == &options
			{
				return Ok(SyncOutcome::Unchanged);
			}
		}

		self.unbind();
		let Some(target) = target else {
			return Ok(SyncOutcome::Detached);
		};

		let handler = self.handler.clone();
		let trampoline: Handler<T::Event> = Rc::new(move |event: &T::Event| {
			// Clone first so a handler may call `set_handler` on its own binder.
			let current = handler.borrow().clone();
			current(event)
		});
		let binding = bind(target, types, options, trampoline)?;
		self.bound = Some(Bound {
			types: types.clone(),
			binding,
		});
		Ok(SyncOutcome::Bound)
	}

	pub fn unbind(&mut self) {
		self.bound = None;
	}
}
