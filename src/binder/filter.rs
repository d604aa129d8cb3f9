use super::{BindOptions, Handler, PointerSource, PointerType};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Stop,
}

/// A single stage of the dispatch pipeline. Stages run in order; the first `Stop` drops the event.
pub trait Filter<E> {
	fn filter(&self, event: &E) -> Flow;
}

impl<E, F: Fn(&E) -> Flow> Filter<E> for F {
	fn filter(&self, event: &E) -> Flow {
		self(event)
	}
}

/// Drops events reported by any other pointer type, including unrecognized ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchPointerType(pub PointerType);

impl<E: PointerSource> Filter<E> for MatchPointerType {
	fn filter(&self, event: &E) -> Flow {
		if event.pointer_type() == Some(self.0) {
			Flow::Continue
		} else {
			tracing::trace!(expected = %self.0, "dropping event from other pointer type");
			Flow::Stop
		}
	}
}

/// Cancels the platform's default action. Never drops the event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SuppressDefault;

impl<E: PointerSource> Filter<E> for SuppressDefault {
	fn filter(&self, event: &E) -> Flow {
		event.prevent_default();
		Flow::Continue
	}
}

pub struct Pipeline<E> {
	stages: Vec<Box<dyn Filter<E>>>,
	handler: Handler<E>,
}

impl<E: PointerSource + 'static> Pipeline<E> {
	pub fn new(handler: Handler<E>) -> Self {
		Self {
			stages: Vec::new(),
			handler,
		}
	}

	/// Pointer-type filtering comes before suppressing the default action, so a dropped event has
	/// no side effects.
	pub fn from_options(options: &BindOptions, handler: Handler<E>) -> Self {
		let mut pipeline = Self::new(handler);
		if let Some(pointer_type) = options.pointer_type {
			pipeline = pipeline.with_stage(MatchPointerType(pointer_type));
		}
		if options.passive == Some(false) {
			pipeline = pipeline.with_stage(SuppressDefault);
		}
		pipeline
	}

	pub fn with_stage(mut self, stage: impl Filter<E> + 'static) -> Self {
		self.stages.push(Box::new(stage));
		self
	}

	/// Runs the stages and, if none of them stopped the event, the handler. Returns whether the
	/// handler ran.
	pub fn dispatch(&self, event: &E) -> bool {
		if self
			.stages
			.iter()
			.any(|stage| stage.filter(event) == Flow::Stop)
		{
			return false;
		}
		(self.handler)(event);
		true
	}
}
