use super::*;
use crate::binder::PointerType;

/// The host's ability to route all further events of a pointer to the drawing surface.
pub trait CaptureHost {
	/// Returns whether capture was granted.
	fn capture_pointer(&self, pointer_id: PointerId) -> bool;
}

impl<F: Fn(PointerId) -> bool> CaptureHost for F {
	fn capture_pointer(&self, pointer_id: PointerId) -> bool {
		self(pointer_id)
	}
}

/// What to do with the stroke in progress when the platform revokes pointer capture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaptureLostPolicy {
	/// Treat it like a cancellation.
	#[default]
	Discard,
	/// Treat it like a release of the captured pointer.
	Commit,
}

#[derive(bon::Builder, Clone, Debug, Default, PartialEq)]
pub struct EngineConfig {
	/// Color for activations that don't specify one.
	#[builder(default)]
	pub default_color: StrokeColor,
	#[builder(default)]
	pub capture_lost: CaptureLostPolicy,
	/// Only this kind of pointer draws. `None` accepts all of them.
	pub pointer_type: Option<PointerType>,
}

type Observer = Box<dyn FnMut(&RenderModel)>;

/// Owns the [`DrawingState`] and drives it from pointer input.
pub struct StrokeEngine<H> {
	state: DrawingState,
	host: H,
	config: EngineConfig,
	observers: Vec<Observer>,
}

impl<H: CaptureHost> StrokeEngine<H> {
	pub fn new(host: H, config: EngineConfig) -> Self {
		Self {
			state: DrawingState::new(),
			host,
			config,
			observers: Vec::new(),
		}
	}

	pub fn state(&self) -> &DrawingState {
		&self.state
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	pub fn is_drawing(&self) -> bool {
		self.state.is_drawing()
	}

	pub fn render_model(&self) -> RenderModel {
		self.state.render_model()
	}

	/// Calls `observer` with a fresh render model after every transition that changed the state.
	pub fn subscribe(&mut self, observer: impl FnMut(&RenderModel) + 'static) {
		self.observers.push(Box::new(observer));
	}

	pub fn handle(&mut self, input: PointerInput) -> Transition {
		let (state, transition) = std::mem::take(&mut self.state).apply(input);
		self.state = state;

		match transition {
			Transition::Started(pointer_id) => {
				tracing::debug!(pointer_id, "stroke started");
				if !self.host.capture_pointer(pointer_id) {
					tracing::warn!(pointer_id, "pointer capture refused");
				}
			}
			Transition::Extended => tracing::trace!("stroke extended"),
			Transition::Committed => {
				tracing::debug!(strokes = self.state.strokes().len(), "stroke committed")
			}
			Transition::Discarded => tracing::debug!("stroke discarded"),
			Transition::Ignored(reason) => tracing::trace!(?reason, "input ignored"),
		}

		if transition.changed_state() {
			let model = self.state.render_model();
			for observer in &mut self.observers {
				observer(&model);
			}
		}
		transition
	}

	pub fn activate(&mut self, pointer_id: PointerId, point: Point) -> Transition {
		let color = self.config.default_color.clone();
		self.activate_with_color(pointer_id, point, color)
	}

	pub fn activate_with_color(
		&mut self,
		pointer_id: PointerId,
		point: Point,
		color: StrokeColor,
	) -> Transition {
		self.handle(PointerInput::Activate {
			pointer_id,
			point,
			color,
		})
	}

	pub fn sample(&mut self, pointer_id: PointerId, point: Point) -> Transition {
		self.handle(PointerInput::Sample { pointer_id, point })
	}

	pub fn release(&mut self, pointer_id: PointerId) -> Transition {
		self.handle(PointerInput::Release { pointer_id })
	}

	pub fn cancel(&mut self) -> Transition {
		self.handle(PointerInput::Cancel)
	}

	/// The platform revoked capture of `pointer_id`. Only the drawing pointer's loss ends the
	/// stroke; other pointers lose implicit capture all the time.
	#[tracing::instrument(skip(self))]
	pub fn capture_lost(&mut self, pointer_id: PointerId) -> Transition {
		if let Phase::Drawing(active) = self.state.phase() {
			if active != pointer_id {
				let reason = Ignored::ForeignPointer {
					active,
					received: pointer_id,
				};
				tracing::trace!(?reason, "input ignored");
				return Transition::Ignored(reason);
			}
		}
		match self.config.capture_lost {
			CaptureLostPolicy::Discard => self.cancel(),
			CaptureLostPolicy::Commit => self.release(pointer_id),
		}
	}
}
