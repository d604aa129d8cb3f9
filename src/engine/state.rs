use super::{Point, RenderModel, Stroke, StrokeColor};
use std::rc::Rc;

/// Platform-assigned pointer identity (`PointerEvent.pointerId`).
pub type PointerId = i32;

#[derive(Clone, Debug, PartialEq)]
pub enum PointerInput {
	Activate {
		pointer_id: PointerId,
		point: Point,
		color: StrokeColor,
	},
	Sample {
		pointer_id: PointerId,
		point: Point,
	},
	Release {
		pointer_id: PointerId,
	},
	/// Platform-level cancellation. Applies to whichever pointer is active.
	Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Idle,
	Drawing(PointerId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ignored {
	NotDrawing,
	ForeignPointer {
		active: PointerId,
		received: PointerId,
	},
	AlreadyDrawing(PointerId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
	Started(PointerId),
	Extended,
	Committed,
	Discarded,
	Ignored(Ignored),
}

impl Transition {
	pub fn changed_state(&self) -> bool {
		!matches!(self, Transition::Ignored(_))
	}
}

#[derive(Clone, Debug, PartialEq)]
struct ActiveStroke {
	pointer_id: PointerId,
	stroke: Stroke,
}

/// Committed strokes plus the stroke in progress, if any.
///
/// Drawing is defined as having an in-progress stroke, so the two can never disagree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawingState {
	active: Option<ActiveStroke>,
	strokes: Rc<Vec<Stroke>>,
}

impl DrawingState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn phase(&self) -> Phase {
		match &self.active {
			Some(active) => Phase::Drawing(active.pointer_id),
			None => Phase::Idle,
		}
	}

	pub fn is_drawing(&self) -> bool {
		self.active.is_some()
	}

	pub fn current_stroke(&self) -> Option<&Stroke> {
		self.active.as_ref().map(|active| &active.stroke)
	}

	pub fn strokes(&self) -> &[Stroke] {
		&self.strokes
	}

	pub fn render_model(&self) -> RenderModel {
		RenderModel::new(self.strokes.clone(), self.current_stroke().cloned())
	}

	pub fn apply(mut self, input: PointerInput) -> (Self, Transition) {
		let transition = match (self.active.take(), input) {
			(
				None,
				PointerInput::Activate {
					pointer_id,
					point,
					color,
				},
			) => {
				self.active = Some(ActiveStroke {
					pointer_id,
					stroke: Stroke::new(point, color),
				});
				Transition::Started(pointer_id)
			}
			(None, _) => Transition::Ignored(Ignored::NotDrawing),
			(Some(active), PointerInput::Activate { .. }) => {
				let pointer_id = active.pointer_id;
				self.active = Some(active);
				Transition::Ignored(Ignored::AlreadyDrawing(pointer_id))
			}
			(Some(mut active), PointerInput::Sample { pointer_id, point }) => {
				let transition = if active.pointer_id == pointer_id {
					active.stroke.push(point);
					Transition::Extended
				} else {
					Transition::Ignored(Ignored::ForeignPointer {
						active: active.pointer_id,
						received: pointer_id,
					})
				};
				self.active = Some(active);
				transition
			}
			(Some(active), PointerInput::Release { pointer_id }) => {
				if active.pointer_id == pointer_id {
					Rc::make_mut(&mut self.strokes).push(active.stroke);
					Transition::Committed
				} else {
					let active_id = active.pointer_id;
					self.active = Some(active);
					Transition::Ignored(Ignored::ForeignPointer {
						active: active_id,
						received: pointer_id,
					})
				}
			}
			(Some(_), PointerInput::Cancel) => Transition::Discarded,
		};
		(self, transition)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use glam::vec2;

	fn activate(pointer_id: PointerId, x: f32, y: f32) -> PointerInput {
		PointerInput::Activate {
			pointer_id,
			point: vec2(x, y),
			color: StrokeColor::default(),
		}
	}

	fn sample(pointer_id: PointerId, x: f32, y: f32) -> PointerInput {
		PointerInput::Sample {
			pointer_id,
			point: vec2(x, y),
		}
	}

	fn release(pointer_id: PointerId) -> PointerInput {
		PointerInput::Release { pointer_id }
	}

	fn run_from(
		mut state: DrawingState,
		inputs: impl IntoIterator<Item = PointerInput>,
	) -> (DrawingState, Vec<Transition>) {
		let mut transitions = Vec::new();
		for input in inputs {
			let (next, transition) = state.apply(input);
			state = next;
			transitions.push(transition);
		}
		(state, transitions)
	}

	fn run(inputs: impl IntoIterator<Item = PointerInput>) -> (DrawingState, Vec<Transition>) {
		run_from(DrawingState::new(), inputs)
	}

	#[test]
	fn activate_sample_release_commits_in_order() {
		let (state, transitions) = run([
			activate(1, 0.0, 0.0),
			sample(1, 1.0, 1.0),
			sample(1, 2.0, 2.0),
			release(1),
		]);
		assert_eq!(
			transitions,
			vec![
				Transition::Started(1),
				Transition::Extended,
				Transition::Extended,
				Transition::Committed
			]
		);
		assert_eq!(state.phase(), Phase::Idle);
		assert!(!state.is_drawing());
		assert_eq!(state.strokes().len(), 1);
		assert_eq!(
			state.strokes()[0].points(),
			&[vec2(0.0, 0.0), vec2(1.0, 1.0), vec2(2.0, 2.0)]
		);
	}

	#[test]
	fn activation_records_start_point_and_color() {
		let color = StrokeColor::parse("seagreen").unwrap();
		let (state, _) = run([PointerInput::Activate {
			pointer_id: 7,
			point: vec2(4.0, 2.0),
			color: color.clone(),
		}]);
		assert_eq!(state.phase(), Phase::Drawing(7));
		let stroke = state.current_stroke().unwrap();
		assert_eq!(stroke.points(), &[vec2(4.0, 2.0)]);
		assert_eq!(stroke.color(), &color);
		assert!(state.strokes().is_empty());
	}

	#[test]
	fn other_pointers_are_ignored() {
		let (state, transitions) = run([
			activate(5, 0.0, 0.0),
			sample(6, 9.0, 9.0),
			release(6),
		]);
		assert_eq!(
			transitions[1..],
			[
				Transition::Ignored(Ignored::ForeignPointer {
					active: 5,
					received: 6
				}),
				Transition::Ignored(Ignored::ForeignPointer {
					active: 5,
					received: 6
				}),
			]
		);
		assert_eq!(state.phase(), Phase::Drawing(5));
		assert_eq!(state.current_stroke().unwrap().points(), &[vec2(0.0, 0.0)]);
		assert!(state.strokes().is_empty());
	}

	#[test]
	fn cancel_discards() {
		let (state, transitions) = run([
			activate(1, 0.0, 0.0),
			sample(1, 1.0, 1.0),
			PointerInput::Cancel,
		]);
		assert_eq!(transitions[2], Transition::Discarded);
		assert_eq!(state.phase(), Phase::Idle);
		assert!(state.current_stroke().is_none());
		assert!(state.strokes().is_empty());
	}

	#[test]
	fn idle_ignores_everything_but_activation() {
		let (state, transitions) = run([sample(1, 1.0, 1.0), release(1), PointerInput::Cancel]);
		assert!(transitions
			.iter()
			.all(|t| *t == Transition::Ignored(Ignored::NotDrawing)));
		assert_eq!(state, DrawingState::new());
	}

	#[test]
	fn reactivation_does_not_overwrite() {
		let (state, transitions) = run([
			activate(1, 0.0, 0.0),
			sample(1, 1.0, 1.0),
			activate(1, 5.0, 5.0),
			activate(2, 6.0, 6.0),
		]);
		assert_eq!(
			transitions[2..],
			[
				Transition::Ignored(Ignored::AlreadyDrawing(1)),
				Transition::Ignored(Ignored::AlreadyDrawing(1)),
			]
		);
		assert_eq!(state.phase(), Phase::Drawing(1));
		assert_eq!(
			state.current_stroke().unwrap().points(),
			&[vec2(0.0, 0.0), vec2(1.0, 1.0)]
		);
	}

	#[test]
	fn duplicate_samples_are_kept() {
		let (state, _) = run([
			activate(1, 0.0, 0.0),
			sample(1, 1.0, 1.0),
			sample(1, 1.0, 1.0),
			release(1),
		]);
		assert_eq!(
			state.strokes()[0].points(),
			&[vec2(0.0, 0.0), vec2(1.0, 1.0), vec2(1.0, 1.0)]
		);
	}

	#[test]
	fn strokes_keep_commit_order() {
		let (state, _) = run([
			activate(1, 0.0, 0.0),
			release(1),
			activate(2, 1.0, 1.0),
			PointerInput::Cancel,
			activate(3, 2.0, 2.0),
			release(3),
		]);
		let starts: Vec<_> = state.strokes().iter().map(Stroke::first_point).collect();
		assert_eq!(starts, vec![vec2(0.0, 0.0), vec2(2.0, 2.0)]);
	}

	#[test]
	fn snapshots_are_not_affected_by_later_transitions() {
		let (state, _) = run([activate(1, 0.0, 0.0), release(1)]);
		let snapshot = state.render_model();
		let (state, _) = run_from(state, [activate(2, 1.0, 1.0), release(2)]);
		assert_eq!(snapshot.len(), 1);
		assert_eq!(state.strokes().len(), 2);
	}
}
