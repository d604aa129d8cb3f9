use super::Stroke;
use std::rc::Rc;

/// Read-only view of what to paint: committed strokes in commit order, then the stroke in
/// progress. Committed strokes are shared with the engine, never copied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderModel {
	committed: Rc<Vec<Stroke>>,
	in_progress: Option<Stroke>,
}

impl RenderModel {
	pub(crate) fn new(committed: Rc<Vec<Stroke>>, in_progress: Option<Stroke>) -> Self {
		Self {
			committed,
			in_progress,
		}
	}

	pub fn in_progress(&self) -> Option<&Stroke> {
		self.in_progress.as_ref()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
		self.committed.iter().chain(self.in_progress.iter())
	}

	pub fn len(&self) -> usize {
		self.committed.len() + usize::from(self.in_progress.is_some())
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<'a> IntoIterator for &'a RenderModel {
	type Item = &'a Stroke;
	type IntoIter = std::iter::Chain<std::slice::Iter<'a, Stroke>, std::option::Iter<'a, Stroke>>;

	fn into_iter(self) -> Self::IntoIter {
		self.committed.iter().chain(self.in_progress.iter())
	}
}
