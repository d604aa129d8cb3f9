use itertools::Itertools;
use std::fmt::Write;

/// A sampled position in surface space.
pub type Point = glam::Vec2;

#[derive(Debug, thiserror::Error)]
#[error("invalid stroke color {value:?}")]
pub struct ColorError {
	value: String,
	#[source]
	source: csscolorparser::ParseColorError,
}

static_assertions::assert_impl_all!(ColorError: std::error::Error, Send, Sync);

/// A CSS color, kept as written so it renders exactly as given.
#[derive(Clone, Debug, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{_0}")]
pub struct StrokeColor(String);

impl StrokeColor {
	pub fn parse(value: impl Into<String>) -> Result<Self, ColorError> {
		let value = value.into();
		match csscolorparser::parse(&value) {
			Ok(_) => Ok(Self(value)),
			Err(source) => Err(ColorError { value, source }),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

}

impl Default for StrokeColor {
	fn default() -> Self {
		Self("black".to_owned())
	}
}

impl std::str::FromStr for StrokeColor {
	type Err = ColorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

/// How a stroke is to be drawn: a single point is a dot, anything longer a polyline through every
/// point with straight segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokePath<'a> {
	Dot(Point),
	Polyline(&'a [Point]),
}

/// One freehand path. Never empty: a stroke starts with the point it was activated at.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
	points: Vec<Point>,
	color: StrokeColor,
}

impl Stroke {
	pub fn new(start: Point, color: StrokeColor) -> Self {
		Self {
			points: vec![start],
			color,
		}
	}

	pub(crate) fn push(&mut self, point: Point) {
		self.points.push(point);
	}

	pub fn points(&self) -> &[Point] {
		&self.points
	}

	pub fn color(&self) -> &StrokeColor {
		&self.color
	}

	pub fn first_point(&self) -> Point {
		self.points[0]
	}

	pub fn last_point(&self) -> Point {
		self.points[self.points.len() - 1]
	}

	pub fn path(&self) -> StrokePath<'_> {
		match self.points.as_slice() {
			[point] => StrokePath::Dot(*point),
			points => StrokePath::Polyline(points),
		}
	}

	pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
		self.points.iter().copied().tuple_windows()
	}

	/// SVG path data for [`Stroke::path`]. A dot is a zero-length segment, which shows up with a
	/// round line cap.
	pub fn svg_path_data(&self) -> String {
		let start = self.first_point();
		let mut data = format!("M{} {}", start.x, start.y);
		match self.path() {
			StrokePath::Dot(_) => data.push_str(" l0 0"),
			StrokePath::Polyline(_) => {
				for (_, to) in self.segments() {
					let _ = write!(data, " L{} {}", to.x, to.y);
				}
			}
		}
		data
	}
}
