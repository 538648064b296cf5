use serde::{Deserialize, Serialize};

use crate::key::Key;
use crate::range::{Offset, Point, Range};


/// The currently active range exposed to the rendering layer.
///
/// A selection always holds exactly one range. It is replaced wholesale
/// after each applied operation, never edited point by point, so consumers
/// never observe a half-updated selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
	range: Range,
}

impl Selection {
	/// Creates a selection holding `range`.
	pub fn new(range: Range) -> Self {
		Self { range }
	}

	/// Creates a caret selection at `offset` inside `key`.
	pub fn caret(key: Key, offset: Offset) -> Self {
		Self::new(Range::caret(key, offset))
	}

	/// Returns the active range.
	pub fn range(&self) -> Range {
		self.range
	}

	/// Returns the anchor point.
	pub fn anchor(&self) -> Point {
		self.range.anchor
	}

	/// Returns the focus point (caret position).
	pub fn focus(&self) -> Point {
		self.range.focus
	}

	/// Returns true if the selection is a caret.
	pub fn is_collapsed(&self) -> bool {
		self.range.is_collapsed()
	}

	/// Replaces the active range, returning the previous one.
	pub fn replace(&mut self, range: Range) -> Range {
		std::mem::replace(&mut self.range, range)
	}
}

impl From<Range> for Selection {
	fn from(range: Range) -> Self {
		Self::new(range)
	}
}
