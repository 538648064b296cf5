use serde::{Deserialize, Serialize};

use crate::key::Key;

/// An offset inside a node.
///
/// Measured in characters for text nodes and in children for elements.
pub type Offset = usize;

/// A position in the document tree: a node key plus an offset inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
	/// The addressed node.
	pub key: Key,
	/// Offset in the addressed node's own unit.
	pub offset: Offset,
}

impl Point {
	/// Creates a point at `offset` inside `key`.
	pub fn new(key: Key, offset: Offset) -> Self {
		Self { key, offset }
	}
}

/// A document range defined by anchor and focus points.
///
/// The anchor is the fixed end, and the focus moves as the selection is
/// extended. When both points are equal the range is a collapsed caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RangeWire", into = "RangeWire")]
pub struct Range {
	/// The fixed end of the range.
	pub anchor: Point,
	/// The moving end of the range (caret position).
	pub focus: Point,
}

impl Range {
	/// Creates a new range from anchor to focus.
	pub fn new(anchor: Point, focus: Point) -> Self {
		Self { anchor, focus }
	}

	/// Creates a collapsed range (caret) at the given point.
	pub fn collapsed(point: Point) -> Self {
		Self::new(point, point)
	}

	/// Creates a caret at `offset` inside `key`.
	pub fn caret(key: Key, offset: Offset) -> Self {
		Self::collapsed(Point::new(key, offset))
	}

	/// Creates a range spanning `[start, end)` within a single node.
	pub fn span(key: Key, start: Offset, end: Offset) -> Self {
		Self::new(Point::new(key, start), Point::new(key, end))
	}

	/// Returns true if anchor equals focus.
	#[inline]
	pub fn is_collapsed(&self) -> bool {
		self.anchor == self.focus
	}

	/// Returns true if both points address the same node.
	#[inline]
	pub fn is_single_node(&self) -> bool {
		self.anchor.key == self.focus.key
	}

	/// Returns true if the focus precedes the anchor inside a single node.
	///
	/// Ranges spanning two nodes need the tree to be ordered and always
	/// report `false` here.
	pub fn is_backward(&self) -> bool {
		self.is_single_node() && self.focus.offset < self.anchor.offset
	}

	/// Returns a new range with anchor and focus swapped.
	pub fn flip(&self) -> Self {
		Self {
			anchor: self.focus,
			focus: self.anchor,
		}
	}

	/// Collapses the range onto its focus.
	pub fn collapse_to_focus(&self) -> Self {
		Self::collapsed(self.focus)
	}

	/// Applies a function to both points.
	pub fn map(self, mut f: impl FnMut(Point) -> Point) -> Self {
		Self {
			anchor: f(self.anchor),
			focus: f(self.focus),
		}
	}
}

/// Flat wire shape consumed by rendering and serialization layers.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeWire {
	anchor_key: Key,
	anchor_offset: Offset,
	focus_key: Key,
	focus_offset: Offset,
}

impl From<RangeWire> for Range {
	fn from(wire: RangeWire) -> Self {
		Self::new(
			Point::new(wire.anchor_key, wire.anchor_offset),
			Point::new(wire.focus_key, wire.focus_offset),
		)
	}
}

impl From<Range> for RangeWire {
	fn from(range: Range) -> Self {
		Self {
			anchor_key: range.anchor.key,
			anchor_offset: range.anchor.offset,
			focus_key: range.focus.key,
			focus_offset: range.focus.offset,
		}
	}
}
