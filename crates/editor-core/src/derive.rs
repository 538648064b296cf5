//! Range derivation.
//!
//! After the executor mutates the tree, [`derive_range`] computes the range
//! the selection must become, from the same operation and the post-mutation
//! tree. The result depends on the operation kind, the target's variant, and
//! for inserted subtrees on the subtree's shape.
//!
//! A `None` result means "leave the selection alone" and is not an error.

use strata_primitives::{Key, NodeValue, Offset, Operation, Point, Range};

use crate::document::Document;
use crate::error::{EditError, Result};
use crate::node::NodeData;

/// Where a drill-down landed and how many nodes it visited on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillDown {
	/// Caret position at the end of the deepest last leaf.
	pub point: Point,
	/// Nodes visited, including the starting node.
	pub visited: usize,
}

/// Computes the range that follows the already applied `op`.
///
/// # Errors
///
/// Returns [`EditError::NodeNotFound`] if the operation's target (or any node
/// reached from it) cannot be resolved.
pub fn derive_range(doc: &Document, op: &Operation) -> Result<Option<Range>> {
	let range = match op {
		Operation::UpdateFormat { key, offset, .. } => match &doc.get(*key)?.data {
			NodeData::Text(text) => Range::span(*key, 0, text.len_chars()),
			NodeData::Element(_) => fallback(*key, *offset),
		},
		Operation::UpdateData { key, offset, .. } => match &doc.get(*key)?.data {
			NodeData::Text(text) => match text.composition() {
				Some(composition) => Range::caret(*key, composition.end()),
				None => return Ok(None),
			},
			NodeData::Element(_) => fallback(*key, *offset),
		},
		Operation::InsertText { key, offset, value } => {
			doc.get(*key)?;
			Range::caret(*key, offset + value.chars().count())
		}
		Operation::DeleteText { key, offset, .. } => {
			doc.get(*key)?;
			Range::caret(*key, *offset)
		}
		Operation::InsertNode { key, offset, value, .. } => {
			if !doc.contains(*key) {
				tracing::error!(key = %key, "insert_node target element not found");
				return Err(EditError::NodeNotFound(*key));
			}
			match NodeValue::from_json(value) {
				Some(_) => inserted_range(doc, *key, *offset)?,
				None => fallback(*key, *offset),
			}
		}
	};

	tracing::trace!(kind = %op.kind(), ?range, "derived range");
	Ok(Some(range))
}

/// Walks last children from `key` down to the deepest last leaf.
///
/// Stops at the first text leaf (caret at its end) or at the first element
/// without children (caret after its last child position). Each step goes one
/// level deeper, so the walk visits at most depth + 1 nodes.
pub fn drill_down(doc: &Document, key: Key) -> Result<DrillDown> {
	let mut current = doc.get(key)?;
	let mut visited = 1;

	loop {
		match &current.data {
			NodeData::Text(text) => {
				return Ok(DrillDown {
					point: Point::new(current.key(), text.len_chars()),
					visited,
				});
			}
			NodeData::Element(element) => match element.last_child() {
				Some(child) => {
					current = doc.get(child)?;
					visited += 1;
				}
				None => {
					return Ok(DrillDown {
						point: Point::new(current.key(), element.children_size()),
						visited,
					});
				}
			},
		}
	}
}

/// Caret after an insert-node: the end of the inserted subtree's last leaf.
fn inserted_range(doc: &Document, parent: Key, offset: Offset) -> Result<Range> {
	match doc.element(parent)?.child(offset) {
		Some(inserted) => Ok(Range::collapsed(drill_down(doc, inserted)?.point)),
		None => Ok(fallback(parent, offset)),
	}
}

fn fallback(key: Key, offset: Offset) -> Range {
	Range::caret(key, offset)
}
