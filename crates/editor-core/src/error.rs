//! Error types for operation application and range derivation.

use std::fmt;

use strata_primitives::{Key, Offset};
use thiserror::Error;

/// The two node variants, used to report type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// Container with ordered children.
	Element,
	/// Leaf holding text.
	Text,
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeKind::Element => f.write_str("element"),
			NodeKind::Text => f.write_str("text"),
		}
	}
}

/// Errors raised while applying an operation or deriving its range.
///
/// All variants are raised before any mutation happens, so a failed
/// operation leaves the tree exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
	/// A key does not resolve to a live node.
	#[error("node not found: {0}")]
	NodeNotFound(Key),

	/// The target node has the wrong variant for the operation.
	#[error("node {key} is {found}, expected {expected}")]
	TypeMismatch {
		/// The target node.
		key: Key,
		/// The variant the operation requires.
		expected: NodeKind,
		/// The variant actually found.
		found: NodeKind,
	},

	/// An offset or offset + length lies outside the node.
	#[error("offset {offset} out of bounds for node {key} (len {len})")]
	OutOfBounds {
		/// The target node.
		key: Key,
		/// The first offending offset.
		offset: Offset,
		/// Current length of the node in its own unit.
		len: usize,
	},

	/// Text edits are blocked while an input-method composition is active.
	#[error("node {0} has an active composition")]
	CompositionActive(Key),

	/// A composition lifecycle step was requested with none in progress.
	#[error("no composition in progress")]
	NoComposition,

	/// A data patch carried a malformed reserved field.
	#[error("invalid data for node {key}: {reason}")]
	InvalidData {
		/// The target node.
		key: Key,
		/// Why the field was rejected.
		reason: String,
	},
}

/// Result type for editing operations.
pub type Result<T> = std::result::Result<T, EditError>;
