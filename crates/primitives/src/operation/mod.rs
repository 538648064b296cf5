//! The closed set of operations that mutate a document tree.
//!
//! Operations are small immutable records. Each carries enough information to
//! be replayed and to drive range derivation without re-inspecting the state
//! that preceded it. The serialized form is the canonical wire shape for
//! recording and replaying edits:
//!
//! ```text
//! { "kind", "key", "offset", "value"?, "length"?, "data"?, "keys"? }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::{COMPOSITION_FIELD, Composition, Data};
use crate::key::Key;
use crate::range::Offset;
use crate::value::NodeValue;


/// A single mutation request against the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
	/// Splice `value` into a text node at `offset`.
	InsertText {
		/// Target text node.
		key: Key,
		/// Character offset of the insertion.
		offset: Offset,
		/// Inserted string.
		value: String,
	},
	/// Remove `length` characters from a text node starting at `offset`.
	DeleteText {
		/// Target text node.
		key: Key,
		/// Character offset of the first removed character.
		offset: Offset,
		/// Number of removed characters.
		length: usize,
	},
	/// Build a subtree from `value` and insert it as a child at `offset`.
	InsertNode {
		/// Target element.
		key: Key,
		/// Child index of the insertion.
		offset: Offset,
		/// Serializable subtree, decoded with [`NodeValue::from_json`].
		value: Value,
		/// Keys for the created nodes in pre-order. Empty means fresh keys;
		/// a recorded operation carries the keys it was first applied with.
		#[serde(default, skip_serializing_if = "Vec::is_empty")]
		keys: Vec<Key>,
	},
	/// Merge a partial record into a node's data.
	UpdateData {
		/// Target node of either kind.
		key: Key,
		/// Offset used when no better caret can be derived.
		#[serde(default)]
		offset: Offset,
		/// Partial record; `null` fields are removed.
		data: Data,
	},
	/// Merge formatting over the whole span of a text node.
	UpdateFormat {
		/// Target text node.
		key: Key,
		/// Offset used when no better caret can be derived.
		#[serde(default)]
		offset: Offset,
		/// Partial formatting record; `null` fields are removed.
		data: Data,
	},
}

/// Discriminant of an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// See [`Operation::InsertText`].
	InsertText,
	/// See [`Operation::DeleteText`].
	DeleteText,
	/// See [`Operation::InsertNode`].
	InsertNode,
	/// See [`Operation::UpdateData`].
	UpdateData,
	/// See [`Operation::UpdateFormat`].
	UpdateFormat,
}

impl OperationKind {
	/// Returns the wire name of this kind.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::InsertText => "insert_text",
			Self::DeleteText => "delete_text",
			Self::InsertNode => "insert_node",
			Self::UpdateData => "update_data",
			Self::UpdateFormat => "update_format",
		}
	}
}

impl fmt::Display for OperationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Operation {
	/// Creates an insert-text operation.
	pub fn insert_text(key: Key, offset: Offset, value: impl Into<String>) -> Self {
		Self::InsertText {
			key,
			offset,
			value: value.into(),
		}
	}

	/// Creates a delete-text operation.
	pub fn delete_text(key: Key, offset: Offset, length: usize) -> Self {
		Self::DeleteText { key, offset, length }
	}

	/// Creates an insert-node operation from a typed record.
	pub fn insert_node(key: Key, offset: Offset, value: NodeValue) -> Self {
		Self::InsertNode {
			key,
			offset,
			value: value.into(),
			keys: Vec::new(),
		}
	}

	/// Pins the keys an insert-node operation assigns to its subtree.
	///
	/// Has no effect on other kinds or on an operation already carrying keys.
	pub fn with_keys(mut self, created: Vec<Key>) -> Self {
		if let Self::InsertNode { keys, .. } = &mut self
			&& keys.is_empty()
		{
			*keys = created;
		}
		self
	}

	/// Creates an update-data operation.
	pub fn update_data(key: Key, data: Data) -> Self {
		Self::UpdateData { key, offset: 0, data }
	}

	/// Creates an update-format operation.
	pub fn update_format(key: Key, data: Data) -> Self {
		Self::UpdateFormat { key, offset: 0, data }
	}

	/// Creates an update-data operation that sets a text node's composition.
	pub fn set_composition(key: Key, composition: &Composition) -> Self {
		let mut data = Data::new();
		data.insert(
			COMPOSITION_FIELD.to_owned(),
			serde_json::json!({ "text": composition.text, "offset": composition.offset }),
		);
		Self::UpdateData {
			key,
			offset: composition.offset,
			data,
		}
	}

	/// Creates an update-data operation that clears a text node's composition.
	pub fn clear_composition(key: Key, offset: Offset) -> Self {
		let mut data = Data::new();
		data.insert(COMPOSITION_FIELD.to_owned(), Value::Null);
		Self::UpdateData { key, offset, data }
	}

	/// Returns the kind of this operation.
	pub fn kind(&self) -> OperationKind {
		match self {
			Self::InsertText { .. } => OperationKind::InsertText,
			Self::DeleteText { .. } => OperationKind::DeleteText,
			Self::InsertNode { .. } => OperationKind::InsertNode,
			Self::UpdateData { .. } => OperationKind::UpdateData,
			Self::UpdateFormat { .. } => OperationKind::UpdateFormat,
		}
	}

	/// Returns the target node key.
	pub fn key(&self) -> Key {
		match self {
			Self::InsertText { key, .. }
			| Self::DeleteText { key, .. }
			| Self::InsertNode { key, .. }
			| Self::UpdateData { key, .. }
			| Self::UpdateFormat { key, .. } => *key,
		}
	}

	/// Returns the operation's offset field.
	pub fn offset(&self) -> Offset {
		match self {
			Self::InsertText { offset, .. }
			| Self::DeleteText { offset, .. }
			| Self::InsertNode { offset, .. }
			| Self::UpdateData { offset, .. }
			| Self::UpdateFormat { offset, .. } => *offset,
		}
	}
}
