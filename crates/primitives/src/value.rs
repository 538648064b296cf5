//! Serializable node records consumed by `create_node`.
//!
//! This is the boundary contract with importers (HTML, plain text, clipboard)
//! that live outside the engine: they produce [`NodeValue`]s, the engine turns
//! them into keyed nodes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::{Data, TYPE_FIELD};

/// A node subtree in its serializable form.
///
/// The two shapes are told apart by their fields: a record with a string
/// `text` field is a text leaf, a record with a `children` array is an
/// element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
	/// `{ "text": "...", ...formatting }`
	Text {
		/// Text payload.
		text: String,
		/// Remaining fields, kept as formatting.
		#[serde(flatten)]
		formatting: Data,
	},
	/// `{ "type": "...", "children": [...], ...data }`
	Element {
		/// Child records in order.
		children: Vec<NodeValue>,
		/// Remaining fields, including the `type` tag.
		#[serde(flatten)]
		data: Data,
	},
}

impl NodeValue {
	/// Creates an unformatted text record.
	pub fn text(text: impl Into<String>) -> Self {
		Self::Text {
			text: text.into(),
			formatting: Data::new(),
		}
	}

	/// Creates an element record tagged with `kind`.
	pub fn element(kind: impl Into<String>, children: impl IntoIterator<Item = NodeValue>) -> Self {
		let mut data = Data::new();
		data.insert(TYPE_FIELD.to_owned(), Value::String(kind.into()));
		Self::Element {
			children: children.into_iter().collect(),
			data,
		}
	}

	/// Adds a formatting or data field, returning the record.
	pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		match &mut self {
			Self::Text { formatting, .. } => formatting.insert(field.into(), value.into()),
			Self::Element { data, .. } => data.insert(field.into(), value.into()),
		};
		self
	}

	/// Decodes a record from an arbitrary JSON value.
	///
	/// Returns `None` when the value has neither shape, i.e. there is nothing
	/// to insert.
	pub fn from_json(value: &Value) -> Option<Self> {
		Self::deserialize(value).ok()
	}

	/// Returns true for a text record.
	pub fn is_text(&self) -> bool {
		matches!(self, Self::Text { .. })
	}

	/// Returns the number of edges on the longest root-to-leaf path.
	pub fn depth(&self) -> usize {
		match self {
			Self::Text { .. } => 0,
			Self::Element { children, .. } => children.iter().map(|c| c.depth() + 1).max().unwrap_or(0),
		}
	}

	/// Returns the number of records in this subtree, including itself.
	pub fn node_count(&self) -> usize {
		match self {
			Self::Text { .. } => 1,
			Self::Element { children, .. } => 1 + children.iter().map(NodeValue::node_count).sum::<usize>(),
		}
	}
}

impl From<NodeValue> for Value {
	fn from(value: NodeValue) -> Self {
		match value {
			NodeValue::Text { text, mut formatting } => {
				formatting.insert("text".to_owned(), Value::String(text));
				Value::Object(formatting)
			}
			NodeValue::Element { children, mut data } => {
				data.insert("children".to_owned(), Value::Array(children.into_iter().map(Value::from).collect()));
				Value::Object(data)
			}
		}
	}
}
