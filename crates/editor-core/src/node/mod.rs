//! Nodes of the document tree.
//!
//! A [`Node`] is either an element (ordered children plus a data record) or a
//! text leaf (a rope plus formatting and an optional composition). Nodes
//! never hold each other directly: children and parents are referenced by
//! [`Key`] and resolved through the owning [`Document`].
//!
//! [`Document`]: crate::Document

#[cfg(test)]
mod tests;

use ropey::Rope;
use serde_json::Value;
use strata_primitives::{Composition, Data, Key, Offset, TYPE_FIELD};

use crate::error::NodeKind;

/// A keyed node living in a document arena.
#[derive(Debug, Clone)]
pub struct Node {
	key: Key,
	/// Traversal-only back link; never used to decide ownership.
	parent: Option<Key>,
	pub(crate) data: NodeData,
}

/// Variant payload of a [`Node`].
#[derive(Debug, Clone)]
pub enum NodeData {
	/// Container node.
	Element(ElementNode),
	/// Leaf node.
	Text(TextNode),
}

impl Node {
	pub(crate) fn new(key: Key, data: NodeData) -> Self {
		Self { key, parent: None, data }
	}

	/// Returns the node's key.
	pub fn key(&self) -> Key {
		self.key
	}

	/// Returns the key of the parent element, if attached.
	pub fn parent(&self) -> Option<Key> {
		self.parent
	}

	pub(crate) fn set_parent(&mut self, parent: Option<Key>) {
		self.parent = parent;
	}

	/// Returns the variant payload.
	pub fn data(&self) -> &NodeData {
		&self.data
	}

	/// Returns which variant this node is.
	pub fn kind(&self) -> NodeKind {
		match self.data {
			NodeData::Element(_) => NodeKind::Element,
			NodeData::Text(_) => NodeKind::Text,
		}
	}

	/// Returns true for text leaves.
	pub fn is_text(&self) -> bool {
		matches!(self.data, NodeData::Text(_))
	}

	/// Returns true for elements.
	pub fn is_element(&self) -> bool {
		matches!(self.data, NodeData::Element(_))
	}

	/// Returns the element payload, if this is an element.
	pub fn as_element(&self) -> Option<&ElementNode> {
		match &self.data {
			NodeData::Element(element) => Some(element),
			NodeData::Text(_) => None,
		}
	}

	/// Returns the text payload, if this is a text leaf.
	pub fn as_text(&self) -> Option<&TextNode> {
		match &self.data {
			NodeData::Text(text) => Some(text),
			NodeData::Element(_) => None,
		}
	}

	pub(crate) fn as_element_mut(&mut self) -> Option<&mut ElementNode> {
		match &mut self.data {
			NodeData::Element(element) => Some(element),
			NodeData::Text(_) => None,
		}
	}

	pub(crate) fn as_text_mut(&mut self) -> Option<&mut TextNode> {
		match &mut self.data {
			NodeData::Text(text) => Some(text),
			NodeData::Element(_) => None,
		}
	}
}

/// Element payload: ordered child keys and a free-form data record.
#[derive(Debug, Clone, Default)]
pub struct ElementNode {
	children: Vec<Key>,
	data: Data,
}

impl ElementNode {
	pub(crate) fn new(data: Data) -> Self {
		Self {
			children: Vec::new(),
			data,
		}
	}

	/// Returns the number of children.
	pub fn children_size(&self) -> usize {
		self.children.len()
	}

	/// Returns the child keys in order.
	pub fn children(&self) -> &[Key] {
		&self.children
	}

	/// Returns the key of the child at `index`.
	pub fn child(&self, index: usize) -> Option<Key> {
		self.children.get(index).copied()
	}

	/// Returns the key of the last child, or `None` when empty.
	pub fn last_child(&self) -> Option<Key> {
		self.children.last().copied()
	}

	/// Returns the attribute record.
	pub fn data(&self) -> &Data {
		&self.data
	}

	/// Returns the `type` tag, if it is a string.
	pub fn element_type(&self) -> Option<&str> {
		self.data.get(TYPE_FIELD).and_then(Value::as_str)
	}

	pub(crate) fn data_mut(&mut self) -> &mut Data {
		&mut self.data
	}

	pub(crate) fn insert_child(&mut self, index: usize, child: Key) {
		self.children.insert(index, child);
	}

	pub(crate) fn push_child(&mut self, child: Key) {
		self.children.push(child);
	}
}

/// Text payload.
///
/// Offsets are counted in characters, matching the rope's char indexing.
#[derive(Debug, Clone, Default)]
pub struct TextNode {
	content: Rope,
	formatting: Data,
	composition: Option<Composition>,
}

impl TextNode {
	pub(crate) fn new(text: &str, formatting: Data) -> Self {
		Self {
			content: Rope::from_str(text),
			formatting,
			composition: None,
		}
	}

	/// Returns the text content.
	pub fn content(&self) -> &Rope {
		&self.content
	}

	/// Returns the text content as an owned string.
	pub fn text(&self) -> String {
		self.content.to_string()
	}

	/// Returns the length in characters.
	pub fn len_chars(&self) -> usize {
		self.content.len_chars()
	}

	/// Returns the formatting record.
	pub fn formatting(&self) -> &Data {
		&self.formatting
	}

	/// Returns the in-progress composition, if any.
	pub fn composition(&self) -> Option<&Composition> {
		self.composition.as_ref()
	}

	pub(crate) fn formatting_mut(&mut self) -> &mut Data {
		&mut self.formatting
	}

	pub(crate) fn set_composition(&mut self, composition: Option<Composition>) -> Option<Composition> {
		std::mem::replace(&mut self.composition, composition)
	}

	pub(crate) fn insert(&mut self, offset: Offset, value: &str) {
		self.content.insert(offset, value);
	}

	pub(crate) fn remove(&mut self, offset: Offset, length: usize) {
		self.content.remove(offset..offset + length);
	}
}
