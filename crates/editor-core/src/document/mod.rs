//! Document - the keyed node tree.
//!
//! A [`Document`] stores every node in a slab arena and keeps a `Key → slot`
//! index next to it. Nodes reference children and parents by key only, so
//! sibling moves never leave dangling references behind.
//!
//! # Ownership
//!
//! Each element exclusively owns its children. A node has at most one parent,
//! and the parent link is a plain key used for traversal. Removing a node
//! from its parent's child list is what destroys it; there is no tombstoning.
//!
//! # Key uniqueness
//!
//! Every live node has a distinct [`Key`]. Registering a key twice is a
//! programming error and panics.


use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;
use slab::Slab;
use strata_primitives::{Data, Key, NodeValue, TYPE_FIELD};

use crate::error::{EditError, NodeKind, Result};
use crate::node::{ElementNode, Node, NodeData, TextNode};

/// Type tag carried by the root element.
pub const ROOT_TYPE: &str = "root";

/// A keyed tree of elements and text leaves.
#[derive(Debug, Clone)]
pub struct Document {
	/// Node storage.
	nodes: Slab<Node>,
	/// Maps each live key to its slot in `nodes`.
	index: FxHashMap<Key, usize>,
	/// The root element.
	root: Key,
}

impl Document {
	/// Creates a document holding only an empty root element.
	pub fn new() -> Self {
		let mut data = Data::new();
		data.insert(TYPE_FIELD.to_owned(), Value::String(ROOT_TYPE.to_owned()));

		let root = Key::next();
		let mut doc = Self {
			nodes: Slab::new(),
			index: FxHashMap::default(),
			root,
		};
		doc.register(Node::new(root, NodeData::Element(ElementNode::new(data))));
		doc
	}

	/// Creates a document whose root holds the given subtrees in order.
	pub fn from_values(children: impl IntoIterator<Item = NodeValue>) -> Self {
		let mut doc = Self::new();
		let root = doc.root;
		for value in children {
			let child = doc.create_node(&value);
			doc.attach_last(root, child);
		}
		doc
	}

	/// Returns the root element's key.
	pub fn root(&self) -> Key {
		self.root
	}

	/// Returns the number of nodes stored, including the root.
	#[allow(clippy::len_without_is_empty, reason = "a document always holds its root")]
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Returns true if `key` resolves to a stored node.
	pub fn contains(&self, key: Key) -> bool {
		self.index.contains_key(&key)
	}

	/// Looks up a node, returning `None` for unknown keys.
	pub fn try_get(&self, key: Key) -> Option<&Node> {
		self.index.get(&key).map(|&slot| &self.nodes[slot])
	}

	/// Looks up a node.
	///
	/// # Errors
	///
	/// Returns [`EditError::NodeNotFound`] if the key is unknown.
	pub fn get(&self, key: Key) -> Result<&Node> {
		self.try_get(key).ok_or(EditError::NodeNotFound(key))
	}

	pub(crate) fn get_mut(&mut self, key: Key) -> Result<&mut Node> {
		let slot = *self.index.get(&key).ok_or(EditError::NodeNotFound(key))?;
		Ok(&mut self.nodes[slot])
	}

	/// Looks up an element.
	///
	/// # Errors
	///
	/// Returns [`EditError::NodeNotFound`] or [`EditError::TypeMismatch`].
	pub fn element(&self, key: Key) -> Result<&ElementNode> {
		let node = self.get(key)?;
		node.as_element().ok_or(EditError::TypeMismatch {
			key,
			expected: NodeKind::Element,
			found: node.kind(),
		})
	}

	/// Looks up a text leaf.
	///
	/// # Errors
	///
	/// Returns [`EditError::NodeNotFound`] or [`EditError::TypeMismatch`].
	pub fn text(&self, key: Key) -> Result<&TextNode> {
		let node = self.get(key)?;
		node.as_text().ok_or(EditError::TypeMismatch {
			key,
			expected: NodeKind::Text,
			found: node.kind(),
		})
	}

	pub(crate) fn element_mut(&mut self, key: Key) -> Result<&mut ElementNode> {
		let node = self.get_mut(key)?;
		let found = node.kind();
		node.as_element_mut().ok_or(EditError::TypeMismatch {
			key,
			expected: NodeKind::Element,
			found,
		})
	}

	pub(crate) fn text_mut(&mut self, key: Key) -> Result<&mut TextNode> {
		let node = self.get_mut(key)?;
		let found = node.kind();
		node.as_text_mut().ok_or(EditError::TypeMismatch {
			key,
			expected: NodeKind::Text,
			found,
		})
	}

	/// Returns the parent key of a node (`None` for the root or a detached node).
	pub fn parent(&self, key: Key) -> Result<Option<Key>> {
		Ok(self.get(key)?.parent())
	}

	/// Returns the child keys of an element.
	pub fn children(&self, key: Key) -> Result<&[Key]> {
		Ok(self.element(key)?.children())
	}

	/// Returns the child count of an element.
	pub fn children_size(&self, key: Key) -> Result<usize> {
		Ok(self.element(key)?.children_size())
	}

	/// Returns the child of an element at `index`, if present.
	pub fn child_at(&self, key: Key, index: usize) -> Result<Option<&Node>> {
		match self.element(key)?.child(index) {
			Some(child) => self.get(child).map(Some),
			None => Ok(None),
		}
	}

	/// Returns the last child of an element, or `None` if it has no children.
	pub fn last_child(&self, key: Key) -> Result<Option<&Node>> {
		match self.element(key)?.last_child() {
			Some(child) => self.get(child).map(Some),
			None => Ok(None),
		}
	}

	/// Iterates over `key` and all of its descendants in document order.
	pub fn descendants(&self, key: Key) -> Result<Descendants<'_>> {
		self.get(key)?;
		Ok(Descendants {
			doc: self,
			stack: vec![key],
		})
	}

	/// Concatenates the text of every leaf below (and including) `key`.
	pub fn text_content(&self, key: Key) -> Result<String> {
		let mut out = String::new();
		for node in self.descendants(key)? {
			if let Some(text) = node.as_text() {
				out.extend(text.content().chunks());
			}
		}
		Ok(out)
	}

	/// Exports the subtree rooted at `key` as a serializable record.
	///
	/// Compositions are transient and are not exported.
	pub fn to_value(&self, key: Key) -> Result<NodeValue> {
		match &self.get(key)?.data {
			NodeData::Text(text) => Ok(NodeValue::Text {
				text: text.text(),
				formatting: text.formatting().clone(),
			}),
			NodeData::Element(element) => Ok(NodeValue::Element {
				children: element
					.children()
					.iter()
					.map(|&child| self.to_value(child))
					.collect::<Result<_>>()?,
				data: element.data().clone(),
			}),
		}
	}

	/// Builds a keyed subtree from a serializable record.
	///
	/// Every node in the subtree gets a fresh key. The subtree is detached:
	/// it stays unreachable from the root until it is inserted as a child,
	/// which the executor does for [`Operation::InsertNode`].
	///
	/// [`Operation::InsertNode`]: strata_primitives::Operation::InsertNode
	pub fn create_node(&mut self, value: &NodeValue) -> Key {
		self.build(value, &mut Key::next)
	}

	/// Builds a subtree like [`Document::create_node`], assigning `keys` to
	/// its nodes in pre-order.
	///
	/// Callers check `keys` against [`Document::check_new_keys`] beforehand.
	/// Nodes past the end of `keys` get fresh keys.
	pub(crate) fn create_node_with_keys(&mut self, value: &NodeValue, keys: &[Key]) -> Key {
		for key in keys {
			key.reserve();
		}
		let mut keys = keys.iter().copied();
		self.build(value, &mut || keys.next().unwrap_or_else(Key::next))
	}

	/// Checks that `keys` can name the nodes of `value`: one key per node, all
	/// distinct, none already live in this document.
	pub(crate) fn check_new_keys(&self, target: Key, value: &NodeValue, keys: &[Key]) -> Result<()> {
		let invalid = |reason: String| EditError::InvalidData { key: target, reason };
		let expected = value.node_count();
		if keys.len() != expected {
			return Err(invalid(format!("keys: expected {expected}, got {}", keys.len())));
		}
		let mut seen = FxHashSet::default();
		for key in keys {
			if self.contains(*key) || !seen.insert(*key) {
				return Err(invalid(format!("keys: {key} is already in use")));
			}
		}
		Ok(())
	}

	fn build(&mut self, value: &NodeValue, next_key: &mut impl FnMut() -> Key) -> Key {
		match value {
			NodeValue::Text { text, formatting } => {
				self.register(Node::new(next_key(), NodeData::Text(TextNode::new(text, formatting.clone()))))
			}
			NodeValue::Element { children, data } => {
				let key = self.register(Node::new(next_key(), NodeData::Element(ElementNode::new(data.clone()))));
				for child in children {
					let child = self.build(child, next_key);
					self.attach_last(key, child);
				}
				key
			}
		}
	}

	/// Inserts a detached node as the `index`-th child of `parent`.
	///
	/// Callers validate `parent` and `index` beforehand.
	pub(crate) fn attach(&mut self, parent: Key, index: usize, child: Key) -> Result<()> {
		self.element_mut(parent)?.insert_child(index, child);
		self.get_mut(child)?.set_parent(Some(parent));
		Ok(())
	}

	fn attach_last(&mut self, parent: Key, child: Key) {
		let slot = self.index[&parent];
		if let Some(element) = self.nodes[slot].as_element_mut() {
			element.push_child(child);
		}
		let slot = self.index[&child];
		self.nodes[slot].set_parent(Some(parent));
	}

	fn register(&mut self, node: Node) -> Key {
		let key = node.key();
		let slot = self.nodes.insert(node);
		let previous = self.index.insert(key, slot);
		assert!(previous.is_none(), "duplicate node key {key}");
		key
	}
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

/// Pre-order iterator over a subtree, see [`Document::descendants`].
pub struct Descendants<'a> {
	doc: &'a Document,
	stack: Vec<Key>,
}

impl<'a> Iterator for Descendants<'a> {
	type Item = &'a Node;

	fn next(&mut self) -> Option<Self::Item> {
		let key = self.stack.pop()?;
		let node = self.doc.try_get(key)?;
		if let Some(element) = node.as_element() {
			self.stack.extend(element.children().iter().rev());
		}
		Some(node)
	}
}
