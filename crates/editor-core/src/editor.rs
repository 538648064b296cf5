//! Editor session: the document, its selection, and the operation log.
//!
//! [`Editor::apply`] is the single entry point for edits. It runs the
//! executor, derives the follow-up range from the same operation against the
//! mutated tree, and replaces the selection, all before returning. Callers
//! never observe a tree whose selection has not caught up yet.
//!
//! # Composition
//!
//! Input-method composition spans several events. The session tracks the one
//! text node currently composing:
//!
//! - [`start_composition`](Editor::start_composition) and
//!   [`update_composition`](Editor::update_composition) emit update-data
//!   operations carrying the composed text.
//! - [`commit_composition`](Editor::commit_composition) clears the
//!   composition and inserts the composed text as ordinary text.
//! - [`cancel_composition`](Editor::cancel_composition) drops the composition
//!   without emitting any operation.

#[cfg(test)]
mod tests;

use strata_primitives::{COMPOSITION_FIELD, Composition, Key, Offset, Operation, Point, Range, Selection};

use crate::config::EditorConfig;
use crate::derive::derive_range;
use crate::document::Document;
use crate::error::{EditError, Result};
use crate::executor::apply_operation;
use crate::log::OperationLog;
use crate::node::{Node, NodeData};

/// An editing session over one document.
#[derive(Debug, Clone)]
pub struct Editor {
	document: Document,
	selection: Selection,
	log: OperationLog,
	config: EditorConfig,
	/// Text node with an in-progress composition.
	composing: Option<Key>,
}

impl Editor {
	/// Creates a session with the default configuration.
	///
	/// The selection starts as a caret at the start of the root.
	pub fn new(document: Document) -> Self {
		Self::with_config(document, EditorConfig::default())
	}

	/// Creates a session with an explicit configuration.
	pub fn with_config(document: Document, config: EditorConfig) -> Self {
		let selection = Selection::caret(document.root(), 0);
		Self {
			document,
			selection,
			log: OperationLog::new(config.log_capacity),
			config,
			composing: None,
		}
	}

	/// Returns the document.
	pub fn document(&self) -> &Document {
		&self.document
	}

	/// Returns the current selection.
	pub fn selection(&self) -> Selection {
		self.selection
	}

	/// Returns the operation log.
	pub fn log(&self) -> &OperationLog {
		&self.log
	}

	/// Returns the session configuration.
	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	/// Returns the text node currently composing, if any.
	pub fn composing(&self) -> Option<Key> {
		self.composing
	}

	/// Applies an operation and moves the selection to its derived range.
	///
	/// Returns the derived range, or `None` when the operation leaves the
	/// selection unchanged.
	///
	/// # Errors
	///
	/// Propagates executor and derivation errors. A rejected operation leaves
	/// the document, selection, and log untouched.
	///
	/// The logged copy of an insert-node operation is pinned to the keys the
	/// executor created.
	pub fn apply(&mut self, op: Operation) -> Result<Option<Range>> {
		let _span = tracing::trace_span!("apply", kind = %op.kind(), key = %op.key()).entered();

		let composition =
			composition_change(&op).filter(|(key, _)| self.document.try_get(*key).is_some_and(Node::is_text));
		if let Some((key, true)) = composition
			&& let Some(active) = self.composing
			&& active != key
		{
			return Err(EditError::CompositionActive(active));
		}

		let applied = apply_operation(&mut self.document, &op)?;
		let range = derive_range(&self.document, &op)?;

		if let Some((key, sets)) = composition {
			if sets {
				self.composing = Some(key);
			} else if self.composing == Some(key) {
				self.composing = None;
			}
		}

		if let Some(range) = range {
			let previous = self.selection.replace(range);
			tracing::trace!(?previous, ?range, "selection replaced");
		}
		if self.config.record_operations {
			self.log.record(op.with_keys(applied.created));
		}
		Ok(range)
	}

	/// Applies operations in order, stopping at the first error.
	///
	/// Operations before the failing one stay applied. Recorded insert-node
	/// operations carry the keys they created, so a log replayed onto the
	/// document it started from addresses the same nodes.
	pub fn replay(&mut self, ops: impl IntoIterator<Item = Operation>) -> Result<()> {
		for op in ops {
			self.apply(op)?;
		}
		Ok(())
	}

	/// Replaces the selection after checking both points against the tree.
	///
	/// # Errors
	///
	/// Returns [`EditError::NodeNotFound`] or [`EditError::OutOfBounds`].
	pub fn set_selection(&mut self, range: Range) -> Result<()> {
		self.check_point(range.anchor)?;
		self.check_point(range.focus)?;
		self.selection.replace(range);
		Ok(())
	}

	/// Starts composing inside text node `key` at `offset`.
	///
	/// # Errors
	///
	/// Returns [`EditError::CompositionActive`] if a composition is already in
	/// progress, or the executor's error for an invalid target.
	pub fn start_composition(&mut self, key: Key, offset: Offset) -> Result<Range> {
		if let Some(active) = self.composing {
			return Err(EditError::CompositionActive(active));
		}
		let range = self.apply_composition(key, Composition::new("", offset))?;
		tracing::debug!(key = %key, offset, "composition started");
		Ok(range)
	}

	/// Replaces the composed text of the active composition.
	///
	/// # Errors
	///
	/// Returns [`EditError::NoComposition`] if nothing is composing.
	pub fn update_composition(&mut self, text: &str) -> Result<Range> {
		let (key, composition) = self.active_composition()?;
		self.apply_composition(key, Composition::new(text, composition.offset))
	}

	/// Commits the composed text into the node and ends the composition.
	///
	/// Returns the caret after the committed text, or the anchor when the
	/// composed text was empty.
	///
	/// # Errors
	///
	/// Returns [`EditError::NoComposition`] if nothing is composing.
	pub fn commit_composition(&mut self) -> Result<Range> {
		let (key, composition) = self.active_composition()?;
		self.apply(Operation::clear_composition(key, composition.offset))?;

		let range = if composition.text.is_empty() {
			let range = Range::caret(key, composition.offset);
			self.selection.replace(range);
			range
		} else {
			self.apply(Operation::insert_text(key, composition.offset, composition.text.as_str()))?
				.unwrap_or_else(|| self.selection.range())
		};
		tracing::debug!(key = %key, committed = %composition.text, "composition committed");
		Ok(range)
	}

	/// Discards the active composition without emitting an operation.
	///
	/// The caret returns to the composition anchor.
	///
	/// # Errors
	///
	/// Returns [`EditError::NoComposition`] if nothing is composing.
	pub fn cancel_composition(&mut self) -> Result<Range> {
		let (key, composition) = self.active_composition()?;
		self.document.text_mut(key)?.set_composition(None);
		self.composing = None;

		let range = Range::caret(key, composition.offset);
		self.selection.replace(range);
		tracing::debug!(key = %key, "composition cancelled");
		Ok(range)
	}

	fn apply_composition(&mut self, key: Key, composition: Composition) -> Result<Range> {
		let range = self.apply(Operation::set_composition(key, &composition))?;
		Ok(range.unwrap_or_else(|| Range::caret(key, composition.end())))
	}

	fn active_composition(&self) -> Result<(Key, Composition)> {
		let key = self.composing.ok_or(EditError::NoComposition)?;
		let composition = self.document.text(key)?.composition().cloned().ok_or(EditError::NoComposition)?;
		Ok((key, composition))
	}

	fn check_point(&self, point: Point) -> Result<()> {
		let len = match &self.document.get(point.key)?.data {
			NodeData::Text(text) => text.len_chars(),
			NodeData::Element(element) => element.children_size(),
		};
		if point.offset > len {
			return Err(EditError::OutOfBounds {
				key: point.key,
				offset: point.offset,
				len,
			});
		}
		Ok(())
	}
}

/// Returns the target of an update-data operation touching the composition
/// field, and whether it sets (`true`) or clears (`false`) it.
fn composition_change(op: &Operation) -> Option<(Key, bool)> {
	match op {
		Operation::UpdateData { key, data, .. } => data.get(COMPOSITION_FIELD).map(|value| (*key, !value.is_null())),
		_ => None,
	}
}
