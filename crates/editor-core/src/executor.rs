//! Operation executor.
//!
//! Applies one [`Operation`] to a [`Document`]. The executor only mutates the
//! tree; the caret that follows the mutation is computed afterwards by
//! [`derive_range`](crate::derive_range) from the same operation.
//!
//! Every check runs before the first mutation, so a rejected operation has no
//! partial effect. Out-of-range offsets are rejected, never clamped.

use serde_json::Value;
use strata_primitives::{COMPOSITION_FIELD, Composition, Data, Key, NodeValue, Offset, Operation, merge_data};

use crate::document::Document;
use crate::error::{EditError, Result};

/// What an applied operation changed, beyond the operation record itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Applied {
	/// Keys of the nodes an insert-node operation created, in pre-order.
	/// The first one is the inserted subtree's root.
	pub created: Vec<Key>,
}

/// Applies `op` to `doc`.
///
/// # Errors
///
/// - [`EditError::NodeNotFound`] if the target key is unknown.
/// - [`EditError::TypeMismatch`] if the target has the wrong variant.
/// - [`EditError::OutOfBounds`] if an offset or length exceeds the target.
/// - [`EditError::CompositionActive`] for text edits during composition.
/// - [`EditError::InvalidData`] for a malformed composition record.
pub fn apply_operation(doc: &mut Document, op: &Operation) -> Result<Applied> {
	let result = match op {
		Operation::InsertText { key, offset, value } => insert_text(doc, *key, *offset, value),
		Operation::DeleteText { key, offset, length } => delete_text(doc, *key, *offset, *length),
		Operation::InsertNode { key, offset, value, keys } => insert_node(doc, *key, *offset, value, keys),
		Operation::UpdateData { key, data, .. } => update_data(doc, *key, data),
		Operation::UpdateFormat { key, data, .. } => update_format(doc, *key, data),
	};

	match &result {
		Ok(applied) => tracing::trace!(kind = %op.kind(), key = %op.key(), created = applied.created.len(), "applied operation"),
		Err(err) => tracing::warn!(kind = %op.kind(), key = %op.key(), error = %err, "operation rejected"),
	}
	result
}

fn insert_text(doc: &mut Document, key: Key, offset: Offset, value: &str) -> Result<Applied> {
	let text = doc.text(key)?;
	if text.composition().is_some() {
		return Err(EditError::CompositionActive(key));
	}
	check_bounds(key, offset, text.len_chars())?;

	doc.text_mut(key)?.insert(offset, value);
	Ok(Applied::default())
}

fn delete_text(doc: &mut Document, key: Key, offset: Offset, length: usize) -> Result<Applied> {
	let text = doc.text(key)?;
	if text.composition().is_some() {
		return Err(EditError::CompositionActive(key));
	}
	let len = text.len_chars();
	check_bounds(key, offset, len)?;
	let end = offset.checked_add(length).ok_or(EditError::OutOfBounds { key, offset, len })?;
	check_bounds(key, end, len)?;

	if length > 0 {
		doc.text_mut(key)?.remove(offset, length);
	}
	Ok(Applied::default())
}

fn insert_node(doc: &mut Document, key: Key, offset: Offset, value: &Value, keys: &[Key]) -> Result<Applied> {
	check_bounds(key, offset, doc.children_size(key)?)?;

	let Some(value) = NodeValue::from_json(value) else {
		tracing::debug!(key = %key, offset, "insert_node value has nothing insertable");
		return Ok(Applied::default());
	};

	let child = if keys.is_empty() {
		doc.create_node(&value)
	} else {
		doc.check_new_keys(key, &value, keys)?;
		doc.create_node_with_keys(&value, keys)
	};
	doc.attach(key, offset, child)?;
	let created = doc.descendants(child)?.map(|node| node.key()).collect();
	Ok(Applied { created })
}

fn update_data(doc: &mut Document, key: Key, patch: &Data) -> Result<Applied> {
	if doc.get(key)?.is_element() {
		merge_data(doc.element_mut(key)?.data_mut(), patch);
		return Ok(Applied::default());
	}

	let composition = match patch.get(COMPOSITION_FIELD) {
		None => None,
		Some(Value::Null) => Some(None),
		Some(raw) => {
			let composition: Composition = serde_json::from_value(raw.clone()).map_err(|err| EditError::InvalidData {
				key,
				reason: format!("{COMPOSITION_FIELD}: {err}"),
			})?;
			check_bounds(key, composition.offset, doc.text(key)?.len_chars())?;
			Some(Some(composition))
		}
	};

	let text = doc.text_mut(key)?;
	if let Some(composition) = composition {
		text.set_composition(composition);
	}
	let rest: Data = patch
		.iter()
		.filter(|(field, _)| field.as_str() != COMPOSITION_FIELD)
		.map(|(field, value)| (field.clone(), value.clone()))
		.collect();
	merge_data(text.formatting_mut(), &rest);
	Ok(Applied::default())
}

fn update_format(doc: &mut Document, key: Key, patch: &Data) -> Result<Applied> {
	merge_data(doc.text_mut(key)?.formatting_mut(), patch);
	Ok(Applied::default())
}

fn check_bounds(key: Key, offset: Offset, len: usize) -> Result<()> {
	if offset > len {
		return Err(EditError::OutOfBounds { key, offset, len });
	}
	Ok(())
}
