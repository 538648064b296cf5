use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::range::Offset;

/// Free-form attribute record attached to nodes.
///
/// Elements keep their attributes (including the `type` tag) here; text
/// leaves keep their formatting (font size, bold, ...).
pub type Data = Map<String, Value>;

/// Field of an update-data patch that drives a text node's composition.
pub const COMPOSITION_FIELD: &str = "composition";

/// Field holding an element's type tag.
pub const TYPE_FIELD: &str = "type";

/// Merges `patch` into `target`.
///
/// Every field named by the patch is overwritten. A `null` value removes the
/// field instead of storing `null`.
pub fn merge_data(target: &mut Data, patch: &Data) {
	for (field, value) in patch {
		if value.is_null() {
			target.remove(field);
		} else {
			target.insert(field.clone(), value.clone());
		}
	}
}

/// Uncommitted input-method text anchored inside a text node.
///
/// The composed text is not part of the node's content until it is
/// committed; the caret tracks its end while composing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
	/// The not-yet-committed composed string.
	pub text: String,
	/// Character offset in the text node where the composition starts.
	pub offset: Offset,
}

impl Composition {
	/// Creates a composition anchored at `offset`.
	pub fn new(text: impl Into<String>, offset: Offset) -> Self {
		Self {
			text: text.into(),
			offset,
		}
	}

	/// Returns the offset just past the composed text.
	pub fn end(&self) -> Offset {
		self.offset + self.text.chars().count()
	}
}
