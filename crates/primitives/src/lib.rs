//! Core types for rich-text editing: keys, ranges, selections, and operations.

/// Free-form data records and input-method composition state.
pub mod data;
/// Process-unique node keys.
pub mod key;
/// The closed set of tree-mutating operations.
pub mod operation;
/// Points and ranges addressed by node key.
pub mod range;
/// The single active range exposed to rendering.
pub mod selection;
/// Serializable node records consumed by create_node.
pub mod value;

pub use data::{COMPOSITION_FIELD, Composition, Data, TYPE_FIELD, merge_data};
pub use key::Key;
pub use operation::{Operation, OperationKind};
pub use range::{Offset, Point, Range};
pub use selection::Selection;
pub use value::NodeValue;
