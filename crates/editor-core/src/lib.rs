//! Headless rich-text core: the keyed node tree, the operation executor,
//! range derivation, and the editing session that ties them together.

/// Session configuration.
pub mod config;
/// Range derivation after applied operations.
pub mod derive;
/// The keyed node tree.
pub mod document;
/// Editing session owning document, selection, and log.
pub mod editor;
/// Error types for editing.
pub mod error;
/// Operation executor.
pub mod executor;
/// Bounded operation log.
pub mod log;
/// Element and text nodes.
pub mod node;

pub use config::{ConfigError, EditorConfig};
pub use derive::{DrillDown, derive_range, drill_down};
pub use document::Document;
pub use editor::Editor;
pub use error::{EditError, NodeKind, Result};
pub use executor::{Applied, apply_operation};
pub use log::OperationLog;
pub use node::{ElementNode, Node, NodeData, TextNode};
pub use strata_primitives as primitives;
