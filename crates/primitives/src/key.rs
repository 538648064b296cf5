use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for generating process-unique node keys.
static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for a node in a document tree.
///
/// Keys are allocated once when a node is created and never reused within a
/// process. A key stays valid while the node's content changes, but a node
/// that is replaced by a new one gets a new key.
///
/// Addressing nodes by key rather than by path keeps operations valid while
/// sibling positions shift underneath them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(u64);

impl Key {
	/// Allocates a fresh key.
	pub fn next() -> Self {
		Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
	}

	/// Wraps a raw value, e.g. one read back from a recorded operation.
	pub const fn from_raw(raw: u64) -> Self {
		Self(raw)
	}

	/// Marks `self` as taken so [`Key::next`] never hands it out again.
	///
	/// Used when nodes are rebuilt under keys read back from a recorded
	/// operation.
	pub fn reserve(self) {
		NEXT_KEY.fetch_max(self.0.saturating_add(1), Ordering::Relaxed);
	}

	/// Returns the raw value.
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn next_keys_are_distinct() {
		let keys: HashSet<Key> = (0..1000).map(|_| Key::next()).collect();
		assert_eq!(keys.len(), 1000);
	}

	#[test]
	fn reserved_keys_are_skipped() {
		let ahead = Key::from_raw(Key::next().get() + 50);
		ahead.reserve();
		assert!(Key::next() > ahead);
	}

	#[test]
	fn serializes_as_bare_number() {
		let key = Key::from_raw(42);
		assert_eq!(serde_json::to_string(&key).unwrap(), "42");
		assert_eq!(serde_json::from_str::<Key>("42").unwrap(), key);
		assert_eq!(key.to_string(), "#42");
	}
}
