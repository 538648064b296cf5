//! Bounded record of applied operations.
//!
//! The log keeps the canonical wire records of what was applied, oldest
//! first, so an external history or collaboration layer can export and replay
//! them. It is not an undo history: nothing here inverts an operation.

use std::collections::VecDeque;

use strata_primitives::Operation;

/// Default maximum number of retained operations.
pub const DEFAULT_LOG_CAPACITY: usize = 1024;

/// FIFO of applied operations with a fixed capacity.
///
/// When full, recording a new operation drops the oldest one.
#[derive(Debug, Clone)]
pub struct OperationLog {
	entries: VecDeque<Operation>,
	capacity: usize,
	/// Operations dropped from the front since creation or the last clear.
	evicted: usize,
}

impl OperationLog {
	/// Creates an empty log retaining at most `capacity` operations.
	pub fn new(capacity: usize) -> Self {
		Self {
			entries: VecDeque::with_capacity(capacity.min(DEFAULT_LOG_CAPACITY)),
			capacity,
			evicted: 0,
		}
	}

	/// Appends an applied operation, evicting the oldest one if full.
	pub fn record(&mut self, op: Operation) {
		if self.capacity == 0 {
			self.evicted += 1;
			return;
		}
		if self.entries.len() == self.capacity {
			self.entries.pop_front();
			self.evicted += 1;
		}
		self.entries.push_back(op);
	}

	/// Returns the number of retained operations.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if nothing is retained.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the maximum number of retained operations.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Returns how many operations were dropped to respect the capacity.
	pub fn evicted(&self) -> usize {
		self.evicted
	}

	/// Iterates over retained operations, oldest first.
	pub fn iter(&self) -> impl Iterator<Item = &Operation> {
		self.entries.iter()
	}

	/// Drops every retained operation.
	pub fn clear(&mut self) {
		self.entries.clear();
		self.evicted = 0;
	}

	/// Serializes the retained operations as a JSON array of wire records.
	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(&self.entries)
	}
}

impl Default for OperationLog {
	fn default() -> Self {
		Self::new(DEFAULT_LOG_CAPACITY)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use strata_primitives::Key;

	use super::*;

	#[test]
	fn evicts_oldest_when_full() {
		let key = Key::from_raw(1);
		let mut log = OperationLog::new(2);
		for offset in 0..3 {
			log.record(Operation::delete_text(key, offset, 0));
		}

		let offsets: Vec<_> = log.iter().map(Operation::offset).collect();
		assert_eq!(offsets, [1, 2]);
		assert_eq!(log.evicted(), 1);

		log.clear();
		assert!(log.is_empty());
		assert_eq!(log.evicted(), 0);
	}

	#[test]
	fn exports_wire_records() {
		let mut log = OperationLog::default();
		log.record(Operation::insert_text(Key::from_raw(5), 0, "a"));
		assert_eq!(
			log.to_json().unwrap(),
			r#"[{"kind":"insert_text","key":5,"offset":0,"value":"a"}]"#
		);

		let replayed: Vec<Operation> = serde_json::from_str(&log.to_json().unwrap()).unwrap();
		assert_eq!(replayed, log.iter().cloned().collect::<Vec<_>>());
	}
}
