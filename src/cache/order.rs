//! Insertion Order Module
//!
//! Tracks insertion order for FIFO eviction. Reads never reorder keys.

use std::collections::BTreeMap;

// == Insertion Order ==
/// Maps insertion sequence numbers to keys.
///
/// The smallest sequence is the oldest insertion and the next eviction
/// candidate. Re-inserting a key gives it a new, larger sequence.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    by_sequence: BTreeMap<u64, String>,
    next_sequence: u64,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push ==
    /// Records a new insertion of `key` and returns its sequence.
    ///
    /// Callers must `remove` the key's previous sequence on overwrite.
    pub fn push(&mut self, key: &str) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.by_sequence.insert(sequence, key.to_string());
        sequence
    }

    // == Remove ==
    /// Forgets the insertion with the given sequence.
    pub fn remove(&mut self, sequence: u64) -> Option<String> {
        self.by_sequence.remove(&sequence)
    }

    // == Pop Oldest ==
    /// Returns and removes the oldest key with its sequence.
    pub fn pop_oldest(&mut self) -> Option<(u64, String)> {
        self.by_sequence.pop_first()
    }

    /// Keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (&u64, &String)> {
        self.by_sequence.iter()
    }

    pub fn clear(&mut self) {
        self.by_sequence.clear();
    }

    // == Length ==
    /// Returns the number of tracked insertions.
    pub fn len(&self) -> usize {
        self.by_sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_sequence.is_empty()
    }
}
