//! Size Estimation Module
//!
//! Approximate byte footprint of cached values, used for the soft memory limit.
//! Estimates are the UTF-8 length of a value's JSON form, not native memory.

use std::io;

use serde::Serialize;

// == Weigh Trait ==
/// Estimates how many bytes a value occupies in the cache.
pub trait Weigh {
    /// Returns the estimated size in bytes.
    fn weigh(&self) -> usize;
}

impl Weigh for String {
    fn weigh(&self) -> usize {
        self.len()
    }
}

impl Weigh for serde_json::Value {
    fn weigh(&self) -> usize {
        json_size(self)
    }
}

/// Length of the compact JSON serialization of `value`.
///
/// Values that fail to serialize (e.g. maps with non-string keys) weigh
/// their shallow in-memory size instead.
pub fn json_size<T: Serialize + ?Sized>(value: &T) -> usize {
    let mut counter = ByteCounter(0);
    match serde_json::to_writer(&mut counter, value) {
        Ok(()) => counter.0,
        Err(_) => std::mem::size_of_val(value),
    }
}

/// Writer that only counts the bytes it is given.
struct ByteCounter(usize);

impl io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Footprint of a whole entry: the key plus the value.
pub fn entry_size<V: Weigh>(key: &str, value: &V) -> usize {
    key.len().saturating_add(value.weigh())
}
