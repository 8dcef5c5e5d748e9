//! Cache Module
//!
//! In-process read-through cache with TTL expiration, FIFO eviction and
//! soft memory accounting.

mod clock;
mod entry;
mod order;
mod shared;
mod stats;
mod store;
pub mod weigh;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, EntryInfo};
pub use order::InsertionOrder;
pub use shared::SharedCache;
pub use stats::{CacheStats, StatsCounters};
pub use store::CacheStore;
pub use weigh::Weigh;
