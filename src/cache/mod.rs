//! Cache Module
//!
//! Named, versioned stores of captured responses.

mod entry;
mod stats;
mod storage;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use storage::{CacheStorage, MemoryStorage};
pub use store::CacheStore;
