//! Cache Statistics Module
//!
//! Tracks storage activity: lookups, writes and store lifecycle operations.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache storage activity.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups that found a stored response
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of responses written
    pub writes: u64,
    /// Number of open calls (including implicit creates)
    pub opens: u64,
    /// Number of stores deleted
    pub deletions: u64,
    /// Current number of entries across all stores
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total lookups performed.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_writes(&mut self, count: usize) {
        self.writes += count as u64;
    }

    pub fn record_open(&mut self) {
        self.opens += 1;
    }

    pub fn record_deletion(&mut self) {
        self.deletions += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
