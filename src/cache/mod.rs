//! Session-scoped user cache.
//!
//! Maps user ids to records fetched earlier in the session so repeat
//! draws skip the remote read. Entries are never evicted or expired.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::User;

/// In-memory id → record map.
#[derive(Debug, Default)]
pub struct UserCache {
    entries: HashMap<u32, Arc<User>>,
}

impl UserCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached record.
    pub fn get(&self, id: u32) -> Option<Arc<User>> {
        self.entries.get(&id).cloned()
    }

    /// Store a record under `id`.
    ///
    /// Overlapping fetches for the same id may both land here; the later
    /// insert replaces the earlier one.
    pub fn insert(&mut self, id: u32, user: Arc<User>) {
        self.entries.insert(id, user);
    }

    /// Returns `true` if a record is cached for `id`.
    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached ids in ascending order.
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Compute statistics about the cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
        }
    }
}

/// Statistics about the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached records.
    pub entries: usize,
}

impl CacheStats {
    /// Human-readable summary, e.g. `3 cached users`.
    pub fn summary(&self) -> String {
        match self.entries {
            1 => "1 cached user".to_string(),
            n => format!("{n} cached users"),
        }
    }
}
