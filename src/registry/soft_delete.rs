//! # Soft-Delete Registry
//!
//! The shared storage pattern behind every manager in this module tree: a live
//! map of `uid -> Arc<entity>` plus an append-only removed history. Both maps
//! sit behind one lock so `remove` (read live entry, append to history, delete
//! from live) is a single critical section rather than three independently
//! locked steps.
//!
//! Uids are unique among live entries at any instant but may recur across
//! history; each removal of a reused uid appends another archived entry.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// A removed entity together with the instant it was archived.
#[derive(Debug)]
pub struct ArchivedEntry<T> {
    entity: Arc<T>,
    removed_at: DateTime<Utc>,
}

impl<T> ArchivedEntry<T> {
    pub fn entity(&self) -> &Arc<T> {
        &self.entity
    }

    pub fn removed_at(&self) -> DateTime<Utc> {
        self.removed_at
    }
}

impl<T> Clone for ArchivedEntry<T> {
    fn clone(&self) -> Self {
        Self {
            entity: Arc::clone(&self.entity),
            removed_at: self.removed_at,
        }
    }
}

struct Maps<T> {
    live: HashMap<String, Arc<T>>,
    removed: HashMap<String, Vec<ArchivedEntry<T>>>,
}

/// Thread-safe live map plus removed history.
pub struct SoftDeleteRegistry<T> {
    maps: RwLock<Maps<T>>,
}

impl<T> SoftDeleteRegistry<T> {
    pub fn new() -> Self {
        Self {
            maps: RwLock::new(Maps {
                live: HashMap::new(),
                removed: HashMap::new(),
            }),
        }
    }

    /// The live entity for `uid`, or `None` when absent.
    pub fn get(&self, uid: &str) -> Option<Arc<T>> {
        self.maps.read().live.get(uid).map(Arc::clone)
    }

    /// Existence check for a live entity under a read lock.
    pub fn is_present(&self, uid: &str) -> bool {
        self.maps.read().live.contains_key(uid)
    }

    /// Insert or overwrite the live entity for `uid`. Last writer wins; an
    /// overwritten entity is discarded, not archived.
    pub fn set(&self, uid: impl Into<String>, entity: Arc<T>) {
        self.maps.write().live.insert(uid.into(), entity);
    }

    /// The live entity for `uid`, inserting the result of `make` under the
    /// write lock when absent. Closes the check-then-act gap of a separate
    /// `is_present` + `set` pair.
    pub fn get_or_insert_with(&self, uid: &str, make: impl FnOnce() -> Arc<T>) -> Arc<T> {
        let mut maps = self.maps.write();
        Arc::clone(
            maps.live
                .entry(uid.to_string())
                .or_insert_with(make),
        )
    }

    /// Drop the live entity for `uid` without archiving it.
    pub fn delete(&self, uid: &str) {
        self.maps.write().live.remove(uid);
    }

    /// Move the live entity for `uid` into its removed history. Returns the
    /// archived entity, or `None` when no live entity exists. Runs as one
    /// critical section.
    pub fn remove(&self, uid: &str) -> Option<Arc<T>> {
        let mut maps = self.maps.write();
        let entity = maps.live.remove(uid)?;
        maps.removed
            .entry(uid.to_string())
            .or_default()
            .push(ArchivedEntry {
                entity: Arc::clone(&entity),
                removed_at: Utc::now(),
            });
        Some(entity)
    }

    /// Every archived entry for `uid`, oldest first.
    pub fn removed_history(&self, uid: &str) -> Vec<ArchivedEntry<T>> {
        self.maps
            .read()
            .removed
            .get(uid)
            .cloned()
            .unwrap_or_default()
    }

    /// Uids with a non-empty removed history.
    pub fn removed_uids(&self) -> Vec<String> {
        self.maps.read().removed.keys().cloned().collect()
    }

    /// Uids of all live entities.
    pub fn live_uids(&self) -> Vec<String> {
        self.maps.read().live.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.maps.read().live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.read().live.is_empty()
    }
}

impl<T> Default for SoftDeleteRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
