//! Cache Store Module
//!
//! Main cache engine combining the key index, the recency list, and the
//! capacity governor into the public operation set.
//!
//! Every operation goes through the same three structures: look the key
//! up in the index, manipulate the list through the handle, and settle
//! the byte accounting with the governor. The store itself is not
//! synchronized; callers wrap it in a single exclusive lock (see
//! `api::AppState`).

use std::collections::HashMap;

use tracing::debug;

use crate::cache::entry::footprint_of;
use crate::cache::list::NodeIndex;
use crate::cache::{CacheStats, CapacityGovernor, Entry, RecencyList};

// == Cache Store ==
/// Byte-bounded key-value store with strict LRU eviction.
///
/// The recency list owns all entry storage; the index maps keys to list
/// handles; the governor keeps the aggregate footprint within the fixed
/// maximum capacity. Index keys and list membership are always in
/// one-to-one correspondence after each operation.
#[derive(Debug)]
pub struct CacheStore {
    /// Key → list handle lookup
    index: HashMap<String, NodeIndex>,
    /// Entries in recency order, most recent first
    list: RecencyList,
    /// Aggregate byte accounting against the fixed capacity
    governor: CapacityGovernor,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore bounded by `max_capacity` bytes.
    ///
    /// The capacity bounds the sum of entry footprints (key length plus
    /// value length) and is fixed for the lifetime of the store.
    pub fn new(max_capacity: usize) -> Self {
        Self {
            index: HashMap::new(),
            list: RecencyList::new(),
            governor: CapacityGovernor::new(max_capacity),
            stats: CacheStats::new(),
        }
    }

    // == Put ==
    /// Stores a key-value pair, overwriting any existing value.
    ///
    /// Evicts least-recently-used entries as needed to make room. Returns
    /// false only if the entry's footprint alone exceeds the maximum
    /// capacity; in that case nothing is evicted and nothing changes.
    pub fn put(&mut self, key: &str, value: String) -> bool {
        let stored = match self.index.get(key).copied() {
            Some(idx) => self.overwrite(idx, value),
            None => self.insert(key, value),
        };
        self.refresh_usage();
        self.check_coherence();
        stored
    }

    // == Put If Absent ==
    /// Stores a key-value pair only if the key is not already present.
    ///
    /// Returns false without mutating anything if the key exists or the
    /// entry could never fit.
    pub fn put_if_absent(&mut self, key: &str, value: String) -> bool {
        if self.index.contains_key(key) {
            return false;
        }
        let stored = self.insert(key, value);
        self.refresh_usage();
        self.check_coherence();
        stored
    }

    // == Set ==
    /// Updates the value of an existing key.
    ///
    /// Returns false without mutating anything if the key is absent or
    /// the new value could never fit.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        let Some(idx) = self.index.get(key).copied() else {
            return false;
        };
        let stored = self.overwrite(idx, value);
        self.refresh_usage();
        self.check_coherence();
        stored
    }

    // == Delete ==
    /// Removes an entry by key, releasing its footprint.
    ///
    /// Returns false if the key is absent.
    pub fn delete(&mut self, key: &str) -> bool {
        let Some(idx) = self.index.remove(key) else {
            return false;
        };
        let entry = self.list.remove(idx);
        self.governor.release(entry.footprint());
        self.refresh_usage();
        self.check_coherence();
        true
    }

    // == Get ==
    /// Retrieves a value by key, promoting the entry to most recently
    /// used.
    ///
    /// The value is copied out so no reference into the store survives
    /// past the caller's lock scope.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.index.get(key).copied() {
            Some(idx) => {
                self.list.move_to_front(idx);
                self.stats.record_hit();
                Some(self.list.entry(idx).value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Contains ==
    /// Returns true if the key is present, without promoting the entry
    /// or touching the hit/miss counters.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_usage(self.list.len(), self.governor.used());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    // == Used Bytes ==
    /// Returns the aggregate footprint of all stored entries.
    pub fn used_bytes(&self) -> usize {
        self.governor.used()
    }

    // == Max Capacity ==
    /// Returns the fixed maximum capacity in bytes.
    pub fn max_capacity(&self) -> usize {
        self.governor.max_capacity()
    }

    // == Internal: Insert Path ==
    /// Inserts a new entry at the front, evicting from the back until it
    /// fits. The caller has verified the key is absent.
    fn insert(&mut self, key: &str, value: String) -> bool {
        let footprint = footprint_of(key, &value);
        if !self.reserve(footprint) {
            return false;
        }
        let idx = self.list.push_front(Entry::new(key.to_string(), value));
        self.index.insert(key.to_string(), idx);
        self.governor.charge(footprint);
        true
    }

    // == Internal: Overwrite Path ==
    /// Overwrites the value of an existing entry in place and promotes it.
    ///
    /// The old footprint is released before reserving the new one, so a
    /// same-key update never competes with its own previous value for
    /// space. On failure the old accounting is restored and the entry is
    /// left untouched.
    fn overwrite(&mut self, idx: NodeIndex, value: String) -> bool {
        let old_footprint = self.list.entry(idx).footprint();
        let new_footprint = self.list.entry(idx).key.len() + value.len();

        self.governor.release(old_footprint);
        if !self.governor.would_ever_fit(new_footprint) {
            self.governor.charge(old_footprint);
            return false;
        }

        // Promote before evicting so the entry being updated can never be
        // the back of the list while space is reclaimed.
        self.list.move_to_front(idx);
        if !self.reserve(new_footprint) {
            self.governor.charge(old_footprint);
            return false;
        }

        *self.list.value_mut(idx) = value;
        self.governor.charge(new_footprint);
        true
    }

    // == Internal: Reserve ==
    /// Makes room for `additional` bytes, evicting least-recently-used
    /// entries until they fit.
    ///
    /// The oversized-entry check comes first: a request that could not
    /// fit even with the store empty fails before any eviction happens.
    fn reserve(&mut self, additional: usize) -> bool {
        if !self.governor.would_ever_fit(additional) {
            return false;
        }
        while !self.governor.fits(additional) {
            if !self.evict_lru() {
                return false;
            }
        }
        true
    }

    // == Internal: Evict ==
    /// Evicts the least recently used entry. Returns false if the list
    /// is empty.
    fn evict_lru(&mut self) -> bool {
        let Some(back) = self.list.back() else {
            return false;
        };
        let entry = self.list.remove(back);
        self.index.remove(&entry.key);
        self.governor.release(entry.footprint());
        self.stats.record_eviction();
        debug!(
            key = %entry.key,
            bytes = entry.footprint(),
            "evicted least recently used entry"
        );
        true
    }

    // == Internal: Bookkeeping ==
    /// Refreshes the usage figures carried by the stats counters.
    fn refresh_usage(&mut self) {
        self.stats.set_usage(self.list.len(), self.governor.used());
    }

    /// Asserts index/list/accounting coherence in debug builds.
    ///
    /// Divergence here is a programming error in the store, never a
    /// recoverable runtime condition.
    fn check_coherence(&self) {
        if cfg!(debug_assertions) {
            debug_assert_eq!(
                self.index.len(),
                self.list.len(),
                "index and list disagree on entry count"
            );
            let mut bytes = 0;
            for key in self.list.keys_front_to_back() {
                let idx = self
                    .index
                    .get(key)
                    .expect("list entry missing from the index");
                debug_assert_eq!(self.list.entry(*idx).key, key);
                bytes += self.list.entry(*idx).footprint();
            }
            debug_assert_eq!(
                bytes,
                self.governor.used(),
                "aggregate footprint out of sync with accounting"
            );
            debug_assert!(
                self.governor.used() <= self.governor.max_capacity(),
                "capacity invariant violated"
            );
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    /// Pads a string with spaces to a fixed length, mirroring fixed
    /// footprint entries.
    fn pad_space(s: &str, length: usize) -> String {
        let mut result = s.to_string();
        while result.len() < length {
            result.push(' ');
        }
        result
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(1024);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.used_bytes(), 0);
        assert_eq!(store.max_capacity(), 1024);
    }

    #[test]
    fn test_put_and_get_two_entries() {
        // Capacity 40 bytes, entries of footprint 8 each.
        let mut store = CacheStore::new(40);

        assert!(store.put("KEY1", "val1".to_string()));
        assert!(store.put("KEY2", "val2".to_string()));

        assert_eq!(store.get("KEY1"), Some("val1".to_string()));
        assert_eq!(store.get("KEY2"), Some("val2".to_string()));
        assert_eq!(store.used_bytes(), 16);
    }

    #[test]
    fn test_get_nonexistent() {
        let mut store = CacheStore::new(1024);
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_put_overwrites_value() {
        let mut store = CacheStore::new(1024);

        assert!(store.put("KEY1", "val1".to_string()));
        assert!(store.put("KEY1", "val2".to_string()));

        // Overwrite semantics, not append.
        assert_eq!(store.get("KEY1"), Some("val2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_put_if_absent_does_not_clobber() {
        let mut store = CacheStore::new(1024);

        assert!(store.put("KEY1", "val1".to_string()));
        assert!(!store.put_if_absent("KEY1", "val2".to_string()));

        assert_eq!(store.get("KEY1"), Some("val1".to_string()));
    }

    #[test]
    fn test_put_if_absent_inserts_new_key() {
        let mut store = CacheStore::new(1024);

        assert!(store.put_if_absent("KEY1", "val1".to_string()));
        assert_eq!(store.get("KEY1"), Some("val1".to_string()));
    }

    #[test]
    fn test_put_if_absent_is_idempotent() {
        let mut store = CacheStore::new(1024);

        assert!(store.put_if_absent("KEY1", "val1".to_string()));
        let bytes_after_first = store.used_bytes();

        assert!(!store.put_if_absent("KEY1", "val1".to_string()));
        assert_eq!(store.used_bytes(), bytes_after_first);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_absent_key_fails() {
        let mut store = CacheStore::new(1024);

        assert!(!store.set("missing", "value".to_string()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_updates_existing_key() {
        let mut store = CacheStore::new(1024);

        assert!(store.put("KEY1", "old".to_string()));
        assert!(store.set("KEY1", "new".to_string()));

        assert_eq!(store.get("KEY1"), Some("new".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_adjusts_accounting() {
        let mut store = CacheStore::new(1024);

        store.put("key", "aaaa".to_string());
        assert_eq!(store.used_bytes(), 7);

        store.set("key", "aa".to_string());
        assert_eq!(store.used_bytes(), 5);

        store.set("key", "aaaaaaaa".to_string());
        assert_eq!(store.used_bytes(), 11);
    }

    #[test]
    fn test_delete_removes_entry_and_releases_bytes() {
        let mut store = CacheStore::new(1024);

        store.put("KEY1", "val1".to_string());
        assert!(store.delete("KEY1"));

        assert!(store.is_empty());
        assert_eq!(store.used_bytes(), 0);
        assert_eq!(store.get("KEY1"), None);
    }

    #[test]
    fn test_delete_nonexistent() {
        let mut store = CacheStore::new(1024);
        assert!(!store.delete("nonexistent"));
    }

    #[test]
    fn test_eviction_follows_insertion_order() {
        // Room for exactly two 8-byte entries.
        let mut store = CacheStore::new(16);

        store.put("KEY1", "val1".to_string());
        store.put("KEY2", "val2".to_string());
        store.put("KEY3", "val3".to_string());

        assert_eq!(store.get("KEY1"), None);
        assert_eq!(store.get("KEY2"), Some("val2".to_string()));
        assert_eq!(store.get("KEY3"), Some("val3".to_string()));
        assert!(store.used_bytes() <= 16);
    }

    #[test]
    fn test_get_protects_entry_from_eviction() {
        let mut store = CacheStore::new(16);

        store.put("KEY1", "val1".to_string());
        store.put("KEY2", "val2".to_string());

        // Touch KEY1 so KEY2 becomes the eviction candidate.
        store.get("KEY1");
        store.put("KEY3", "val3".to_string());

        assert_eq!(store.get("KEY1"), Some("val1".to_string()));
        assert_eq!(store.get("KEY2"), None);
        assert_eq!(store.get("KEY3"), Some("val3".to_string()));
    }

    #[test]
    fn test_oversized_entry_is_rejected_without_eviction() {
        let mut store = CacheStore::new(16);

        store.put("KEY1", "val1".to_string());
        store.put("KEY2", "val2".to_string());

        // Footprint 20 > capacity 16: must fail and evict nothing.
        assert!(!store.put("BIGKEY", "large_payload!".to_string()));

        assert_eq!(store.len(), 2);
        assert_eq!(store.used_bytes(), 16);
        assert_eq!(store.get("KEY1"), Some("val1".to_string()));
        assert_eq!(store.get("KEY2"), Some("val2".to_string()));
    }

    #[test]
    fn test_oversized_update_restores_accounting() {
        let mut store = CacheStore::new(16);

        store.put("KEY1", "val1".to_string());
        store.put("KEY2", "val2".to_string());

        // Growing KEY1 beyond the whole capacity must fail and leave both
        // entries and the accounting untouched.
        assert!(!store.set("KEY1", "way_too_large_value".to_string()));

        assert_eq!(store.used_bytes(), 16);
        assert_eq!(store.get("KEY1"), Some("val1".to_string()));
        assert_eq!(store.get("KEY2"), Some("val2".to_string()));
    }

    #[test]
    fn test_growing_update_evicts_others_not_itself() {
        let mut store = CacheStore::new(24);

        store.put("KEY1", "val1".to_string());
        store.put("KEY2", "val2".to_string());
        store.put("KEY3", "val3".to_string());

        // Growing KEY1 to footprint 16 forces out the least recently used
        // of the other entries, never KEY1 itself.
        assert!(store.put("KEY1", "val1_longer_".to_string()));

        assert_eq!(store.get("KEY1"), Some("val1_longer_".to_string()));
        assert_eq!(store.get("KEY2"), None);
        assert_eq!(store.get("KEY3"), Some("val3".to_string()));
        assert!(store.used_bytes() <= 24);
    }

    #[test]
    fn test_delete_makes_room_for_reinsert() {
        let mut store = CacheStore::new(16);

        store.put("KEY1", "val1".to_string());
        store.put("KEY2", "val2".to_string());
        store.delete("KEY1");

        // Freed bytes must be reusable without evicting KEY2.
        assert!(store.put("KEY3", "val3".to_string()));
        assert_eq!(store.get("KEY2"), Some("val2".to_string()));
        assert_eq!(store.get("KEY3"), Some("val3".to_string()));
    }

    #[test]
    fn test_eviction_window_over_capacity() {
        // Capacity sized for exactly 1000 entries of footprint 40.
        let length = 20;
        let mut store = CacheStore::new(2 * 1000 * length);

        for i in 0..1100 {
            let key = pad_space(&format!("Key {}", i), length);
            let val = pad_space(&format!("Val {}", i), length);
            assert!(store.put(&key, val));
        }

        // The 100 oldest keys are gone, the rest survive with their
        // values intact.
        for i in 100..1100 {
            let key = pad_space(&format!("Key {}", i), length);
            let val = pad_space(&format!("Val {}", i), length);
            assert_eq!(store.get(&key), Some(val));
        }
        for i in 0..100 {
            let key = pad_space(&format!("Key {}", i), length);
            assert_eq!(store.get(&key), None);
        }
    }

    #[test]
    fn test_stats_track_hits_misses_evictions() {
        let mut store = CacheStore::new(16);

        store.put("KEY1", "val1".to_string());
        store.get("KEY1");
        store.get("nope");
        store.put("KEY2", "val2".to_string());
        store.put("KEY3", "val3".to_string()); // evicts KEY1

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.used_bytes, 16);
    }

    #[test]
    fn test_contains_key_does_not_promote() {
        let mut store = CacheStore::new(16);

        store.put("KEY1", "val1".to_string());
        store.put("KEY2", "val2".to_string());

        // A presence check must not shield KEY1 from eviction.
        assert!(store.contains_key("KEY1"));
        store.put("KEY3", "val3".to_string());

        assert!(!store.contains_key("KEY1"));
        assert!(store.contains_key("KEY2"));
        assert_eq!(store.stats().hits, 0);
    }

    #[test]
    fn test_zero_length_value_is_storable() {
        let mut store = CacheStore::new(16);

        assert!(store.put("key", String::new()));
        assert_eq!(store.get("key"), Some(String::new()));
        assert_eq!(store.used_bytes(), 3);
    }
}
