//! Per-key lock pool
//!
//! Hands out a mutual-exclusion handle per registry key so that the
//! create-if-absent critical section only blocks callers contending for the
//! same key. Locks are held weakly; once every holder drops its handle the
//! entry becomes reclaimable, so memory does not grow with the total number
//! of distinct keys ever seen.

use log::trace;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Weak};

/// Pool of per-key locks with weak retention.
///
/// `lock_for` returns the same underlying lock for equal keys as long as at
/// least one caller still holds a strong reference to it. Dead entries are
/// pruned opportunistically when a fresh lock is created; pruning timing is
/// not a correctness concern because the locks only guard construction races,
/// never long-lived invariants.
pub struct KeyLockPool<K> {
    locks: Mutex<HashMap<K, Weak<Mutex<()>>>>,
}

impl<K> KeyLockPool<K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the lock associated with `key`, creating one if no live lock
    /// exists for it.
    ///
    /// Never fails: allocating a fresh lock is infallible under normal
    /// operation, and allocation failure aborts the process rather than
    /// surfacing as a recoverable error.
    pub fn lock_for(&self, key: &K) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();

        if let Some(existing) = locks.get(key).and_then(Weak::upgrade) {
            return existing;
        }

        // Miss: drop entries whose lock nobody holds anymore before growing
        // the map.
        locks.retain(|_, weak| weak.strong_count() > 0);

        let lock = Arc::new(Mutex::new(()));
        locks.insert(key.clone(), Arc::downgrade(&lock));
        trace!("created construction lock for key {:?}", key);
        lock
    }

    /// Number of tracked entries, including dead ones awaiting pruning.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}

impl<K> Default for KeyLockPool<K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_returns_same_lock() {
        let pool: KeyLockPool<String> = KeyLockPool::new();
        let a = pool.lock_for(&"alpha".to_string());
        let b = pool.lock_for(&"alpha".to_string());
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_distinct_keys_get_distinct_locks() {
        let pool: KeyLockPool<String> = KeyLockPool::new();
        let a = pool.lock_for(&"alpha".to_string());
        let b = pool.lock_for(&"beta".to_string());
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_dropped_locks_are_pruned_on_next_miss() {
        let pool: KeyLockPool<String> = KeyLockPool::new();
        for i in 0..16 {
            let lock = pool.lock_for(&format!("key-{}", i));
            drop(lock);
        }
        // All previous holders are gone, so the next miss prunes everything
        // except the entry it creates.
        let _held = pool.lock_for(&"fresh".to_string());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_held_lock_survives_pruning() {
        let pool: KeyLockPool<String> = KeyLockPool::new();
        let held = pool.lock_for(&"held".to_string());
        let _other = pool.lock_for(&"other".to_string());
        let again = pool.lock_for(&"held".to_string());
        assert!(Arc::ptr_eq(&held, &again));
    }

    #[test]
    fn test_reacquire_after_drop_yields_fresh_lock() {
        let pool: KeyLockPool<String> = KeyLockPool::new();
        let first = pool.lock_for(&"key".to_string());
        drop(first);
        // A stale entry is simply replaced; the lock still works.
        let second = pool.lock_for(&"key".to_string());
        let _guard = second.lock();
    }
}
