//! Keyed registry
//!
//! Thread-safe map from key to shared client handle with get-or-create
//! semantics. A miss takes a lock scoped to the requested key, so concurrent
//! construction of *different* clients proceeds in parallel while duplicate
//! construction of the *same* client is impossible.

use log::{debug, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::monitor::Monitor;
use crate::registry::lock_pool::KeyLockPool;

/// Handle-level teardown hook invoked during [`KeyedRegistry::shutdown`].
///
/// Implementations release underlying connection resources synchronously or
/// kick off asynchronous teardown; the registry does not wait beyond invoking
/// it.
pub trait Shutdown {
    fn shutdown(&self);
}

/// Registry mapping keys to lazily constructed, shared client handles.
///
/// All mutation goes through [`get_or_create`](Self::get_or_create),
/// [`remove`](Self::remove) and [`shutdown`](Self::shutdown); between
/// construction and shutdown at most one handle exists per key and every
/// caller receives the same `Arc`.
pub struct KeyedRegistry<K, C> {
    clients: RwLock<HashMap<K, Arc<C>>>,
    locks: KeyLockPool<K>,
    monitor: Option<Arc<dyn Monitor<K, C>>>,
}

impl<K, C> KeyedRegistry<K, C>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            locks: KeyLockPool::new(),
            monitor: None,
        }
    }

    /// Creates a registry that reports constructed and shut-down handles to
    /// the given monitoring collaborator.
    pub fn with_monitor(monitor: Arc<dyn Monitor<K, C>>) -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            locks: KeyLockPool::new(),
            monitor: Some(monitor),
        }
    }

    /// Returns the handle for `key`, constructing it via `construct` if no
    /// handle exists yet. Monitor registration is enabled on this path.
    ///
    /// Exactly one concurrent caller per key runs `construct`; every other
    /// caller receives the winner's instance. A construction error propagates
    /// to the caller and leaves the key absent, so a later call may retry.
    pub fn get_or_create<F, E>(&self, key: &K, construct: F) -> Result<Arc<C>, E>
    where
        F: FnOnce(&K) -> Result<C, E>,
    {
        self.get_or_create_with(key, true, construct)
    }

    /// Same as [`get_or_create`](Self::get_or_create) with monitor
    /// registration controlled per call.
    pub fn get_or_create_with<F, E>(
        &self,
        key: &K,
        register_monitor: bool,
        construct: F,
    ) -> Result<Arc<C>, E>
    where
        F: FnOnce(&K) -> Result<C, E>,
    {
        // Hot path: no key lock, just a shared map read.
        if let Some(existing) = self.clients.read().get(key) {
            return Ok(Arc::clone(existing));
        }

        // Miss: serialize against other callers of this key only.
        let key_lock = self.locks.lock_for(key);
        let _guard = key_lock.lock();

        // Another caller may have won the race while we waited for the lock.
        if let Some(existing) = self.clients.read().get(key) {
            return Ok(Arc::clone(existing));
        }

        // Construction runs outside the map locks so slow constructors never
        // stall lookups of unrelated keys.
        let handle = Arc::new(construct(key)?);
        self.clients.write().insert(key.clone(), Arc::clone(&handle));
        debug!("constructed client for key {:?}", key);

        if register_monitor {
            self.register_monitor(key, &handle);
        }

        Ok(handle)
    }

    /// Returns the handle for `key` if one has been constructed.
    pub fn get(&self, key: &K) -> Option<Arc<C>> {
        self.clients.read().get(key).map(Arc::clone)
    }

    /// Removes and returns the handle for `key`. An absent key yields `None`,
    /// not an error.
    pub fn remove(&self, key: &K) -> Option<Arc<C>> {
        self.clients.write().remove(key)
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.clients.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.read().is_empty()
    }

    fn register_monitor(&self, key: &K, handle: &Arc<C>) {
        if let Some(monitor) = &self.monitor {
            if let Err(e) = monitor.register(key, handle) {
                warn!("monitor registration failed for key {:?}: {}", key, e);
            }
        }
    }

    fn unregister_monitor(&self, key: &K, handle: &Arc<C>) {
        if let Some(monitor) = &self.monitor {
            if let Err(e) = monitor.unregister(key, handle) {
                warn!("monitor unregistration failed for key {:?}: {}", key, e);
            }
        }
    }
}

impl<K, C> KeyedRegistry<K, C>
where
    K: Eq + Hash + Clone + fmt::Debug,
    C: Shutdown,
{
    /// Shuts down and removes the client for `key`.
    ///
    /// The handle leaves the map before its `shutdown` hook runs, so a
    /// concurrent `get_or_create` constructs a fresh instance rather than
    /// receiving one undergoing teardown. Returns `false` (a silent no-op)
    /// when no client is registered for `key`.
    pub fn shutdown(&self, key: &K) -> bool {
        match self.remove(key) {
            Some(handle) => {
                handle.shutdown();
                self.unregister_monitor(key, &handle);
                debug!("shut down client for key {:?}", key);
                true
            }
            None => {
                debug!("no client registered for key {:?}, nothing to shut down", key);
                false
            }
        }
    }
}

impl<K, C> Default for KeyedRegistry<K, C>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
