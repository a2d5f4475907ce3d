//! Default handle cell
//!
//! A single replaceable slot for the process-wide default client, independent
//! of the keyed map. Replacement is an atomic pointer swap, so readers always
//! observe either the previous or the new fully-constructed handle, never a
//! partial one.

use arc_swap::ArcSwap;
use std::sync::Arc;

/// Holds one client handle that can be read and replaced concurrently without
/// locking.
pub struct DefaultHandleCell<C> {
    inner: ArcSwap<C>,
}

impl<C> DefaultHandleCell<C> {
    pub fn new(handle: C) -> Self {
        Self {
            inner: ArcSwap::from_pointee(handle),
        }
    }

    /// Returns the current default handle.
    pub fn get(&self) -> Arc<C> {
        self.inner.load_full()
    }

    /// Replaces the default handle. The previous handle stays alive as long
    /// as outstanding `get` callers hold it.
    pub fn set(&self, handle: C) {
        self.inner.store(Arc::new(handle));
    }

    /// Replaces the default handle with an already shared one.
    pub fn set_arc(&self, handle: Arc<C>) {
        self.inner.store(handle);
    }
}

impl<C: Default> Default for DefaultHandleCell<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_get_returns_initial_handle() {
        let cell = DefaultHandleCell::new("first".to_string());
        assert_eq!(*cell.get(), "first");
    }

    #[test]
    fn test_set_replaces_handle() {
        let cell = DefaultHandleCell::new("first".to_string());
        let old = cell.get();
        cell.set("second".to_string());
        assert_eq!(*cell.get(), "second");
        // Outstanding holders keep the replaced handle alive.
        assert_eq!(*old, "first");
    }

    #[test]
    fn test_set_arc_reuses_shared_handle() {
        let cell = DefaultHandleCell::new(1u32);
        let shared = Arc::new(2u32);
        cell.set_arc(Arc::clone(&shared));
        assert!(Arc::ptr_eq(&cell.get(), &shared));
    }

    #[test]
    fn test_replacement_is_visible_across_threads() {
        let cell = Arc::new(DefaultHandleCell::new(0u64));
        let writer = {
            let cell = Arc::clone(&cell);
            thread::spawn(move || cell.set(42))
        };
        writer.join().unwrap();
        assert_eq!(*cell.get(), 42);
    }
}
