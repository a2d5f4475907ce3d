//! Client registry
//!
//! Manages shared client handles and their lifecycle: lazy per-key
//! construction, key-scoped locking, and explicit shutdown.

pub mod default_cell;
pub mod key;
pub mod keyed;
pub mod lock_pool;

pub use default_cell::DefaultHandleCell;
pub use key::HostPort;
pub use keyed::{KeyedRegistry, Shutdown};
pub use lock_pool::KeyLockPool;
