//! Keyed Client Registry
//!
//! A thread-safe registry that hands out shared client handles on demand,
//! keyed by identity (a name, or a host/port pair). Concurrent callers asking
//! for the same key never construct the client twice; callers asking for
//! different keys never block each other.
//!
//! The registry only constructs handles through a caller-supplied function and
//! tears them down through the [`Shutdown`] trait, so the client type itself
//! stays opaque to this crate.

pub mod monitor;
pub mod options;
pub mod registry;

pub use monitor::{LogMonitor, Monitor, MonitorError};
pub use options::ClientOptions;
pub use registry::{DefaultHandleCell, HostPort, KeyLockPool, KeyedRegistry, Shutdown};
