//! Monitoring collaborator
//!
//! Side-effecting hooks the registry triggers when a client is constructed or
//! shut down. Monitoring is best-effort: a failing collaborator is logged and
//! swallowed, never allowed to fail the primary operation or corrupt registry
//! state.

pub mod types;

pub use types::{LogMonitor, Monitor, MonitorError};
