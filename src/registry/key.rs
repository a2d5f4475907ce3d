//! Registry keys
//!
//! Composite host/port identity for clients addressed by endpoint rather
//! than by name. Plain `String` names are used directly as keys and need no
//! wrapper.

use std::fmt;

/// Host/port pair used as a registry key.
///
/// Value-comparable and hashable; the identity is stable for the key's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostPort {
    host: String,
    port: u16,
}

impl HostPort {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
