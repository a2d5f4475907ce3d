//! Monitor trait and error types

use log::info;
use std::fmt;
use std::sync::Arc;

/// Monitoring collaborator errors
#[derive(Debug)]
pub enum MonitorError {
    RegistrationFailed(String),
    UnregistrationFailed(String),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::RegistrationFailed(key) => {
                write!(f, "Failed to register monitor for: {}", key)
            }
            MonitorError::UnregistrationFailed(key) => {
                write!(f, "Failed to unregister monitor for: {}", key)
            }
        }
    }
}

impl std::error::Error for MonitorError {}

/// Receives registration events from the registry.
///
/// `register` is invoked after a handle is constructed and published (when
/// enabled for the call); `unregister` after a handle is shut down, with the
/// key as the identifier. Implementations back these with whatever metrics
/// system the application uses.
pub trait Monitor<K, C>: Send + Sync {
    fn register(&self, key: &K, handle: &Arc<C>) -> Result<(), MonitorError>;

    fn unregister(&self, key: &K, handle: &Arc<C>) -> Result<(), MonitorError>;
}

/// Monitor that records registrations through the `log` facade.
///
/// Useful as a default when no metrics backend is wired up.
pub struct LogMonitor;

impl<K, C> Monitor<K, C> for LogMonitor
where
    K: fmt::Debug,
{
    fn register(&self, key: &K, _handle: &Arc<C>) -> Result<(), MonitorError> {
        info!("client registered for key {:?}", key);
        Ok(())
    }

    fn unregister(&self, key: &K, _handle: &Arc<C>) -> Result<(), MonitorError> {
        info!("client unregistered for key {:?}", key);
        Ok(())
    }
}
