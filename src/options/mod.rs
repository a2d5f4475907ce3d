//! Client options
//!
//! Default connection options supplied to construction callbacks. Options are
//! resolved per client name and per field: a value set in the
//! `[clients.<name>]` section of the options file wins over the `[defaults]`
//! section, which wins over the built-in values. Environment variables with
//! the `CLIENT_REGISTRY` prefix override the file.

use config::{Config, Environment, File};
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Connection options for one client, resolved from file and environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: u64,

    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,

    /// Upper bound on pooled connections across all hosts
    pub max_total_connections: usize,

    /// Upper bound on pooled connections per host
    pub max_connections_per_host: usize,

    /// Whether the client should follow redirects
    pub follow_redirects: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 2_000,
            read_timeout_ms: 5_000,
            max_total_connections: 200,
            max_connections_per_host: 50,
            follow_redirects: true,
        }
    }
}

impl ClientOptions {
    /// Resolves the options for the named client from `client-registry.toml`
    /// in the working directory, when present.
    pub fn with_defaults(name: &str) -> Result<Self, config::ConfigError> {
        Self::resolve(name, None)
    }

    /// Resolves the options for the named client from the given options file.
    /// A missing file yields the built-in values.
    pub fn from_path(name: &str, path: &Path) -> Result<Self, config::ConfigError> {
        Self::resolve(name, Some(path))
    }

    /// Field-by-field resolution: `clients.<name>` entries override
    /// `defaults` entries, and any field set in neither section keeps its
    /// built-in value.
    fn resolve(name: &str, path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(false),
            None => File::with_name("client-registry").required(false),
        };
        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("CLIENT_REGISTRY").separator("__"))
            .build()?;

        let mut layered = Config::builder();
        if let Ok(defaults) = settings.get_table("defaults") {
            for (field, value) in defaults {
                layered = layered.set_default(field, value)?;
            }
        }
        if let Ok(dedicated) = settings.get_table(&format!("clients.{}", name)) {
            debug!("resolved dedicated options for client {}", name);
            for (field, value) in dedicated {
                layered = layered.set_override(field, value)?;
            }
        }

        layered.build()?.try_deserialize()
    }
}
