//! Configuration system for k9s-config
//!
//! Tracks which kubeconfig context and namespace are active, reconciles CLI
//! overrides with the saved state, and persists the whole tree to a YAML file.
//!
//! Layers, leaf first:
//! - [`loader`]: reading and writing the YAML document
//! - [`registry`]: context records and the active context pointer
//! - [`namespace`]: active namespace and favorites within a context
//! - [`reconcile`]: merging CLI flags with the saved defaults
//! - [`session`]: the [`Config`] facade used by the CLI and UI layers

pub mod defaults;
pub mod loader;
pub mod namespace;
pub mod paths;
pub mod reconcile;
pub mod registry;
pub mod schema;
mod session;

pub use loader::{ConfigLoader, yaml_extension};
pub use namespace::FavoritesValidation;
pub use reconcile::{Flags, resolve_context, resolve_namespace};
pub use schema::{Context, K9s, LoggerConfig, Namespace, View};
pub use session::{Config, SessionInit};

use std::path::PathBuf;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Encode(#[source] serde_yaml::Error),

    #[error("No active context found")]
    NoActiveContext,

    #[error("Context not found: {0}")]
    NotFound(String),

    #[error("Settings unavailable: {0}")]
    Settings(String),

    #[error("Validation error: {0}")]
    Validation(#[source] Box<ConfigError>),

    #[error("Connection error: {0}")]
    Connection(String),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
