//! k9s-config library
//!
//! Persistent, hierarchical configuration for a K9s-style Kubernetes client:
//! which kubeconfig context and namespace are active, how CLI overrides are
//! reconciled with the saved state, and how that state survives across runs.

pub mod config;
pub mod kube;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigError, ConfigResult, Flags, SessionInit};
