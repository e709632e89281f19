//! Kubernetes collaborators
//!
//! The configuration layer never talks to the api server on its own. It goes
//! through two narrow seams defined here:
//! - [`Connection`]: the live cluster connection, used for the current context
//!   name and for checking that favorite namespaces still exist
//! - [`KubeSettings`]: kubeconfig-derived defaults and limits consulted when a
//!   context or namespace is activated
//!
//! [`KubeconfigSettings`] and [`KubeConnection`] back them with a real kubeconfig
//! and `kube::Client`.

mod connection;
mod kubeconfig;

pub use connection::KubeConnection;
pub use kubeconfig::KubeconfigSettings;

use crate::config::ConfigResult;
use crate::config::defaults::MAX_FAVORITES;

/// Live api server connection
#[cfg_attr(test, mockall::automock)]
pub trait Connection {
    /// Name of the kubeconfig current-context
    fn current_context_name(&self) -> ConfigResult<String>;

    /// Whether the namespace exists on the cluster
    ///
    /// An error means the cluster could not be asked, not that the namespace is missing.
    fn is_valid_namespace(&self, ns: &str) -> ConfigResult<bool>;
}

/// Cluster and namespace a kubeconfig context points at
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KubeContext {
    pub cluster: String,
    pub namespace: Option<String>,
}

/// Defaults and limits consulted on activation
#[cfg_attr(test, mockall::automock)]
pub trait KubeSettings {
    /// Look up a kubeconfig context by name
    fn kube_context(&self, name: &str) -> ConfigResult<KubeContext>;

    /// Cap on the favorite namespaces list
    fn max_favorites(&self) -> ConfigResult<usize>;
}

/// Settings used when no kubeconfig is available
///
/// Every context maps to a cluster of the same name with no preferred namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSettings;

impl KubeSettings for OfflineSettings {
    fn kube_context(&self, name: &str) -> ConfigResult<KubeContext> {
        Ok(KubeContext {
            cluster: name.to_string(),
            namespace: None,
        })
    }

    fn max_favorites(&self) -> ConfigResult<usize> {
        Ok(MAX_FAVORITES)
    }
}
