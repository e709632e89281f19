//! Kubeconfig-backed settings
//!
//! Reads contexts straight from the kubeconfig file. No api server round trip.
//! Doubles as a disconnected [`Connection`]: it knows the current context but
//! cannot vouch for any namespace.

use kube::config::Kubeconfig;
use std::path::Path;

use super::{Connection, KubeContext, KubeSettings};
use crate::config::defaults::MAX_FAVORITES;
use crate::config::{ConfigError, ConfigResult};

/// [`KubeSettings`] over a parsed kubeconfig
#[derive(Debug, Clone)]
pub struct KubeconfigSettings {
    kubeconfig: Kubeconfig,
    max_favorites: usize,
}

impl KubeconfigSettings {
    pub fn new(kubeconfig: Kubeconfig) -> Self {
        Self {
            kubeconfig,
            max_favorites: MAX_FAVORITES,
        }
    }

    /// Load using the default strategy (`KUBECONFIG`, then `~/.kube/config`)
    pub fn read() -> ConfigResult<Self> {
        let kubeconfig = Kubeconfig::read()
            .map_err(|e| ConfigError::Settings(format!("Failed to read kubeconfig: {}", e)))?;
        Ok(Self::new(kubeconfig))
    }

    /// Load from an explicit kubeconfig path
    pub fn read_from(path: &Path) -> ConfigResult<Self> {
        let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
            ConfigError::Settings(format!(
                "Failed to read kubeconfig {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::new(kubeconfig))
    }

    /// Parse kubeconfig YAML text
    pub fn from_yaml(text: &str) -> ConfigResult<Self> {
        let kubeconfig = Kubeconfig::from_yaml(text)
            .map_err(|e| ConfigError::Settings(format!("Failed to parse kubeconfig: {}", e)))?;
        Ok(Self::new(kubeconfig))
    }

    pub fn with_max_favorites(mut self, max: usize) -> Self {
        self.max_favorites = max;
        self
    }

    pub fn kubeconfig(&self) -> &Kubeconfig {
        &self.kubeconfig
    }

    /// The kubeconfig `current-context`, if set and non-empty
    pub fn current_context_name(&self) -> ConfigResult<String> {
        self.kubeconfig
            .current_context
            .clone()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ConfigError::Connection("kubeconfig has no current-context".into()))
    }

    /// All context names declared in the kubeconfig
    pub fn context_names(&self) -> Vec<String> {
        self.kubeconfig
            .contexts
            .iter()
            .map(|ct| ct.name.clone())
            .collect()
    }
}

impl KubeSettings for KubeconfigSettings {
    fn kube_context(&self, name: &str) -> ConfigResult<KubeContext> {
        let named = self
            .kubeconfig
            .contexts
            .iter()
            .find(|ct| ct.name == name)
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))?;
        let ct = named
            .context
            .as_ref()
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))?;

        Ok(KubeContext {
            cluster: ct.cluster.clone(),
            namespace: ct.namespace.clone().filter(|ns| !ns.is_empty()),
        })
    }

    fn max_favorites(&self) -> ConfigResult<usize> {
        Ok(self.max_favorites)
    }
}

impl Connection for KubeconfigSettings {
    fn current_context_name(&self) -> ConfigResult<String> {
        KubeconfigSettings::current_context_name(self)
    }

    fn is_valid_namespace(&self, _ns: &str) -> ConfigResult<bool> {
        Err(ConfigError::Connection("not connected to a cluster".into()))
    }
}
