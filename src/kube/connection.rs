//! Blocking api server connection
//!
//! The configuration layer is synchronous, so the connection owns a small
//! current-thread runtime and blocks on each api call. Only namespace lookups
//! hit the network; the current context comes from the kubeconfig.

use k8s_openapi::api::core::v1::Namespace;
use kube::config::KubeConfigOptions;
use kube::{Api, Client};
use tokio::runtime::Runtime;

use super::{Connection, KubeContext, KubeSettings, KubeconfigSettings};
use crate::config::{ConfigError, ConfigResult};

/// [`Connection`] over a `kube::Client`
///
/// Sync callers only. Tokio panics when a runtime is blocked on or dropped from
/// inside another runtime, so construction and lookups refuse to run under one;
/// async callers should create and drop it from `spawn_blocking`.
pub struct KubeConnection {
    settings: KubeconfigSettings,
    runtime: Runtime,
    client: Client,
}

impl KubeConnection {
    /// Build a client for `context` (or the kubeconfig current-context)
    ///
    /// No request is sent here; an unreachable cluster only shows up on the
    /// first namespace lookup.
    pub fn connect(settings: KubeconfigSettings, context: Option<&str>) -> ConfigResult<Self> {
        ensure_outside_runtime()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ConfigError::Connection(format!("Failed to start runtime: {}", e)))?;

        let options = KubeConfigOptions {
            context: context.map(str::to_string),
            ..Default::default()
        };
        let kubeconfig = settings.kubeconfig().clone();

        // Client construction spawns its request buffer, so it must run inside the runtime
        let client = runtime
            .block_on(async {
                let config = kube::Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(|e| e.to_string())?;
                Client::try_from(config).map_err(|e| e.to_string())
            })
            .map_err(|e| ConfigError::Connection(format!("Failed to create client: {}", e)))?;

        tracing::debug!(
            "Kubernetes client ready for context {:?}",
            context.map(str::to_string).or_else(|| settings.current_context_name().ok())
        );

        Ok(Self {
            settings,
            runtime,
            client,
        })
    }

    pub fn settings(&self) -> &KubeconfigSettings {
        &self.settings
    }
}

impl Connection for KubeConnection {
    fn current_context_name(&self) -> ConfigResult<String> {
        self.settings.current_context_name()
    }

    fn is_valid_namespace(&self, ns: &str) -> ConfigResult<bool> {
        ensure_outside_runtime()?;
        let api: Api<Namespace> = Api::all(self.client.clone());
        let found = self
            .runtime
            .block_on(api.get_opt(ns))
            .map_err(|e| ConfigError::Connection(format!("Failed to get namespace {}: {}", ns, e)))?;
        Ok(found.is_some())
    }
}

impl KubeSettings for KubeConnection {
    fn kube_context(&self, name: &str) -> ConfigResult<KubeContext> {
        self.settings.kube_context(name)
    }

    fn max_favorites(&self) -> ConfigResult<usize> {
        self.settings.max_favorites()
    }
}

fn ensure_outside_runtime() -> ConfigResult<()> {
    match tokio::runtime::Handle::try_current() {
        Ok(_) => Err(ConfigError::Connection(
            "blocking kube connection used from inside an async runtime".into(),
        )),
        Err(_) => Ok(()),
    }
}
