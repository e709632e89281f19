//! Context registry
//!
//! Maps context names to [`Context`] records and owns the active context pointer.
//! Records are created lazily on first activation and never removed by activation;
//! [`K9s::reset`] only forgets which one is active.

use std::path::PathBuf;

use super::defaults::{DEFAULT_MAX_CONN_RETRY, DEFAULT_REFRESH_RATE};
use super::namespace::FavoritesValidation;
use super::paths;
use super::schema::{Context, K9s, K9sPatch, LoggerConfig, merge_field};
use super::{ConfigError, ConfigResult};
use crate::kube::{Connection, KubeSettings};

impl K9s {
    /// Activate `name`, creating its record on first use
    pub fn activate_context(
        &mut self,
        name: &str,
        settings: &dyn KubeSettings,
    ) -> ConfigResult<&mut Context> {
        if name.is_empty() {
            return Err(ConfigError::NotFound("<empty context name>".to_string()));
        }

        let kube_context = match settings.kube_context(name) {
            Ok(ct) => Some(ct),
            Err(e) => {
                tracing::debug!("No kubeconfig entry for context {:?}: {}", name, e);
                None
            }
        };

        let ct = self.contexts.entry(name.to_string()).or_insert_with(|| {
            let mut ct = Context::default();
            if let Some(kc) = &kube_context {
                if let Some(ns) = &kc.namespace {
                    ct.namespace.active = ns.clone();
                }
            }
            ct
        });
        if ct.cluster_name.is_empty() {
            ct.cluster_name = kube_context
                .map(|kc| kc.cluster)
                .filter(|cluster| !cluster.is_empty())
                .unwrap_or_else(|| name.to_string());
        }

        self.current_context = Some(name.to_string());
        tracing::debug!("Activated context {:?} (cluster {:?})", name, ct.cluster_name);

        Ok(ct)
    }

    /// Name of the active context, if any
    pub fn active_context_name(&self) -> Option<&str> {
        self.current_context.as_deref()
    }

    pub fn active_context(&self) -> ConfigResult<&Context> {
        self.current_context
            .as_ref()
            .and_then(|name| self.contexts.get(name))
            .ok_or(ConfigError::NoActiveContext)
    }

    pub fn active_context_mut(&mut self) -> ConfigResult<&mut Context> {
        match &self.current_context {
            Some(name) => self
                .contexts
                .get_mut(name)
                .ok_or(ConfigError::NoActiveContext),
            None => Err(ConfigError::NoActiveContext),
        }
    }

    /// Saved active namespace of the active context
    pub fn active_context_namespace(&self) -> ConfigResult<String> {
        Ok(self.active_context()?.namespace.active.clone())
    }

    /// Forget the active context; records stay
    pub fn reset(&mut self) {
        self.current_context = None;
    }

    /// Merge a freshly loaded document into the live one
    ///
    /// Loaded values win where present. Contexts only known in memory are kept.
    pub fn refine(&mut self, loaded: &K9sPatch) {
        merge_field(&mut self.refresh_rate, &loaded.refresh_rate);
        merge_field(&mut self.max_conn_retry, &loaded.max_conn_retry);
        merge_field(&mut self.read_only, &loaded.read_only);
        merge_field(&mut self.screen_dump_dir, &loaded.screen_dump_dir);

        if let Some(logger) = &loaded.logger {
            self.logger
                .get_or_insert_with(LoggerConfig::default)
                .refine(logger);
        }

        if let Some(contexts) = &loaded.contexts {
            for (name, patch) in contexts {
                self.contexts
                    .entry(name.clone())
                    .or_insert_with(|| Context::new(name.as_str()))
                    .refine(patch);
            }
        }

        if let Some(name) = loaded.current_context.as_ref().filter(|n| !n.is_empty()) {
            self.contexts
                .entry(name.clone())
                .or_insert_with(|| Context::new(name.as_str()));
            self.current_context = Some(name.clone());
        }
    }

    /// Logger settings, built on first access
    pub fn logger(&mut self) -> &mut LoggerConfig {
        self.logger.get_or_insert_with(LoggerConfig::default)
    }

    /// Normalize settings and check the active context favorites
    pub fn validate(&mut self, conn: Option<&dyn Connection>) -> FavoritesValidation {
        if self.refresh_rate < DEFAULT_REFRESH_RATE {
            self.refresh_rate = DEFAULT_REFRESH_RATE;
        }
        if self.max_conn_retry == 0 {
            self.max_conn_retry = DEFAULT_MAX_CONN_RETRY;
        }
        self.logger().validate();

        match self.active_context_mut() {
            Ok(ct) => ct.namespace.validate(conn),
            Err(_) => FavoritesValidation::Skipped,
        }
    }

    /// Check the registry is consistent enough to be written out
    pub fn prepare_save(&mut self) -> ConfigResult<()> {
        if let Some(name) = &self.current_context {
            if !self.contexts.contains_key(name) {
                return Err(ConfigError::NotFound(name.clone()));
            }
        }
        for (name, ct) in self.contexts.iter_mut() {
            if ct.cluster_name.is_empty() {
                ct.cluster_name = name.clone();
            }
        }
        Ok(())
    }

    /// Screen dump root, falling back to the data directory
    pub fn screen_dump_dir(&self) -> PathBuf {
        if self.screen_dump_dir.is_empty() {
            paths::screen_dumps_dir()
        } else {
            PathBuf::from(&self.screen_dump_dir)
        }
    }

    /// Screen dump directory scoped to the active context
    pub fn context_screen_dump_dir(&self) -> ConfigResult<PathBuf> {
        let ct = self.active_context()?;
        let name = self.current_context.as_deref().unwrap_or_default();
        Ok(self
            .screen_dump_dir()
            .join(paths::sanitize_file_name(&ct.cluster_name))
            .join(paths::sanitize_file_name(name)))
    }
}
