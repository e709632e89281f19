//! Flag reconciliation
//!
//! Merges CLI overrides, the saved registry and the live connection into one
//! active (context, namespace) pair for the session.
//!
//! Namespace precedence (highest to lowest):
//! 1. `--all-namespaces`
//! 2. `--namespace`
//! 3. Saved active namespace of the context
//! 4. [`DEFAULT_NAMESPACE`]

use super::defaults::{DEFAULT_DIR_MODE, DEFAULT_NAMESPACE, NAMESPACE_ALL};
use super::session::Config;
use super::{ConfigError, ConfigResult, paths};
use crate::kube::Connection;

/// CLI inputs relevant to context and namespace selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    pub context: Option<String>,
    pub namespace: Option<String>,
    pub all_namespaces: Option<bool>,
}

impl Flags {
    /// Explicit context flag, if set and non-empty
    pub fn context(&self) -> Option<&str> {
        non_empty(self.context.as_deref())
    }

    /// Explicit namespace flag, if set and non-empty
    pub fn namespace(&self) -> Option<&str> {
        non_empty(self.namespace.as_deref())
    }

    pub fn all_namespaces(&self) -> bool {
        self.all_namespaces.unwrap_or(false)
    }
}

/// Pick the session namespace; never returns an empty string
pub fn resolve_namespace(flags: &Flags, saved: Option<&str>) -> String {
    let ns = if flags.all_namespaces() {
        NAMESPACE_ALL
    } else if let Some(ns) = flags.namespace() {
        ns
    } else {
        saved.unwrap_or(DEFAULT_NAMESPACE)
    };

    if ns.is_empty() {
        DEFAULT_NAMESPACE.to_string()
    } else {
        ns.to_string()
    }
}

/// Pick the session context name
pub fn resolve_context(flags: &Flags, conn: Option<&dyn Connection>) -> ConfigResult<String> {
    if let Some(name) = flags.context() {
        return Ok(name.to_string());
    }
    match conn {
        Some(conn) => conn.current_context_name(),
        None => Err(ConfigError::Connection(
            "no context flag and no cluster connection to ask for the current context".into(),
        )),
    }
}

impl Config {
    /// Resolve and commit the session's active context and namespace
    ///
    /// Re-derives everything on each call. Also makes sure the screen dump
    /// directory exists. If the namespace cannot be committed, the previously
    /// active context is restored.
    pub fn reconcile(&mut self, flags: &Flags, conn: Option<&dyn Connection>) -> ConfigResult<()> {
        let context = resolve_context(flags, conn)?;
        let previous = self.k9s.current_context.clone();
        self.set_current_context(&context)?;
        tracing::debug!("Active Context {:?}", context);

        if let Err(e) = self.activate_namespace(flags) {
            self.k9s.current_context = previous;
            return Err(e);
        }

        let dump_dir = self.k9s.screen_dump_dir();
        paths::ensure_dir(&dump_dir, DEFAULT_DIR_MODE)
            .map_err(|e| ConfigError::io(&dump_dir, e))
    }

    fn activate_namespace(&mut self, flags: &Flags) -> ConfigResult<()> {
        let saved = self.k9s.active_context_namespace()?;
        let ns = resolve_namespace(flags, Some(saved.as_str()));
        self.set_active_namespace(&ns)?;
        tracing::debug!("Active Namespace {:?}", ns);
        Ok(())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
