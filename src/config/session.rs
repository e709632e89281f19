//! Session configuration facade
//!
//! [`Config`] owns the persisted document and references the live collaborators.
//! It is what the CLI and UI layers talk to.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::defaults::{DEFAULT_NAMESPACE, DEFAULT_VIEW};
use super::loader::ConfigLoader;
use super::namespace::FavoritesValidation;
use super::paths;
use super::schema::{Context, K9s, K9sPatch};
use super::{ConfigError, ConfigResult};
use crate::kube::{Connection, KubeSettings};

/// Startup-only inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInit {
    /// View requested on the command line; shown once instead of the saved view
    pub manual_command: Option<String>,
}

/// Configuration for one running session
pub struct Config {
    pub k9s: K9s,
    settings: Arc<dyn KubeSettings>,
    conn: Option<Arc<dyn Connection>>,
    manual_command: Option<String>,
}

impl Config {
    /// Create an empty configuration
    pub fn new(settings: Arc<dyn KubeSettings>) -> Self {
        Self::with_init(settings, SessionInit::default())
    }

    pub fn with_init(settings: Arc<dyn KubeSettings>, init: SessionInit) -> Self {
        Self {
            k9s: K9s::default(),
            settings,
            conn: None,
            manual_command: init.manual_command.filter(|cmd| !cmd.is_empty()),
        }
    }

    pub fn settings(&self) -> &dyn KubeSettings {
        self.settings.as_ref()
    }

    pub fn connection(&self) -> Option<&dyn Connection> {
        self.conn.as_deref()
    }

    /// Shared handle on the live connection, for passing alongside `&mut self`
    pub fn connection_handle(&self) -> Option<Arc<dyn Connection>> {
        self.conn.clone()
    }

    /// Attach (or drop) the live connection used for favorites validation
    pub fn set_connection(&mut self, conn: Option<Arc<dyn Connection>>) {
        self.conn = conn;
    }

    /// Aliases file of the active context, if any
    pub fn context_aliases_path(&self) -> Option<PathBuf> {
        let (name, ct) = self.active_pair()?;
        Some(paths::context_aliases_path(&ct.cluster_name, name))
    }

    /// Plugins file of the active context, if any
    pub fn context_plugins_path(&self) -> Option<PathBuf> {
        let (name, ct) = self.active_pair()?;
        Some(paths::context_plugins_path(&ct.cluster_name, name))
    }

    /// Forget the active context, e.g. before switching clusters
    pub fn reset(&mut self) {
        self.k9s.reset();
    }

    pub fn set_current_context(&mut self, name: &str) -> ConfigResult<&mut Context> {
        self.k9s
            .activate_context(name, self.settings.as_ref())
            .inspect_err(|e| tracing::error!("Set current context {:?} failed: {}", name, e))
    }

    pub fn current_context(&self) -> ConfigResult<&Context> {
        self.k9s.active_context()
    }

    pub fn active_context_name(&self) -> Option<&str> {
        self.k9s.active_context_name()
    }

    /// Active namespace of the active context, or the default namespace
    pub fn active_namespace(&self) -> String {
        match self.k9s.active_context_namespace() {
            Ok(ns) => ns,
            Err(e) => {
                tracing::error!("Unable to assert active namespace. Using default: {}", e);
                DEFAULT_NAMESPACE.to_string()
            }
        }
    }

    pub fn set_active_namespace(&mut self, ns: &str) -> ConfigResult<()> {
        let ct = self.k9s.active_context_mut()?;
        ct.namespace.set_active(ns, self.settings.as_ref())
    }

    /// Favorite namespaces of the active context
    pub fn fav_namespaces(&self) -> &[String] {
        match self.k9s.active_context() {
            Ok(ct) => ct.namespace.favorites.as_slice(),
            Err(e) => {
                tracing::debug!("No favorite namespaces: {}", e);
                &[]
            }
        }
    }

    /// Check the active context favorites against the live connection
    pub fn validate_favorites(&mut self) -> FavoritesValidation {
        let conn = self.conn.as_deref();
        match self.k9s.active_context_mut() {
            Ok(ct) => ct.namespace.validate(conn),
            Err(_) => FavoritesValidation::Skipped,
        }
    }

    /// Active view, or the startup command the first time it is asked for
    pub fn active_view(&mut self) -> String {
        let view = match self.k9s.active_context() {
            Ok(ct) => ct.view.active.clone(),
            Err(e) => {
                tracing::debug!("No active view: {}", e);
                return DEFAULT_VIEW.to_string();
            }
        };

        self.manual_command.take().unwrap_or(view)
    }

    pub fn set_active_view(&mut self, view: &str) {
        if let Ok(ct) = self.k9s.active_context_mut() {
            ct.view.active = view.to_string();
        }
    }

    /// Merge a loaded document into the live one
    pub fn refine(&mut self, loaded: &K9sPatch) {
        self.k9s.refine(loaded);
    }

    /// Load configuration from a file
    ///
    /// Only keys present in the file override the in-memory values.
    pub fn load(&mut self, path: &Path) -> ConfigResult<()> {
        let file = ConfigLoader::load_file(path)?;
        if let Some(loaded) = &file.k9s {
            self.k9s.refine(loaded);
        }
        self.k9s.logger();
        tracing::debug!("Loaded config from {}", path.display());

        Ok(())
    }

    /// Validate, then save configuration to disk
    pub fn save(&mut self, path: &Path) -> ConfigResult<()> {
        self.validate();
        self.k9s
            .prepare_save()
            .map_err(|e| ConfigError::Validation(Box::new(e)))?;
        ConfigLoader::save_file(&self.k9s, path)
    }

    /// Normalize settings and validate the active context favorites
    pub fn validate(&mut self) -> FavoritesValidation {
        let conn = self.conn.as_deref();
        self.k9s.validate(conn)
    }

    /// Log the active state
    pub fn dump(&self, msg: &str) {
        match self.active_pair() {
            Some((name, ct)) => tracing::debug!(
                "{}: context={:?} cluster={:?} namespace={:?} favorites={:?}",
                msg,
                name,
                ct.cluster_name,
                ct.namespace.active,
                ct.namespace.favorites
            ),
            None => tracing::debug!("{}: no active context", msg),
        }
    }

    fn active_pair(&self) -> Option<(&str, &Context)> {
        let name = self.k9s.active_context_name()?;
        let ct = self.k9s.active_context().ok()?;
        Some((name, ct))
    }
}
