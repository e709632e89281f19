//! Namespace activation and favorites
//!
//! Within a context, tracks the active namespace and a bounded, most-recent-first
//! list of favorite namespaces.

use super::ConfigResult;
use super::defaults::{BLANK_NAMESPACE, NAMESPACE_ALL};
use super::schema::Namespace;
use crate::kube::{Connection, KubeSettings};

/// Outcome of checking favorites against a live connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesValidation {
    /// No connection, or the cluster could not be reached. Favorites untouched.
    Skipped,
    /// Every favorite was checked; `dropped` lists the ones removed
    Validated { dropped: Vec<String> },
}

impl FavoritesValidation {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

impl Namespace {
    /// Make `ns` the active namespace
    ///
    /// Unless favorites are locked, `ns` is also promoted into the favorites,
    /// capped at the settings' limit.
    pub fn set_active(&mut self, ns: &str, settings: &dyn KubeSettings) -> ConfigResult<()> {
        let max = settings.max_favorites()?;

        let ns = if ns == BLANK_NAMESPACE { NAMESPACE_ALL } else { ns };
        self.active = ns.to_string();
        if !self.lock_favorites {
            self.add_favorite(ns, max);
        }

        Ok(())
    }

    /// Drop favorites the cluster no longer knows about
    pub fn validate(&mut self, conn: Option<&dyn Connection>) -> FavoritesValidation {
        let Some(conn) = conn else {
            return FavoritesValidation::Skipped;
        };

        let mut dropped = Vec::new();
        for ns in &self.favorites {
            if ns == NAMESPACE_ALL {
                continue;
            }
            match conn.is_valid_namespace(ns) {
                Ok(true) => {}
                Ok(false) => dropped.push(ns.clone()),
                Err(e) => {
                    tracing::debug!("Skipping favorites validation: {}", e);
                    return FavoritesValidation::Skipped;
                }
            }
        }

        if !dropped.is_empty() {
            tracing::debug!("Dropping unknown favorite namespaces: {:?}", dropped);
            self.favorites.retain(|ns| !dropped.contains(ns));
        }

        FavoritesValidation::Validated { dropped }
    }

    /// Remove a namespace from the favorites
    pub fn remove_favorite(&mut self, ns: &str) {
        self.favorites.retain(|fav| fav != ns);
    }

    fn add_favorite(&mut self, ns: &str, max: usize) {
        if self.favorites.iter().any(|fav| fav == ns) {
            return;
        }
        self.favorites.insert(0, ns.to_string());
        self.favorites.truncate(max);
    }
}
