//! Default configuration values
//!
//! Centralizes the constants shared by the registry, the namespace activator
//! and the flag reconciler.

/// Namespace used when nothing else resolves to a value
pub const DEFAULT_NAMESPACE: &str = "default";

/// Sentinel meaning "no namespace filter"
pub const NAMESPACE_ALL: &str = "all";

/// Blank namespace, normalized to [`NAMESPACE_ALL`] on activation
pub const BLANK_NAMESPACE: &str = "";

/// View shown when a context has no saved view
pub const DEFAULT_VIEW: &str = "po";

/// Maximum number of favorite namespaces kept per context
pub const MAX_FAVORITES: usize = 9;

/// Minimum (and default) refresh rate in seconds
pub const DEFAULT_REFRESH_RATE: u32 = 2;

/// Default number of connection retries before giving up
pub const DEFAULT_MAX_CONN_RETRY: u32 = 5;

/// Default log line count
pub const DEFAULT_LOG_TAIL: i64 = 100;

/// Max log lines kept in view
pub const DEFAULT_LOG_BUFFER: i64 = 5000;

/// Historical log timeframe in seconds (-1 means tail from the start)
pub const DEFAULT_LOG_SINCE_SECONDS: i64 = -1;

/// Directory mode used when creating config, data and dump directories
pub const DEFAULT_DIR_MODE: u32 = 0o744;

/// File mode used when writing the config file (unix only)
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Favorites a brand new context starts with
pub fn default_favorites() -> Vec<String> {
    vec![DEFAULT_NAMESPACE.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_favorites() {
        assert_eq!(default_favorites(), vec!["default".to_string()]);
    }

    #[test]
    fn test_modes() {
        assert_eq!(DEFAULT_DIR_MODE, 0o744);
        assert_eq!(DEFAULT_FILE_MODE, 0o644);
    }
}
