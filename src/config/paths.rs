//! Cross-platform directory path resolution
//!
//! Provides functions to resolve platform-appropriate paths for configuration,
//! data, and per-context side files.
//! - Linux/macOS: XDG Base Directory specification (~/.config, ~/.local/share)
//! - Windows: Known Folder API (AppData\Roaming, AppData\Local)

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::loader::yaml_extension;

/// Application name used for every directory below
pub const APP_NAME: &str = "k9s";

/// Environment variable overriding the config home entirely
pub const K9S_CONFIG_DIR_ENV: &str = "K9S_CONFIG_DIR";

/// Environment variable overriding the data home entirely
pub const K9S_DATA_DIR_ENV: &str = "K9S_DATA_DIR";

/// Get the configuration directory path
///
/// Checks K9S_CONFIG_DIR first, then falls back to:
/// - Unix (Linux/macOS): XDG_CONFIG_HOME/k9s or ~/.config/k9s
/// - Windows: %APPDATA%\k9s\config
pub fn config_dir() -> PathBuf {
    resolve_config_dir(non_empty_var(K9S_CONFIG_DIR_ENV))
}

/// Config home for an optional override value
pub fn resolve_config_dir(env_override: Option<OsString>) -> PathBuf {
    env_override.map(PathBuf::from).unwrap_or_else(|| {
        #[cfg(windows)]
        {
            use directories::ProjectDirs;
            ProjectDirs::from("", "", APP_NAME)
                .map(|dirs| dirs.config_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
        }
        #[cfg(not(windows))]
        {
            use directories::BaseDirs;
            non_empty_var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| {
                    BaseDirs::new()
                        .map(|dirs| dirs.home_dir().join(".config"))
                        .unwrap_or_else(|| PathBuf::from(".").join(".config"))
                })
                .join(APP_NAME)
        }
    })
}

/// Get the data directory path
///
/// Checks K9S_DATA_DIR first, then falls back to:
/// - Unix (Linux/macOS): XDG_DATA_HOME/k9s or ~/.local/share/k9s
/// - Windows: %LOCALAPPDATA%\k9s\data
pub fn data_dir() -> PathBuf {
    non_empty_var(K9S_DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            #[cfg(windows)]
            {
                use directories::ProjectDirs;
                ProjectDirs::from("", "", APP_NAME)
                    .map(|dirs| dirs.data_dir().to_path_buf())
                    .unwrap_or_else(|| {
                        PathBuf::from(".")
                            .join(".local")
                            .join("share")
                            .join(APP_NAME)
                    })
            }
            #[cfg(not(windows))]
            {
                use directories::BaseDirs;
                non_empty_var("XDG_DATA_HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| {
                        BaseDirs::new()
                            .map(|dirs| dirs.home_dir().join(".local").join("share"))
                            .unwrap_or_else(|| PathBuf::from(".").join(".local").join("share"))
                    })
                    .join(APP_NAME)
            }
        })
}

/// Get the root configuration file path (`config.yml` or `config.yaml`)
pub fn root_config_path() -> PathBuf {
    yaml_extension(&config_dir().join("config"))
}

/// Default screen dump directory
pub fn screen_dumps_dir() -> PathBuf {
    data_dir().join("screen-dumps")
}

/// Get the context-specific directory path
pub fn context_dir(cluster: &str, context: &str) -> PathBuf {
    data_dir()
        .join("clusters")
        .join(sanitize_file_name(cluster))
        .join(sanitize_file_name(context))
}

/// Get the context-specific aliases file path
pub fn context_aliases_path(cluster: &str, context: &str) -> PathBuf {
    context_dir(cluster, context).join("aliases.yaml")
}

/// Get the context-specific plugins file path
pub fn context_plugins_path(cluster: &str, context: &str) -> PathBuf {
    context_dir(cluster, context).join("plugins.yaml")
}

/// Make a cluster or context name usable as a single path segment
///
/// EKS/GKE names routinely carry `:` and `/`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '-',
            c if c.is_whitespace() => '-',
            c => c,
        })
        .collect()
}

/// Ensure a directory exists, creating it (and its parents) with `mode`
///
/// Fails with `AlreadyExists` when `path` is something other than a directory.
pub fn ensure_dir(path: &Path, mode: u32) -> std::io::Result<()> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a directory", path.display()),
        ));
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path)
}

fn non_empty_var(key: &str) -> Option<OsString> {
    std::env::var_os(key).filter(|v| !v.is_empty())
}
