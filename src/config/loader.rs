//! Configuration loading and saving
//!
//! Reads the YAML document into its optional patch form and writes the live
//! document back out. Writes go through a temp file in the target directory so
//! a failed write never leaves a truncated config behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::defaults::DEFAULT_DIR_MODE;
#[cfg(unix)]
use super::defaults::DEFAULT_FILE_MODE;
use super::paths;
use super::schema::{ConfigDocument, ConfigFilePatch, K9s};
use super::{ConfigError, ConfigResult};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a configuration file as a patch
    ///
    /// Missing keys stay `None`; unknown keys are ignored.
    pub fn load_file(path: &Path) -> ConfigResult<ConfigFilePatch> {
        let contents = std::fs::read(path).map_err(|e| ConfigError::io(path, e))?;

        serde_yaml::from_slice(&contents).map_err(|e| ConfigError::Decode {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Serialize the document under the top-level `k9s` key
    pub fn to_yaml(k9s: &K9s) -> ConfigResult<String> {
        serde_yaml::to_string(&ConfigDocument { k9s }).map_err(ConfigError::Encode)
    }

    /// Save configuration to a file
    pub fn save_file(k9s: &K9s, path: &Path) -> ConfigResult<()> {
        let yaml = Self::to_yaml(k9s).inspect_err(|e| {
            tracing::error!("Unable to serialize config for {}: {}", path.display(), e);
        })?;
        write_file(path, yaml.as_bytes())
    }
}

/// Write `contents` to `path`, creating the parent directory first
pub fn write_file(path: &Path, contents: &[u8]) -> ConfigResult<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    paths::ensure_dir(&parent, DEFAULT_DIR_MODE).map_err(|e| ConfigError::io(&parent, e))?;

    let mut tmp =
        tempfile::NamedTempFile::new_in(&parent).map_err(|e| ConfigError::io(&parent, e))?;
    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| ConfigError::io(tmp.path(), e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(DEFAULT_FILE_MODE);
        std::fs::set_permissions(tmp.path(), perms).map_err(|e| ConfigError::io(tmp.path(), e))?;
    }

    tmp.persist(path).map_err(|e| ConfigError::io(path, e.error))?;
    tracing::debug!("Wrote config file {}", path.display());

    Ok(())
}

/// Pick the YAML extension for a config path
///
/// Paths without an extension, or with `.yml`/`.yaml`, resolve to `.yml` unless
/// only the `.yaml` sibling exists on disk. Any other extension is returned
/// unchanged with a warning.
pub fn yaml_extension(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        None | Some("yml") | Some("yaml") => {}
        Some(_) => {
            tracing::warn!("Config: File {} is not a yaml file", path.display());
            return path.to_path_buf();
        }
    }

    let yml = path.with_extension("yml");
    if yml.exists() {
        return yml;
    }
    let yaml = path.with_extension("yaml");
    if yaml.exists() {
        return yaml;
    }

    yml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_extension_defaults_to_yml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cfg");
        assert_eq!(yaml_extension(&path), tmp.path().join("cfg.yml"));
    }

    #[test]
    fn test_yaml_extension_prefers_existing_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("cfg.yaml"), "k9s: {}\n").unwrap();

        assert_eq!(
            yaml_extension(&tmp.path().join("cfg")),
            tmp.path().join("cfg.yaml")
        );
        assert_eq!(
            yaml_extension(&tmp.path().join("cfg.yml")),
            tmp.path().join("cfg.yaml")
        );
    }

    #[test]
    fn test_yaml_extension_both_exist() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("cfg.yaml"), "").unwrap();
        std::fs::write(tmp.path().join("cfg.yml"), "").unwrap();

        assert_eq!(
            yaml_extension(&tmp.path().join("cfg.yaml")),
            tmp.path().join("cfg.yml")
        );
    }

    #[test]
    fn test_yaml_extension_rejects_other_extensions() {
        let path = PathBuf::from("/tmp/config.json");
        assert_eq!(yaml_extension(&path), path);
    }

    #[test]
    fn test_load_file_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load_file(&tmp.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_file_malformed() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "k9s:\n  refreshRate: [not, a, number]\n").unwrap();

        let err = ConfigLoader::load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Decode { .. }));
    }

    #[test]
    fn test_save_file_creates_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.yaml");

        ConfigLoader::save_file(&K9s::default(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("k9s:"));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        ConfigLoader::save_file(&K9s::default(), &path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, DEFAULT_FILE_MODE);
    }
}
