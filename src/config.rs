//! Application settings and config directory resolution.
//!
//! Settings live in a TOML file next to the path registry. Every key is
//! optional; a missing file means defaults.
//!
//! # Configuration File Format
//!
//! ```toml
//! [registry]
//! require_existing = true   # reject paths that are not existing directories
//! on_duplicate = "reject"   # or "ignore"
//! ```

use crate::path_registry::RegistryPolicy;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name used for the per-user config directory.
pub const APP_NAME: &str = "organize-files";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "ORGANIZE_FILES_CONFIG_DIR";

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Errors that can occur while resolving or loading configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// IO error while reading configuration or creating its directory.
    IoError(String),
    /// The platform has no per-user config location (e.g. no home directory).
    NoConfigDir,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
            ConfigError::NoConfigDir => write!(
                f,
                "Could not determine a configuration directory; set {} or pass --config-dir",
                CONFIG_DIR_ENV
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolves (and creates) the per-user config directory.
///
/// Resolution order:
/// 1. `override_dir`, if given
/// 2. the `ORGANIZE_FILES_CONFIG_DIR` environment variable
/// 3. the platform config directory for `app_name`
///
/// # Errors
///
/// Returns `ConfigError::NoConfigDir` if nothing applies and
/// `ConfigError::IoError` if the directory cannot be created.
pub fn resolve_config_dir(
    app_name: &str,
    override_dir: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    let dir = if let Some(dir) = override_dir {
        dir.to_path_buf()
    } else if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        PathBuf::from(dir)
    } else {
        ProjectDirs::from("", "", app_name)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::NoConfigDir)?
    };

    fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::IoError(format!("{}: {}", dir.display(), e)))?;
    log::debug!("Using config directory {}", dir.display());
    Ok(dir)
}

/// Top-level settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Rules applied when adding paths to the registry.
    #[serde(default)]
    pub registry: RegistryPolicy,
}

impl Settings {
    /// Load settings, with fallback to defaults.
    ///
    /// Attempts to load settings in the following order:
    /// 1. If `settings_path` is provided, load from that file
    /// 2. Look for `settings.toml` in `config_dir`
    /// 3. Fall back to default settings
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file is explicitly provided but cannot be
    /// read, or if any settings file found is malformed.
    pub fn load(config_dir: &Path, settings_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = settings_path {
            return Self::load_from_file(path);
        }

        let default_path = config_dir.join(SETTINGS_FILE_NAME);
        if default_path.exists() {
            return Self::load_from_file(&default_path);
        }

        Ok(Self::default())
    }

    /// Load settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if file cannot be read.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_registry::DuplicatePolicy;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_require_existing_and_reject_duplicates() {
        let settings = Settings::default();
        assert!(settings.registry.require_existing);
        assert_eq!(settings.registry.on_duplicate, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let settings = Settings::load(temp_dir.path(), None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_config_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(
            temp_dir.path().join(SETTINGS_FILE_NAME),
            "[registry]\nrequire_existing = false\non_duplicate = \"ignore\"\n",
        )
        .unwrap();

        let settings = Settings::load(temp_dir.path(), None).unwrap();
        assert!(!settings.registry.require_existing);
        assert_eq!(settings.registry.on_duplicate, DuplicatePolicy::Ignore);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "[registry]\non_duplicate = \"ignore\"\n").unwrap();

        let settings = Settings::load(temp_dir.path(), Some(&path)).unwrap();
        assert!(settings.registry.require_existing);
        assert_eq!(settings.registry.on_duplicate, DuplicatePolicy::Ignore);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let result = Settings::load(temp_dir.path(), Some(&temp_dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_invalid_value_is_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(
            temp_dir.path().join(SETTINGS_FILE_NAME),
            "[registry]\non_duplicate = \"sometimes\"\n",
        )
        .unwrap();

        let result = Settings::load(temp_dir.path(), None);
        assert!(matches!(result, Err(ConfigError::ConfigInvalid(_))));
    }

    #[test]
    fn test_resolve_config_dir_override_is_created() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let wanted = temp_dir.path().join("a/b");

        let dir = resolve_config_dir(APP_NAME, Some(&wanted)).unwrap();
        assert_eq!(dir, wanted);
        assert!(wanted.is_dir());
    }
}
