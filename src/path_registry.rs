//! Durable list of directories to organize.
//!
//! The registry is an ordered, duplicate-free sequence of path strings. Every
//! mutation goes through a load-modify-save cycle: the complete new sequence
//! is handed to the [`PathStore`] and only adopted in memory once the store
//! reports success, so a failed write never leaves the in-memory view ahead
//! of what is on disk.
//!
//! # Storage Format
//!
//! [`TomlFileStore`] keeps the list in a small TOML document:
//!
//! ```toml
//! paths = ["/home/me/Downloads", "/home/me/Desktop"]
//! updated_at = "2026-10-19T08:00:00Z"
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the registry inside the config directory.
pub const REGISTRY_FILE_NAME: &str = "paths.toml";

/// Errors raised by a [`PathStore`].
#[derive(Debug)]
pub enum StoreError {
    /// The registry file exists but could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The registry file could not be written or replaced.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The registry file is not valid TOML or has the wrong shape.
    Parse { path: PathBuf, reason: String },
    /// The path list could not be encoded.
    Serialize(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            Self::Write { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            Self::Parse { path, reason } => {
                write!(f, "Invalid registry file {}: {}", path.display(), reason)
            }
            Self::Serialize(reason) => write!(f, "Failed to encode path list: {}", reason),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors returned by [`PathRegistry`] operations.
#[derive(Debug)]
pub enum RegistryError {
    /// The path was rejected before anything changed.
    Validation { path: String, reason: String },
    /// The path is already configured.
    Duplicate(String),
    /// No configured path matches the given string.
    NotFound(String),
    /// The 1-based index is outside `[1, len]`.
    IndexOutOfRange { index: usize, len: usize },
    /// Persisting the registry failed; the previous state is still in effect.
    Store(StoreError),
}

impl RegistryError {
    /// True for outcomes that should be shown to the user as information
    /// rather than treated as a failure.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            Self::Duplicate(_) | Self::NotFound(_) | Self::IndexOutOfRange { .. }
        )
    }
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { path, reason } => {
                write!(f, "The path '{}' {}. Please provide a valid path.", path, reason)
            }
            Self::Duplicate(path) => write!(f, "Path '{}' is already configured.", path),
            Self::NotFound(path) => write!(f, "Path '{}' is not configured.", path),
            Self::IndexOutOfRange { index, len } => write!(
                f,
                "Invalid index: {}. Please provide a number between 1 and {}.",
                index, len
            ),
            Self::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Whole-collection persistence for the registry.
pub trait PathStore {
    /// Loads the stored sequence. A store that was never written is empty.
    fn load_paths(&self) -> Result<Vec<String>, StoreError>;

    /// Replaces the stored sequence. Either the new sequence is durable when
    /// this returns `Ok`, or the old one is still in place.
    fn save_paths(&self, paths: &[String]) -> Result<(), StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// Stores the registry as a TOML file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    /// Uses the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses [`REGISTRY_FILE_NAME`] inside `config_dir`.
    pub fn in_dir(config_dir: &Path) -> Self {
        Self::new(config_dir.join(REGISTRY_FILE_NAME))
    }

    /// The registry file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_atomically(&self, content: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        let result = (|| {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp_path, &self.path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

impl PathStore for TomlFileStore {
    fn load_paths(&self) -> Result<Vec<String>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StoreError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        let file: RegistryFile = toml::from_str(&content).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        Ok(file.paths)
    }

    fn save_paths(&self, paths: &[String]) -> Result<(), StoreError> {
        let file = RegistryFile {
            paths: paths.to_vec(),
            updated_at: Some(Utc::now()),
        };
        let content =
            toml::to_string_pretty(&file).map_err(|e| StoreError::Serialize(e.to_string()))?;

        self.write_atomically(&content)
            .map_err(|e| StoreError::Write {
                path: self.path.clone(),
                source: e,
            })
    }
}

/// What to do when `add` is given a path that is already configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with [`RegistryError::Duplicate`].
    #[default]
    Reject,
    /// Succeed without changing anything.
    Ignore,
}

/// Caller-selectable rules for [`PathRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryPolicy {
    /// Require the path to be an existing directory at add time.
    #[serde(default = "default_require_existing")]
    pub require_existing: bool,

    /// Handling of paths that are already configured.
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
}

/// Helper function for default value of `require_existing`.
fn default_require_existing() -> bool {
    true
}

impl Default for RegistryPolicy {
    fn default() -> Self {
        Self {
            require_existing: default_require_existing(),
            on_duplicate: DuplicatePolicy::default(),
        }
    }
}

/// Result of a successful [`PathRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The path was appended and persisted.
    Added,
    /// The path was already present and [`DuplicatePolicy::Ignore`] applied.
    AlreadyPresent,
}

/// Identifies the entry to remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    /// Exact path string.
    Path(String),
    /// 1-based position as shown by `list`.
    Index(usize),
}

impl RemoveTarget {
    /// Interprets a user-supplied identifier against the current entries.
    ///
    /// An exact path match wins; otherwise a decimal number is read as an
    /// index, and anything else as a path.
    ///
    /// ```
    /// use organize_files::path_registry::RemoveTarget;
    ///
    /// let paths = vec!["/data".to_string(), "2".to_string()];
    /// assert_eq!(RemoveTarget::parse("2", &paths), RemoveTarget::Path("2".into()));
    /// assert_eq!(RemoveTarget::parse("1", &paths), RemoveTarget::Index(1));
    /// assert_eq!(RemoveTarget::parse("/tmp", &paths), RemoveTarget::Path("/tmp".into()));
    /// ```
    pub fn parse(identifier: &str, paths: &[String]) -> Self {
        if paths.iter().any(|p| p == identifier) {
            return Self::Path(identifier.to_string());
        }
        match identifier.trim().parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Path(identifier.to_string()),
        }
    }
}

/// The ordered, duplicate-free list of directories to organize.
///
/// # Examples
///
/// ```no_run
/// use organize_files::path_registry::{PathRegistry, RegistryPolicy, TomlFileStore};
/// use std::path::Path;
///
/// let store = TomlFileStore::in_dir(Path::new("/home/me/.config/organize-files"));
/// let mut registry = PathRegistry::open(store)?;
/// registry.add("/home/me/Downloads", &RegistryPolicy::default())?;
/// for (i, path) in registry.list().iter().enumerate() {
///     println!("{}. {}", i + 1, path);
/// }
/// # Ok::<(), organize_files::path_registry::RegistryError>(())
/// ```
#[derive(Debug)]
pub struct PathRegistry<S: PathStore> {
    store: S,
    paths: Vec<String>,
}

impl<S: PathStore> PathRegistry<S> {
    /// Loads the registry from `store`.
    ///
    /// Duplicate entries left behind by hand edits are dropped, keeping the
    /// first occurrence.
    pub fn open(store: S) -> RegistryResult<Self> {
        let loaded = store.load_paths()?;
        let mut paths: Vec<String> = Vec::with_capacity(loaded.len());
        for path in loaded {
            if paths.contains(&path) {
                log::warn!("Ignoring duplicate registry entry '{}'", path);
            } else {
                paths.push(path);
            }
        }
        Ok(Self { store, paths })
    }

    /// The configured paths in insertion order. Empty if none are configured.
    pub fn list(&self) -> &[String] {
        &self.paths
    }

    /// Number of configured paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True if no path is configured.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Appends `path` and persists the registry.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::Validation`] if the path is blank, or if
    ///   `policy.require_existing` is set and it is not an existing directory.
    /// * [`RegistryError::Duplicate`] if already present and the policy rejects
    ///   duplicates.
    /// * [`RegistryError::Store`] if persisting fails; nothing changes.
    pub fn add(&mut self, path: &str, policy: &RegistryPolicy) -> RegistryResult<AddOutcome> {
        if path.trim().is_empty() {
            return Err(RegistryError::Validation {
                path: path.to_string(),
                reason: "is empty".to_string(),
            });
        }

        if policy.require_existing {
            let fs_path = Path::new(path);
            if !fs_path.exists() {
                return Err(RegistryError::Validation {
                    path: path.to_string(),
                    reason: "does not exist".to_string(),
                });
            }
            if !fs_path.is_dir() {
                return Err(RegistryError::Validation {
                    path: path.to_string(),
                    reason: "is not a directory".to_string(),
                });
            }
        }

        if self.paths.iter().any(|p| p == path) {
            return match policy.on_duplicate {
                DuplicatePolicy::Reject => Err(RegistryError::Duplicate(path.to_string())),
                DuplicatePolicy::Ignore => Ok(AddOutcome::AlreadyPresent),
            };
        }

        let mut next = self.paths.clone();
        next.push(path.to_string());
        self.commit(next)?;
        log::info!("Added '{}' to the registry", path);
        Ok(AddOutcome::Added)
    }

    /// Removes one entry and persists the registry. Returns the removed path.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::NotFound`] if no entry equals the given path.
    /// * [`RegistryError::IndexOutOfRange`] if the index is not in `[1, len]`.
    /// * [`RegistryError::Store`] if persisting fails; nothing changes.
    pub fn remove(&mut self, target: &RemoveTarget) -> RegistryResult<String> {
        let position = match target {
            RemoveTarget::Path(path) => self
                .paths
                .iter()
                .position(|p| p == path)
                .ok_or_else(|| RegistryError::NotFound(path.clone()))?,
            RemoveTarget::Index(index) => {
                if *index < 1 || *index > self.paths.len() {
                    return Err(RegistryError::IndexOutOfRange {
                        index: *index,
                        len: self.paths.len(),
                    });
                }
                index - 1
            }
        };

        let mut next = self.paths.clone();
        let removed = next.remove(position);
        self.commit(next)?;
        log::info!("Removed '{}' from the registry", removed);
        Ok(removed)
    }

    /// Removes the entry named by a raw user identifier; see [`RemoveTarget::parse`].
    pub fn remove_identifier(&mut self, identifier: &str) -> RegistryResult<String> {
        let target = RemoveTarget::parse(identifier, &self.paths);
        self.remove(&target)
    }

    fn commit(&mut self, next: Vec<String>) -> RegistryResult<()> {
        self.store.save_paths(&next)?;
        self.paths = next;
        Ok(())
    }
}
