//! organize-files - sort directories into category folders
//!
//! This library keeps a durable list of directories to tidy, classifies the
//! files directly inside each one by extension, and moves them into category
//! subfolders without ever overwriting an existing file.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod output;
pub mod path_registry;

pub use config::{ConfigError, Settings};
pub use file_category::{Category, CategoryRules};
pub use file_organizer::{FileOutcome, OrganizeError, OrganizeReport, Organizer};
pub use path_registry::{PathRegistry, PathStore, RegistryError, RegistryPolicy, TomlFileStore};

pub use cli::{Cli, Command, run_cli};
