//! Command-line interface module for organize-files.
//!
//! This module handles all CLI-related functionality including:
//! - Command parsing (clap)
//! - Registry management (add, remove, list)
//! - Organization orchestration over one or many directories
//! - Rendering results through [`OutputFormatter`]

use crate::config::{self, Settings};
use crate::file_category::CategoryRules;
use crate::file_organizer::{FileOutcome, OrganizeError, OrganizeReport, Organizer};
use crate::output::OutputFormatter;
use crate::path_registry::{
    AddOutcome, DuplicatePolicy, PathRegistry, RegistryError, RegistryPolicy, TomlFileStore,
};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Sort the files of your directories into category folders.
#[derive(Debug, Parser)]
#[command(name = "organize-files", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the registry and settings files.
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Settings file to use instead of <config-dir>/settings.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Represents a CLI command to execute.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add a new directory path.
    #[command(visible_alias = "addpath")]
    Add {
        /// Directory to add, stored exactly as given.
        path: String,
        /// Accept paths that do not exist (yet).
        #[arg(long)]
        allow_missing: bool,
        /// Treat an already configured path as success.
        #[arg(long)]
        ignore_duplicate: bool,
    },
    /// Delete a directory path by index or by exact path.
    #[command(visible_alias = "deletepath", alias = "rm")]
    Remove {
        /// 1-based index from `list`, or the path itself.
        identifier: String,
    },
    /// List all configured paths.
    #[command(visible_alias = "listpaths")]
    List {
        /// Print the paths as a JSON array.
        #[arg(long)]
        json: bool,
    },
    /// Organize files in all configured paths, or in the given ones.
    Organize {
        /// Directories to organize instead of the configured ones.
        paths: Vec<PathBuf>,
        /// Show what would happen without moving anything.
        #[arg(long)]
        dry_run: bool,
        /// Print the per-directory reports as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Directory holding `paths.toml` and `settings.toml`.
    pub config_dir: PathBuf,
    /// Loaded settings.
    pub settings: Settings,
}

impl AppContext {
    /// Creates a context from already-resolved parts.
    pub fn new(config_dir: PathBuf, settings: Settings) -> Self {
        Self {
            config_dir,
            settings,
        }
    }

    /// Resolves the config directory and loads settings for `cli`.
    pub fn from_cli(cli: &Cli) -> Result<Self, String> {
        let config_dir = config::resolve_config_dir(config::APP_NAME, cli.config_dir.as_deref())
            .map_err(|e| format!("Error resolving configuration directory: {}", e))?;
        let settings = Settings::load(&config_dir, cli.settings.as_deref())
            .map_err(|e| format!("Error loading configuration: {}", e))?;
        Ok(Self::new(config_dir, settings))
    }

    /// Opens the registry stored in the config directory.
    pub fn open_registry(&self) -> Result<PathRegistry<TomlFileStore>, String> {
        PathRegistry::open(TomlFileStore::in_dir(&self.config_dir))
            .map_err(|e| format!("Error loading configured paths: {}", e))
    }
}

/// The outcome of organizing one directory, as rendered by `--json`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DirectoryRun {
    /// The directory was processed; individual files may still have been skipped.
    Done(OrganizeReport),
    /// The directory could not be processed at all.
    Failed { directory: PathBuf, error: String },
}

/// Runs the CLI application for parsed arguments.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use organize_files::cli::{run_cli, Cli};
///
/// let cli = Cli::parse_from(["organize-files", "list"]);
/// if let Err(e) = run_cli(cli) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(cli: Cli) -> Result<(), String> {
    let context = AppContext::from_cli(&cli)?;
    run_command(cli.command, &context)
}

/// Executes one command against `context`.
///
/// Informational outcomes (duplicate add, unknown path or index, missing
/// directory, skipped files) are printed and do not fail the command.
pub fn run_command(command: Command, context: &AppContext) -> Result<(), String> {
    match command {
        Command::Add {
            path,
            allow_missing,
            ignore_duplicate,
        } => {
            let mut policy = context.settings.registry;
            if allow_missing {
                policy.require_existing = false;
            }
            if ignore_duplicate {
                policy.on_duplicate = DuplicatePolicy::Ignore;
            }
            add_path(context, &path, &policy)
        }
        Command::Remove { identifier } => remove_path(context, &identifier),
        Command::List { json } => list_paths(context, json),
        Command::Organize {
            paths,
            dry_run,
            json,
        } => organize(context, paths, dry_run, json),
    }
}

fn add_path(context: &AppContext, path: &str, policy: &RegistryPolicy) -> Result<(), String> {
    let mut registry = context.open_registry()?;
    match registry.add(path, policy) {
        Ok(AddOutcome::Added) => {
            OutputFormatter::success(&format!("Path '{}' has been added.", path));
            Ok(())
        }
        Ok(AddOutcome::AlreadyPresent) => {
            OutputFormatter::info(&format!("Path '{}' is already configured.", path));
            Ok(())
        }
        Err(e) => report_registry_error(e),
    }
}

fn remove_path(context: &AppContext, identifier: &str) -> Result<(), String> {
    let mut registry = context.open_registry()?;
    match registry.remove_identifier(identifier) {
        Ok(removed) => {
            OutputFormatter::success(&format!("Path '{}' has been deleted.", removed));
            Ok(())
        }
        Err(e) => report_registry_error(e),
    }
}

fn report_registry_error(error: RegistryError) -> Result<(), String> {
    if error.is_informational() {
        OutputFormatter::warning(&error.to_string());
        Ok(())
    } else {
        Err(error.to_string())
    }
}

fn list_paths(context: &AppContext, json: bool) -> Result<(), String> {
    let registry = context.open_registry()?;
    if json {
        let rendered = serde_json::to_string_pretty(registry.list())
            .map_err(|e| format!("Error encoding paths: {}", e))?;
        OutputFormatter::plain(&rendered);
    } else {
        OutputFormatter::path_list(registry.list());
    }
    Ok(())
}

fn organize(
    context: &AppContext,
    paths: Vec<PathBuf>,
    dry_run: bool,
    json: bool,
) -> Result<(), String> {
    let targets = if paths.is_empty() {
        let registry = context.open_registry()?;
        if registry.is_empty() {
            OutputFormatter::info("No paths configured. Use 'add' to add a directory.");
            return Ok(());
        }
        registry.list().iter().map(PathBuf::from).collect()
    } else {
        paths
    };

    let organizer = Organizer::new(CategoryRules::default());
    let runs = organize_paths(&organizer, &targets, dry_run, !json);

    if json {
        let rendered = serde_json::to_string_pretty(&runs)
            .map_err(|e| format!("Error encoding report: {}", e))?;
        OutputFormatter::plain(&rendered);
    }
    Ok(())
}

/// Organizes each directory in turn; a failing directory never stops the batch.
///
/// With `verbose` set, progress and results are printed as each directory
/// completes.
pub fn organize_paths(
    organizer: &Organizer,
    paths: &[PathBuf],
    dry_run: bool,
    verbose: bool,
) -> Vec<DirectoryRun> {
    paths
        .iter()
        .map(|path| match organize_directory(organizer, path, dry_run, verbose) {
            Ok(report) => DirectoryRun::Done(report),
            Err(e) => {
                if verbose {
                    match e {
                        OrganizeError::DirectoryNotFound { .. } => {
                            OutputFormatter::warning(&e.to_string())
                        }
                        OrganizeError::ReadDirFailed { .. } => {
                            OutputFormatter::error(&e.to_string())
                        }
                    }
                }
                log::warn!("{}", e);
                DirectoryRun::Failed {
                    directory: path.clone(),
                    error: e.to_string(),
                }
            }
        })
        .collect()
}

/// Organizes (or plans) a single directory.
fn organize_directory(
    organizer: &Organizer,
    directory: &Path,
    dry_run: bool,
    verbose: bool,
) -> Result<OrganizeReport, OrganizeError> {
    let files = organizer.scan(directory)?;

    if !verbose {
        return Ok(organizer.process(directory, &files, dry_run, |_| {}));
    }

    if dry_run {
        OutputFormatter::dry_run_notice(&format!(
            "Analyzing contents of: {}",
            directory.display()
        ));
    } else {
        OutputFormatter::info(&format!(
            "Organizing files in directory: {}",
            directory.display()
        ));
    }

    if files.is_empty() {
        OutputFormatter::plain("No files found to organize.");
        return Ok(organizer.process(directory, &files, dry_run, |_| {}));
    }

    let pb = OutputFormatter::create_progress_bar(files.len() as u64);
    let report = organizer.process(directory, &files, dry_run, |outcome| {
        pb.set_message(outcome.name().to_string());
        pb.inc(1);
    });
    pb.finish_and_clear();

    if dry_run {
        for outcome in &report.outcomes {
            if let FileOutcome::Moved {
                name,
                category,
                final_name,
            } = outcome
            {
                OutputFormatter::plain(&format!(
                    " - {}\n   → Would move to {}/{}",
                    name, category, final_name
                ));
            }
        }
    }

    OutputFormatter::report(&report);

    if dry_run {
        OutputFormatter::success("Dry run complete. No files were modified.");
    } else if report.skipped().next().is_some() {
        OutputFormatter::warning(
            "Some files could not be organized. Please review the messages above.",
        );
    } else {
        OutputFormatter::success("Organization complete!");
    }

    Ok(report)
}
