/// File organization system for moving files into category directories.
///
/// This module classifies the regular files found directly inside a
/// directory and moves each one into the subdirectory of its category,
/// picking a `name_N.ext` variant whenever the plain name is already taken.
/// A file that cannot be moved is reported and skipped; it never stops the
/// rest of the run.
use crate::file_category::{Category, CategoryRules};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::ffi::{OsStr, OsString};
use std::fs::{self, FileTimes, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Windows `ERROR_SHARING_VIOLATION`: another process holds the file open.
#[cfg(windows)]
fn is_sharing_violation(error: &io::Error) -> bool {
    error.raw_os_error() == Some(32)
}

#[cfg(not(windows))]
fn is_sharing_violation(_error: &io::Error) -> bool {
    false
}

/// Errors that stop a whole directory from being organized.
///
/// These are reported per directory; callers processing a batch move on to
/// the next directory.
#[derive(Debug)]
pub enum OrganizeError {
    /// The target does not exist or is not a directory.
    DirectoryNotFound { path: PathBuf },
    /// The directory exists but its entries could not be listed.
    ReadDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryNotFound { path } => {
                write!(f, "Directory {} does not exist, skipping", path.display())
            }
            Self::ReadDirFailed { path, source } => {
                write!(f, "Error reading directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Why a single file was left where it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The category directory could not be created.
    DirectoryCreationFailed(String),
    /// The file is locked by another process.
    InUse(String),
    /// The OS refused the move.
    PermissionDenied(String),
    /// Any other I/O failure while moving.
    MoveFailed(String),
}

impl SkipReason {
    fn from_move_error(error: &io::Error) -> Self {
        if is_sharing_violation(error) {
            return Self::InUse(error.to_string());
        }
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(error.to_string()),
            io::ErrorKind::ResourceBusy => Self::InUse(error.to_string()),
            _ => Self::MoveFailed(error.to_string()),
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed(e) => {
                write!(f, "could not create category folder: {}", e)
            }
            Self::InUse(e) => write!(f, "it is in use ({})", e),
            Self::PermissionDenied(e) => write!(f, "permission denied ({})", e),
            Self::MoveFailed(e) => write!(f, "{}", e),
        }
    }
}

/// The outcome for one regular file of the target directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file now lives at `<directory>/<category>/<final_name>`.
    Moved {
        name: String,
        category: Category,
        final_name: String,
    },
    /// The file was left in place.
    Skipped { name: String, reason: SkipReason },
}

impl FileOutcome {
    /// The original file name.
    pub fn name(&self) -> &str {
        match self {
            Self::Moved { name, .. } | Self::Skipped { name, .. } => name,
        }
    }
}

/// Everything that happened to one directory during a run.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizeReport {
    /// The directory that was organized.
    pub directory: PathBuf,
    /// True if nothing was actually moved.
    pub dry_run: bool,
    /// One entry per regular file, in processing order.
    pub outcomes: Vec<FileOutcome>,
}

impl OrganizeReport {
    fn new(directory: &Path, dry_run: bool) -> Self {
        Self {
            directory: directory.to_path_buf(),
            dry_run,
            outcomes: Vec::new(),
        }
    }

    /// Number of files moved (or, for a dry run, that would be moved).
    pub fn moved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Moved { .. }))
            .count()
    }

    /// Files that were skipped, with the reason.
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Skipped { name, reason } => Some((name.as_str(), reason)),
            FileOutcome::Moved { .. } => None,
        })
    }

    /// Moved files counted per category, ordered by category.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for outcome in &self.outcomes {
            if let FileOutcome::Moved { category, .. } = outcome {
                *counts.entry(*category).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Builds the `counter`-th collision candidate for `name`.
///
/// The name is split at its last `.`; a name without one (or whose only dot
/// is the leading character) gets the suffix appended at the end.
///
/// # Examples
///
/// ```
/// use organize_files::file_organizer::collision_candidate;
///
/// assert_eq!(collision_candidate("report.pdf", 1), "report_1.pdf");
/// assert_eq!(collision_candidate("archive.tar.gz", 2), "archive.tar_2.gz");
/// assert_eq!(collision_candidate("notes", 3), "notes_3");
/// assert_eq!(collision_candidate(".env", 1), ".env_1");
/// ```
pub fn collision_candidate(name: &str, counter: u64) -> String {
    match name.rfind('.') {
        Some(pos) if pos > 0 => format!("{}_{}.{}", &name[..pos], counter, &name[pos + 1..]),
        _ => format!("{}_{}", name, counter),
    }
}

/// Picks the first free file name inside `category_dir`.
///
/// `name` itself is tried first, then `base_1.ext`, `base_2.ext`, ... until
/// `is_taken` reports a free slot.
pub fn resolve_destination(
    category_dir: &Path,
    name: &OsStr,
    mut is_taken: impl FnMut(&Path) -> bool,
) -> PathBuf {
    let first = category_dir.join(name);
    if !is_taken(&first) {
        return first;
    }

    // Suffixed candidates are built from the lossy name; only non-UTF-8
    // names are affected.
    let name = name.to_string_lossy();
    let mut counter = 1u64;
    loop {
        let candidate = category_dir.join(collision_candidate(&name, counter));
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// True if anything (file, directory, dangling link) occupies `path`.
fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Moves a file, falling back to copy-and-delete across filesystems.
///
/// On the fallback path the source's access and modification times are
/// carried over to the copy where the platform allows it. If the source
/// cannot be removed afterwards the copy is deleted again and the error is
/// returned, so the file is never duplicated.
///
/// # Examples
///
/// ```no_run
/// use organize_files::file_organizer::move_file;
/// use std::path::Path;
///
/// move_file(Path::new("/tmp/a.txt"), Path::new("/mnt/usb/documents/a.txt"))?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!(
                "{} is on another device, copying instead of renaming",
                destination.display()
            );
            copy_then_remove(source, destination)
        }
        Err(e) => Err(e),
    }
}

fn copy_then_remove(source: &Path, destination: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source)?;
    if let Err(e) = fs::copy(source, destination) {
        discard_copy(destination);
        return Err(e);
    }

    let restore_times = || -> io::Result<()> {
        let times = FileTimes::new()
            .set_accessed(metadata.accessed()?)
            .set_modified(metadata.modified()?);
        OpenOptions::new()
            .write(true)
            .open(destination)?
            .set_times(times)
    };
    if let Err(e) = restore_times() {
        log::debug!("Could not preserve timestamps on {}: {}", destination.display(), e);
    }

    if let Err(e) = fs::remove_file(source) {
        discard_copy(destination);
        return Err(e);
    }
    Ok(())
}

fn discard_copy(destination: &Path) {
    match fs::remove_file(destination) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => log::warn!(
            "Could not remove partial copy {}: {}",
            destination.display(),
            e
        ),
    }
}

/// True if `category_dir` cannot serve as a folder: something that is not a
/// directory (or a link to one) already sits at that path.
fn is_blocked(category_dir: &Path) -> bool {
    occupied(category_dir) && !category_dir.is_dir()
}

/// Organizes the regular files of a directory into category subdirectories.
///
/// One directory is handled per call, one file at a time. Subdirectories,
/// symlinks and special files are never touched.
///
/// # Examples
///
/// ```no_run
/// use organize_files::file_organizer::Organizer;
/// use std::path::Path;
///
/// let organizer = Organizer::default();
/// match organizer.organize(Path::new("/home/me/Downloads")) {
///     Ok(report) => println!("Moved {} files", report.moved_count()),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Organizer {
    rules: CategoryRules,
}

impl Organizer {
    /// Creates an organizer using the given category rules.
    pub fn new(rules: CategoryRules) -> Self {
        Self { rules }
    }

    /// Moves every regular file of `directory` into its category folder.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError::DirectoryNotFound`] without touching the
    /// filesystem if `directory` is missing or not a directory. Per-file
    /// failures are not errors; they show up as [`FileOutcome::Skipped`].
    pub fn organize(&self, directory: &Path) -> OrganizeResult<OrganizeReport> {
        let files = self.scan(directory)?;
        Ok(self.process(directory, &files, false, |_| {}))
    }

    /// Computes what [`Organizer::organize`] would do without changing anything.
    pub fn plan(&self, directory: &Path) -> OrganizeResult<OrganizeReport> {
        let files = self.scan(directory)?;
        Ok(self.process(directory, &files, true, |_| {}))
    }

    /// Lists the names of the regular files directly inside `directory`.
    ///
    /// Entries are returned in the order the filesystem yields them.
    pub fn scan(&self, directory: &Path) -> OrganizeResult<Vec<OsString>> {
        let is_dir = fs::metadata(directory)
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(OrganizeError::DirectoryNotFound {
                path: directory.to_path_buf(),
            });
        }

        let entries = fs::read_dir(directory).map_err(|e| OrganizeError::ReadDirFailed {
            path: directory.to_path_buf(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries.flatten() {
            // file_type() does not follow symlinks, so links are left alone.
            if let Ok(file_type) = entry.file_type()
                && file_type.is_file()
            {
                files.push(entry.file_name());
            }
        }
        log::debug!(
            "Found {} regular files in {}",
            files.len(),
            directory.display()
        );
        Ok(files)
    }

    /// Processes previously scanned files, calling `observe` after each one.
    ///
    /// With `dry_run` set nothing is created or moved; destinations chosen
    /// earlier in the same run count as taken so the plan matches a real run.
    pub fn process(
        &self,
        directory: &Path,
        files: &[OsString],
        dry_run: bool,
        mut observe: impl FnMut(&FileOutcome),
    ) -> OrganizeReport {
        let mut report = OrganizeReport::new(directory, dry_run);
        let mut planned: HashSet<PathBuf> = HashSet::new();

        for name in files {
            let outcome = if dry_run {
                self.plan_file(directory, name, &mut planned)
            } else {
                self.organize_file(directory, name)
            };
            observe(&outcome);
            report.outcomes.push(outcome);
        }
        report
    }

    fn organize_file(&self, directory: &Path, name: &OsStr) -> FileOutcome {
        let display_name = name.to_string_lossy().into_owned();
        let category = self.rules.categorize_name(&display_name);
        let category_dir = directory.join(category.dir_name());

        if let Err(e) = fs::create_dir_all(&category_dir) {
            log::warn!("Could not create {}: {}", category_dir.display(), e);
            return FileOutcome::Skipped {
                name: display_name,
                reason: SkipReason::DirectoryCreationFailed(e.to_string()),
            };
        }

        let destination = resolve_destination(&category_dir, name, occupied);
        let source = directory.join(name);

        match move_file(&source, &destination) {
            Ok(()) => {
                log::debug!("{} -> {}", source.display(), destination.display());
                FileOutcome::Moved {
                    name: display_name,
                    category,
                    final_name: file_name_of(&destination),
                }
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", source.display(), e);
                FileOutcome::Skipped {
                    name: display_name,
                    reason: SkipReason::from_move_error(&e),
                }
            }
        }
    }

    fn plan_file(
        &self,
        directory: &Path,
        name: &OsStr,
        planned: &mut HashSet<PathBuf>,
    ) -> FileOutcome {
        let display_name = name.to_string_lossy().into_owned();
        let category = self.rules.categorize_name(&display_name);
        let category_dir = directory.join(category.dir_name());

        if is_blocked(&category_dir) {
            return FileOutcome::Skipped {
                name: display_name,
                reason: SkipReason::DirectoryCreationFailed(format!(
                    "{} exists and is not a directory",
                    category_dir.display()
                )),
            };
        }

        let destination =
            resolve_destination(&category_dir, name, |p| planned.contains(p) || occupied(p));
        let final_name = file_name_of(&destination);
        planned.insert(destination);

        FileOutcome::Moved {
            name: display_name,
            category,
            final_name,
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn moved(name: &str, category: Category, final_name: &str) -> FileOutcome {
        FileOutcome::Moved {
            name: name.to_string(),
            category,
            final_name: final_name.to_string(),
        }
    }

    #[test]
    fn test_collision_candidate_splits_at_last_dot() {
        assert_eq!(collision_candidate("report.pdf", 1), "report_1.pdf");
        assert_eq!(collision_candidate("report.pdf", 12), "report_12.pdf");
        assert_eq!(collision_candidate("a.b.c", 1), "a.b_1.c");
        assert_eq!(collision_candidate("README", 2), "README_2");
        assert_eq!(collision_candidate(".gitignore", 1), ".gitignore_1");
    }

    #[test]
    fn test_resolve_destination_probes_in_order() {
        let dir = Path::new("/base/documents");
        let taken: HashSet<PathBuf> = ["report.pdf", "report_1.pdf", "report_3.pdf"]
            .iter()
            .map(|n| dir.join(n))
            .collect();

        let result = resolve_destination(dir, OsStr::new("report.pdf"), |p| taken.contains(p));
        assert_eq!(result, dir.join("report_2.pdf"));
    }

    #[test]
    fn test_resolve_destination_keeps_free_name() {
        let dir = Path::new("/base/images");
        let result = resolve_destination(dir, OsStr::new("cat.png"), |_| false);
        assert_eq!(result, dir.join("cat.png"));
    }

    #[test]
    fn test_move_file_creates_destination_and_removes_source() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("a.txt");
        let destination = temp_dir.path().join("b.txt");
        fs::write(&source, "content").expect("Failed to write test file");

        move_file(&source, &destination).expect("Failed to move file");

        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&destination).unwrap(), "content");
    }

    #[test]
    fn test_copy_then_remove_preserves_content_and_mtime() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("clip.mp4");
        let destination = temp_dir.path().join("copy.mp4");
        fs::write(&source, b"frames").expect("Failed to write test file");

        let original_mtime = fs::metadata(&source).unwrap().modified().unwrap();
        copy_then_remove(&source, &destination).expect("Failed to copy file");

        assert!(!source.exists());
        assert_eq!(fs::read(&destination).unwrap(), b"frames");
        assert_eq!(
            fs::metadata(&destination).unwrap().modified().unwrap(),
            original_mtime
        );
    }

    #[test]
    fn test_organize_missing_directory_reports_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("nope");

        let result = Organizer::default().organize(&missing);

        assert!(matches!(result, Err(OrganizeError::DirectoryNotFound { .. })));
        assert!(!missing.exists());
    }

    #[test]
    fn test_organize_file_path_reports_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let result = Organizer::default().organize(&file);

        assert!(matches!(result, Err(OrganizeError::DirectoryNotFound { .. })));
        assert!(file.is_file());
    }

    #[test]
    fn test_organize_moves_into_categories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("photo.png"), "png").unwrap();
        fs::write(base.join("notes"), "text").unwrap();

        let report = Organizer::default().organize(base).expect("organize failed");

        assert_eq!(report.moved_count(), 2);
        assert!(base.join("images/photo.png").is_file());
        assert!(base.join("others/notes").is_file());
        assert!(!base.join("photo.png").exists());
    }

    #[test]
    fn test_organize_never_overwrites() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("documents")).unwrap();
        fs::write(base.join("documents/report.pdf"), "original").unwrap();
        fs::write(base.join("report.pdf"), "newer").unwrap();

        let report = Organizer::default().organize(base).expect("organize failed");

        assert_eq!(
            report.outcomes,
            vec![moved("report.pdf", Category::Documents, "report_1.pdf")]
        );
        assert_eq!(
            fs::read_to_string(base.join("documents/report.pdf")).unwrap(),
            "original"
        );
        assert_eq!(
            fs::read_to_string(base.join("documents/report_1.pdf")).unwrap(),
            "newer"
        );
    }

    #[test]
    fn test_organize_leaves_subdirectories_alone() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("projects")).unwrap();
        fs::write(base.join("projects/inner.png"), "png").unwrap();

        let report = Organizer::default().organize(base).expect("organize failed");

        assert!(report.outcomes.is_empty());
        assert!(base.join("projects/inner.png").is_file());
        assert!(!base.join("images").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_organize_ignores_symlinks() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("real.txt"), "data").unwrap();
        std::os::unix::fs::symlink(base.join("real.txt"), base.join("link.txt")).unwrap();

        let report = Organizer::default().organize(base).expect("organize failed");

        assert_eq!(
            report.outcomes,
            vec![moved("real.txt", Category::Documents, "real.txt")]
        );
        assert!(fs::symlink_metadata(base.join("link.txt")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_organize_skips_when_category_folder_is_blocked() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        // A dangling link named like the bucket blocks its creation.
        std::os::unix::fs::symlink(base.join("missing"), base.join("videos")).unwrap();
        fs::write(base.join("clip.mp4"), "frames").unwrap();
        fs::write(base.join("photo.png"), "png").unwrap();

        let report = Organizer::default().organize(base).expect("organize failed");

        let skipped: Vec<_> = report.skipped().map(|(name, _)| name.to_string()).collect();
        assert_eq!(skipped, vec!["clip.mp4".to_string()]);
        assert!(base.join("clip.mp4").is_file());
        assert!(base.join("images/photo.png").is_file());
    }

    #[test]
    fn test_organize_skips_missing_file_and_continues() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("real.png"), "png").unwrap();

        // ghost.txt vanished between scan and move.
        let files = vec![OsString::from("ghost.txt"), OsString::from("real.png")];
        let report = Organizer::default().process(base, &files, false, |_| {});

        assert!(matches!(
            &report.outcomes[0],
            FileOutcome::Skipped { name, reason: SkipReason::MoveFailed(_) } if name == "ghost.txt"
        ));
        assert_eq!(report.outcomes[1], moved("real.png", Category::Images, "real.png"));
        assert!(base.join("images/real.png").is_file());
        assert!(!base.join("documents/ghost.txt").exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_copy_then_remove_cleans_up_failed_copy() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let destination = temp_dir.path().join("mem.bin");

        // Reading from offset 0 of /proc/self/mem fails with EIO.
        let result = copy_then_remove(Path::new("/proc/self/mem"), &destination);

        assert!(result.is_err());
        assert!(!destination.exists());
    }

    #[test]
    fn test_plan_matches_organize_when_others_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("others"), "not a folder").unwrap();
        fs::write(base.join("notes"), "text").unwrap();
        fs::write(base.join("photo.png"), "png").unwrap();

        let organizer = Organizer::default();
        let files = organizer.scan(base).expect("scan failed");
        let plan = organizer.process(base, &files, true, |_| {});
        let real = organizer.process(base, &files, false, |_| {});

        let summarize = |report: &OrganizeReport| {
            let mut outcomes: Vec<(String, bool)> = report
                .outcomes
                .iter()
                .map(|o| (o.name().to_string(), matches!(o, FileOutcome::Moved { .. })))
                .collect();
            outcomes.sort();
            outcomes
        };
        assert_eq!(summarize(&plan), summarize(&real));
        assert!(plan.outcomes.iter().any(|o| matches!(
            o,
            FileOutcome::Skipped { name, reason: SkipReason::DirectoryCreationFailed(_) }
                if name == "notes"
        )));
        assert!(base.join("others").is_file());
        assert!(base.join("notes").is_file());
        assert!(base.join("images/photo.png").is_file());
    }

    #[test]
    fn test_plan_reserves_names_within_run() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("documents")).unwrap();
        fs::write(base.join("documents/report.pdf"), "old").unwrap();
        fs::write(base.join("report.pdf"), "new").unwrap();

        let organizer = Organizer::default();
        let files = vec![OsString::from("report.pdf"), OsString::from("report.pdf")];
        let report = organizer.process(base, &files, true, |_| {});

        assert_eq!(
            report.outcomes,
            vec![
                moved("report.pdf", Category::Documents, "report_1.pdf"),
                moved("report.pdf", Category::Documents, "report_2.pdf"),
            ]
        );
        assert!(base.join("report.pdf").is_file());
        assert!(!base.join("documents/report_1.pdf").exists());
    }

    #[test]
    fn test_plan_creates_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("song.mp3"), "audio").unwrap();

        let report = Organizer::default().plan(base).expect("plan failed");

        assert!(report.dry_run);
        assert_eq!(report.moved_count(), 1);
        assert!(!base.join("audio").exists());
        assert!(base.join("song.mp3").is_file());
    }

    #[test]
    fn test_category_counts() {
        let report = OrganizeReport {
            directory: PathBuf::from("/base"),
            dry_run: false,
            outcomes: vec![
                moved("a.png", Category::Images, "a.png"),
                moved("b.png", Category::Images, "b.png"),
                moved("c", Category::Others, "c"),
                FileOutcome::Skipped {
                    name: "d.pdf".to_string(),
                    reason: SkipReason::InUse("busy".to_string()),
                },
            ],
        };

        let counts = report.category_counts();
        assert_eq!(counts.get(&Category::Images), Some(&2));
        assert_eq!(counts.get(&Category::Others), Some(&1));
        assert_eq!(counts.get(&Category::Documents), None);
        assert_eq!(report.skipped().count(), 1);
    }

    #[test]
    fn test_skip_reason_from_permission_error() {
        let error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(
            SkipReason::from_move_error(&error),
            SkipReason::PermissionDenied(_)
        ));
        let error = io::Error::other("boom");
        assert!(matches!(
            SkipReason::from_move_error(&error),
            SkipReason::MoveFailed(_)
        ));
    }
}
