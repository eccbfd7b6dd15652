//! The directory manager: organize, back up and report on one base directory.

use crate::backup;
use crate::error::{Error, Result};
use crate::file_category::CategoryTable;
use crate::file_organizer::{FileOrganizer, MoveFailure, OrganizeReport};
use crate::logger::{Logger, TracingLogger};
use crate::report::DirectoryReport;
use chrono::Local;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Reserved subdirectory holding backup archives.
pub const BACKUP_DIR_NAME: &str = "_backups";

/// Performs housekeeping operations on a single base directory.
///
/// The base directory is resolved to an absolute path once, and the backup
/// subdirectory is created eagerly. Each operation reads the live filesystem
/// state; nothing is cached between calls.
///
/// # Examples
///
/// ```no_run
/// use dirkeep::DirectoryManager;
/// use std::path::Path;
///
/// let manager = DirectoryManager::new(Some(Path::new("/home/user/Downloads")))?;
/// let report = manager.organize_by_extension()?;
/// println!("{} files moved", report.moved());
///
/// if let Some(archive) = manager.create_backup(Some("downloads")) {
///     println!("Backup written to {}", archive.display());
/// }
/// # Ok::<(), dirkeep::Error>(())
/// ```
pub struct DirectoryManager {
    base_dir: PathBuf,
    backup_dir: PathBuf,
    categories: CategoryTable,
    logger: Box<dyn Logger>,
}

impl DirectoryManager {
    /// Creates a manager with the built-in categories, logging through `tracing`.
    ///
    /// `None` selects the current working directory.
    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        Self::with_parts(base_dir, CategoryTable::default(), Box::new(TracingLogger))
    }

    /// Creates a manager with an explicit category table and logger.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBasePath`] if the path cannot be resolved, and
    /// [`Error::DirectoryCreationFailed`] if the backup directory cannot be created
    /// (which includes a base directory that does not exist).
    pub fn with_parts(
        base_dir: Option<&Path>,
        categories: CategoryTable,
        logger: Box<dyn Logger>,
    ) -> Result<Self> {
        let requested = match base_dir {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().map_err(|e| Error::InvalidBasePath {
                path: PathBuf::from("."),
                source: e,
            })?,
        };
        let base_dir = std::path::absolute(&requested)
            .map(|path| normalize_lexically(&path))
            .map_err(|e| Error::InvalidBasePath {
                path: requested.clone(),
                source: e,
            })?;
        let backup_dir = base_dir.join(BACKUP_DIR_NAME);
        FileOrganizer::ensure_dir(&backup_dir)?;

        Ok(Self {
            base_dir,
            backup_dir,
            categories,
            logger,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// Moves every file at the root of the base directory into its category directory.
    ///
    /// Subdirectories are left untouched and not descended into. A file whose
    /// move fails (including when the destination name is taken) is logged,
    /// recorded in the report and left in place.
    ///
    /// # Errors
    ///
    /// Fails if a category directory cannot be created or the base directory
    /// cannot be listed.
    pub fn organize_by_extension(&self) -> Result<OrganizeReport> {
        for dir_name in self.categories.dir_names() {
            FileOrganizer::ensure_dir(&self.base_dir.join(dir_name))?;
        }

        let list_error = |source| Error::InvalidBasePath {
            path: self.base_dir.clone(),
            source,
        };
        let mut entries = fs::read_dir(&self.base_dir)
            .map_err(list_error)?
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(list_error)?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut report = OrganizeReport::default();
        for entry in entries {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().to_string();
            let category = self.categories.categorize(&file_name);

            match FileOrganizer::move_to_category_with_record(&self.base_dir, &path, category) {
                Ok(operation) => report.operations.push(operation),
                Err(e) => {
                    self.logger
                        .error(&format!("Failed to move {}: {}", file_name, e));
                    report.failures.push(MoveFailure {
                        file_name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.logger.info(&format!(
            "Organization complete: {} files moved",
            report.moved()
        ));
        Ok(report)
    }

    /// Archives the base directory into the backup directory.
    ///
    /// Returns the archive path, or `None` after logging the reason if anything
    /// went wrong. No partial archive is left behind on failure.
    pub fn create_backup(&self, name: Option<&str>) -> Option<PathBuf> {
        match self.try_create_backup(name) {
            Ok(path) => {
                self.logger
                    .info(&format!("Backup created: {}", path.display()));
                Some(path)
            }
            Err(e) => {
                self.logger.error(&format!("Backup failed: {}", e));
                None
            }
        }
    }

    /// Like [`create_backup`](Self::create_backup), but returns the error and logs nothing.
    pub fn try_create_backup(&self, name: Option<&str>) -> Result<PathBuf> {
        let file_name = backup::archive_file_name(name, &Local::now())?;
        let destination = self.backup_dir.join(file_name);
        backup::write_archive(&self.base_dir, &self.backup_dir, &destination)?;
        Ok(destination)
    }

    /// Computes the directory statistics without writing anything.
    pub fn scan_report(&self) -> Result<DirectoryReport> {
        DirectoryReport::scan(&self.base_dir, &self.backup_dir, Local::now())
    }

    /// Writes `relatorio_<timestamp>.txt` at the root of the base directory.
    ///
    /// # Errors
    ///
    /// Traversal and write failures propagate.
    pub fn generate_report(&self) -> Result<PathBuf> {
        self.generate_report_with_summary().map(|(path, _)| path)
    }

    /// Writes the report and also returns the statistics it was rendered from.
    pub fn generate_report_with_summary(&self) -> Result<(PathBuf, DirectoryReport)> {
        let report = self.scan_report()?;
        let path = report.write_to(&self.base_dir)?;
        self.logger
            .info(&format!("Report generated: {}", path.display()));
        Ok((path, report))
    }
}

/// Drops `.` and folds `..` into its parent without touching the filesystem.
///
/// `..` at the root stays at the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                ) {
                    normalized.pop();
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
