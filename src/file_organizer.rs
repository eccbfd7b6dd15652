//! File organization: moving files into category directories.
//!
//! This module moves single files into category subdirectories of a base
//! directory without ever replacing an existing file, and collects the
//! outcome of an organize run.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Represents a single file organization operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// The original path of the file before organization.
    pub original_path: PathBuf,
    /// The new path of the file after organization.
    pub new_path: PathBuf,
    /// The category the file was moved to.
    pub category: String,
}

/// A file that could not be moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveFailure {
    pub file_name: String,
    pub reason: String,
}

/// Outcome of organizing a base directory.
#[derive(Debug, Clone, Default)]
pub struct OrganizeReport {
    /// Moves that succeeded, in processing order.
    pub operations: Vec<Operation>,
    /// Files left in place, in processing order.
    pub failures: Vec<MoveFailure>,
}

impl OrganizeReport {
    /// Number of files successfully moved.
    pub fn moved(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if every file was moved.
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of files moved into each category.
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for operation in &self.operations {
            *counts.entry(operation.category.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Moves files into category subdirectories.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Creates a directory unless it already exists.
    pub fn ensure_dir(path: &Path) -> Result<()> {
        match fs::create_dir(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            Err(e) => Err(Error::DirectoryCreationFailed {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Moves a file into its category directory within the base path and records the operation.
    ///
    /// The category directory is created if missing. A file already present at
    /// the destination is never replaced: the move fails with
    /// [`Error::DestinationExists`] and the source stays where it was.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirkeep::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let result = FileOrganizer::move_to_category_with_record(
    ///     Path::new("/path/to/base"),
    ///     Path::new("/path/to/base/image.png"),
    ///     "imagens"
    /// );
    ///
    /// match result {
    ///     Ok(op) => println!("Moved {} to {}", op.original_path.display(), op.new_path.display()),
    ///     Err(e) => eprintln!("Organization failed: {}", e),
    /// }
    /// ```
    pub fn move_to_category_with_record(
        base_path: &Path,
        file_path: &Path,
        category_dir_name: &str,
    ) -> Result<Operation> {
        if !base_path.exists() {
            return Err(Error::InvalidBasePath {
                path: base_path.to_path_buf(),
                source: std::io::Error::new(ErrorKind::NotFound, "base path does not exist"),
            });
        }

        let category_path = base_path.join(category_dir_name);
        Self::ensure_dir(&category_path)?;

        let file_name = file_path.file_name().ok_or_else(|| Error::FileMoveFailure {
            source: file_path.to_path_buf(),
            destination: category_path.clone(),
            source_error: std::io::Error::new(
                ErrorKind::InvalidInput,
                "file has no name component",
            ),
        })?;

        let destination_path = category_path.join(file_name);

        // symlink_metadata also catches dangling links at the destination
        if fs::symlink_metadata(&destination_path).is_ok() {
            return Err(Error::DestinationExists {
                path: destination_path,
            });
        }

        Self::rename_or_copy(file_path, &destination_path).map_err(|e| Error::FileMoveFailure {
            source: file_path.to_path_buf(),
            destination: destination_path.clone(),
            source_error: e,
        })?;

        Ok(Operation {
            original_path: file_path.to_path_buf(),
            new_path: destination_path,
            category: category_dir_name.to_string(),
        })
    }

    /// Renames, falling back to copy and delete when the rename crosses devices.
    fn rename_or_copy(from: &Path, to: &Path) -> std::io::Result<()> {
        match fs::rename(from, to) {
            Err(e) if e.kind() == ErrorKind::CrossesDevices => {
                fs::copy(from, to)?;
                fs::remove_file(from)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_move_to_category_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let file_path = base_path.join("test.txt");
        fs::write(&file_path, "test content").expect("Failed to write test file");

        let operation =
            FileOrganizer::move_to_category_with_record(base_path, &file_path, "documentos")
                .expect("Failed to move file");

        let category_dir = base_path.join("documentos");
        assert!(category_dir.is_dir());
        assert!(!file_path.exists());
        assert_eq!(operation.new_path, category_dir.join("test.txt"));
        assert_eq!(operation.category, "documentos");
        assert_eq!(
            fs::read_to_string(&operation.new_path).unwrap(),
            "test content"
        );
    }

    #[test]
    fn test_move_to_category_uses_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let category_dir = base_path.join("imagens");
        fs::create_dir(&category_dir).expect("Failed to create category directory");

        let file_path = base_path.join("test.png");
        fs::write(&file_path, "test content").expect("Failed to write test file");

        FileOrganizer::move_to_category_with_record(base_path, &file_path, "imagens")
            .expect("Failed to move file");

        assert!(!file_path.exists());
        assert!(category_dir.join("test.png").exists());
    }

    #[test]
    fn test_move_refuses_to_overwrite() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::create_dir(base_path.join("documentos")).unwrap();
        fs::write(base_path.join("documentos/a.txt"), "old").unwrap();
        let file_path = base_path.join("a.txt");
        fs::write(&file_path, "new").unwrap();

        let result = FileOrganizer::move_to_category_with_record(base_path, &file_path, "documentos");

        assert!(matches!(result, Err(Error::DestinationExists { .. })));
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new");
        assert_eq!(
            fs::read_to_string(base_path.join("documentos/a.txt")).unwrap(),
            "old"
        );
    }

    #[test]
    fn test_move_to_category_invalid_base_path() {
        let non_existent = Path::new("/non/existent/path");
        let file_path = Path::new("/some/file.txt");

        let result =
            FileOrganizer::move_to_category_with_record(non_existent, file_path, "documentos");
        assert!(matches!(result, Err(Error::InvalidBasePath { .. })));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().join("outros");

        FileOrganizer::ensure_dir(&dir).unwrap();
        FileOrganizer::ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_dir_fails_when_file_in_the_way() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("outros");
        fs::write(&path, "not a dir").unwrap();

        let result = FileOrganizer::ensure_dir(&path);
        assert!(matches!(result, Err(Error::DirectoryCreationFailed { .. })));
    }

    #[test]
    fn test_report_counts_by_category() {
        let report = OrganizeReport {
            operations: vec![
                Operation {
                    original_path: PathBuf::from("/b/a.txt"),
                    new_path: PathBuf::from("/b/documentos/a.txt"),
                    category: "documentos".to_string(),
                },
                Operation {
                    original_path: PathBuf::from("/b/b.txt"),
                    new_path: PathBuf::from("/b/documentos/b.txt"),
                    category: "documentos".to_string(),
                },
                Operation {
                    original_path: PathBuf::from("/b/c.png"),
                    new_path: PathBuf::from("/b/imagens/c.png"),
                    category: "imagens".to_string(),
                },
            ],
            failures: vec![],
        };

        assert_eq!(report.moved(), 3);
        assert!(report.is_complete_success());
        let counts = report.category_counts();
        assert_eq!(counts.get("documentos"), Some(&2));
        assert_eq!(counts.get("imagens"), Some(&1));
    }
}
