//! Error types shared by the organize, backup and report operations.

use std::path::PathBuf;

/// Errors that can occur while operating on a base directory.
#[derive(Debug)]
pub enum Error {
    /// The base directory is missing or cannot be listed.
    InvalidBasePath {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a category or backup directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its category directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// A file with the same name already sits in the destination directory.
    DestinationExists { path: PathBuf },
    /// The requested backup name cannot be used as a file name.
    InvalidBackupName { name: String },
    /// Recursive traversal of the base directory failed.
    Walk(walkdir::Error),
    /// Writing the zip archive failed.
    Archive(zip::result::ZipError),
    /// Generic I/O failure tied to a path.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write the text report.
    ReportWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBasePath { path, source } => {
                write!(f, "Invalid base path {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::DestinationExists { path } => {
                write!(f, "Destination already exists: {}", path.display())
            }
            Self::InvalidBackupName { name } => {
                write!(f, "Invalid backup name '{}'", name)
            }
            Self::Walk(e) => write!(f, "Directory traversal failed: {}", e),
            Self::Archive(e) => write!(f, "Archive error: {}", e),
            Self::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
            Self::ReportWriteFailed { path, source } => {
                write!(f, "Failed to write report {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBasePath { source, .. }
            | Self::DirectoryCreationFailed { source, .. }
            | Self::Io { source, .. }
            | Self::ReportWriteFailed { source, .. } => Some(source),
            Self::FileMoveFailure { source_error, .. } => Some(source_error),
            Self::Walk(e) => Some(e),
            Self::Archive(e) => Some(e),
            Self::DestinationExists { .. } | Self::InvalidBackupName { .. } => None,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(e: walkdir::Error) -> Self {
        Self::Walk(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Self::Archive(e)
    }
}

/// Result type for directory operations.
pub type Result<T> = std::result::Result<T, Error>;
