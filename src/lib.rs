//! dirkeep - directory housekeeping
//!
//! This library sorts the files at the root of a directory into
//! extension-based category folders, archives a directory tree into a zip
//! backup, and writes a plain-text report of file and folder counts.

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod file_category;
pub mod file_organizer;
pub mod logger;
pub mod manager;
pub mod output;
pub mod report;
pub mod tree;

pub use config::{CategoryConfig, ConfigError};
pub use error::{Error, Result};
pub use file_category::{Category, CategoryTable};
pub use file_organizer::{FileOrganizer, OrganizeReport};
pub use logger::{Logger, MemoryLogger, TracingLogger};
pub use manager::DirectoryManager;
pub use report::DirectoryReport;

pub use cli::{Cli, Command, run_cli};
