//! Zip backups of a directory tree.
//!
//! Archives are written to a temporary file next to their final location
//! and renamed into place once the zip central directory has been flushed,
//! so an interrupted backup never leaves a truncated archive behind.

use crate::error::{Error, Result};
use crate::tree::{self, EntryKind};
use chrono::{DateTime, Datelike, Local, Timelike};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Component, Path};
use tempfile::NamedTempFile;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Name used when the caller does not supply one.
pub const DEFAULT_BACKUP_NAME: &str = "backup";

/// Timestamp layout shared by archive and report file names.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Builds `<name>_<YYYYMMDD_HHMM>.zip`.
///
/// An empty name falls back to [`DEFAULT_BACKUP_NAME`].
///
/// # Errors
///
/// Returns [`Error::InvalidBackupName`] if the name would escape the backup
/// directory.
///
/// ```
/// use chrono::{Local, TimeZone};
/// use dirkeep::backup::archive_file_name;
///
/// let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 59).unwrap();
/// assert_eq!(archive_file_name(None, &at).unwrap(), "backup_20240309_1405.zip");
/// assert_eq!(archive_file_name(Some("fotos"), &at).unwrap(), "fotos_20240309_1405.zip");
/// ```
pub fn archive_file_name(name: Option<&str>, at: &DateTime<Local>) -> Result<String> {
    let name = name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_BACKUP_NAME);

    let mut components = Path::new(name).components();
    let plain = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
        && !name.contains(['/', '\\']);
    if !plain {
        return Err(Error::InvalidBackupName {
            name: name.to_string(),
        });
    }

    Ok(format!("{}_{}.zip", name, at.format(FILE_TIMESTAMP_FORMAT)))
}

/// Zip entry name for a base-relative path, always `/`-separated.
pub fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Archives every file under `base` except the `excluded` subtree into `destination`.
///
/// Returns the number of entries written. The destination's parent directory
/// must exist; the temporary archive lives there until it is persisted.
pub fn write_archive(base: &Path, excluded: &Path, destination: &Path) -> Result<usize> {
    let parent = destination.parent().unwrap_or(base);
    let temp = NamedTempFile::new_in(parent).map_err(|e| Error::Io {
        path: parent.to_path_buf(),
        source: e,
    })?;

    let mut zip = ZipWriter::new(temp.as_file());
    let mut entries = 0;

    for entry in tree::walk(base, excluded) {
        let entry = entry?;
        if tree::entry_kind(&entry) == EntryKind::Dir {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(base).unwrap_or(path);
        add_file(&mut zip, path, &entry_name(relative))?;
        entries += 1;
    }

    zip.finish()?;

    let io_error = |source: io::Error| Error::Io {
        path: destination.to_path_buf(),
        source,
    };
    temp.as_file().sync_all().map_err(io_error)?;
    temp.persist(destination).map_err(|e| io_error(e.error))?;

    Ok(entries)
}

fn add_file<W: io::Write + io::Seek>(zip: &mut ZipWriter<W>, path: &Path, name: &str) -> Result<()> {
    let io_error = |source: io::Error| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let metadata = file.metadata().map_err(io_error)?;

    let mut options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(metadata.len() >= u64::from(u32::MAX));
    if let Some(modified) = metadata.modified().ok().and_then(zip_timestamp) {
        options = options.last_modified_time(modified);
    }

    zip.start_file(name, options)?;
    io::copy(&mut BufReader::new(file), zip).map_err(io_error)?;
    Ok(())
}

/// Zip timestamps only cover 1980..=2107; anything else keeps the default.
fn zip_timestamp(modified: std::time::SystemTime) -> Option<zip::DateTime> {
    let local: DateTime<Local> = modified.into();
    zip::DateTime::from_date_and_time(
        u16::try_from(local.year()).ok()?,
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second().min(59) as u8,
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn archive_entries(path: &Path) -> Vec<String> {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut names: Vec<_> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_archive_file_name_rejects_paths() {
        let at = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        for name in ["../escape", "a/b", "..", ".", "a\\b"] {
            assert!(
                matches!(
                    archive_file_name(Some(name), &at),
                    Err(Error::InvalidBackupName { .. })
                ),
                "{} should be rejected",
                name
            );
        }
        assert_eq!(
            archive_file_name(Some(""), &at).unwrap(),
            "backup_20240102_0304.zip"
        );
    }

    #[test]
    fn test_entry_name_uses_forward_slashes() {
        assert_eq!(entry_name(Path::new("a/b/c.txt")), "a/b/c.txt");
        assert_eq!(entry_name(Path::new("c.txt")), "c.txt");
    }

    #[test]
    fn test_write_archive_preserves_structure_and_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let backups = base.join("_backups");
        fs::create_dir(&backups).unwrap();
        fs::create_dir_all(base.join("docs/deep")).unwrap();
        fs::write(base.join("notes.txt"), "notes").unwrap();
        fs::write(base.join("docs/deep/plan.md"), "plan").unwrap();
        fs::write(backups.join("old.zip"), "old").unwrap();

        let destination = backups.join("backup_test.zip");
        let entries = write_archive(base, &backups, &destination).unwrap();

        assert_eq!(entries, 2);
        assert_eq!(
            archive_entries(&destination),
            vec!["docs/deep/plan.md", "notes.txt"]
        );

        let mut archive = ZipArchive::new(File::open(&destination).unwrap()).unwrap();
        let mut content = String::new();
        archive
            .by_name("docs/deep/plan.md")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "plan");
    }

    #[test]
    fn test_failed_archive_leaves_nothing_behind() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let backups = temp_dir.path().join("_backups");
        fs::create_dir(&backups).unwrap();

        let missing_base = temp_dir.path().join("missing");
        let destination = backups.join("backup_fail.zip");
        let result = write_archive(&missing_base, &missing_base.join("_backups"), &destination);

        assert!(matches!(result, Err(Error::Walk(_))));
        assert_eq!(fs::read_dir(&backups).unwrap().count(), 0);
    }
}
