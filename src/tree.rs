//! Recursive traversal of a base directory that stays out of one excluded subtree.

use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// What a walked entry counts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
}

/// Walks everything below `base` in file-name order without entering `excluded`.
///
/// The excluded directory itself is still yielded, so it counts as a folder
/// of its parent, but nothing inside it is visited. The match is on whole
/// path components, so a sibling such as `old_backups` is walked normally.
/// Symlinks are not followed; a link to a directory is reported as a
/// directory without being descended into.
pub fn walk(base: &Path, excluded: &Path) -> impl Iterator<Item = Result<DirEntry>> {
    let excluded: PathBuf = excluded.to_path_buf();
    let mut entries = WalkDir::new(base)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    std::iter::from_fn(move || {
        let entry = entries.next()?;
        if let Ok(entry) = &entry {
            if entry.file_type().is_dir() && entry.path() == excluded.as_path() {
                entries.skip_current_dir();
            }
        }
        Some(entry.map_err(Into::into))
    })
}

/// Classifies an entry, resolving symlinks for the check only.
pub fn entry_kind(entry: &DirEntry) -> EntryKind {
    let file_type = entry.file_type();
    if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
        EntryKind::Dir
    } else {
        EntryKind::File
    }
}
