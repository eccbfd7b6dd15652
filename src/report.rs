//! Directory summary reports.

use crate::backup::FILE_TIMESTAMP_FORMAT;
use crate::error::{Error, Result};
use crate::file_category::extension_of;
use crate::tree::{self, EntryKind};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Key used for files without an extension.
pub const NO_EXTENSION: &str = "(sem extensão)";

/// File and folder statistics for a directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryReport {
    pub base_dir: PathBuf,
    pub generated_at: DateTime<Local>,
    pub total_files: usize,
    pub total_dirs: usize,
    /// Occurrences per lowercase extension, in ascending order.
    pub extensions: BTreeMap<String, usize>,
}

impl DirectoryReport {
    /// Walks `base_dir` and tallies its contents.
    ///
    /// The `excluded` directory counts as a folder, but its contents are not visited.
    ///
    /// # Errors
    ///
    /// Any traversal error is returned as is.
    pub fn scan(base_dir: &Path, excluded: &Path, generated_at: DateTime<Local>) -> Result<Self> {
        let mut report = Self {
            base_dir: base_dir.to_path_buf(),
            generated_at,
            total_files: 0,
            total_dirs: 0,
            extensions: BTreeMap::new(),
        };

        for entry in tree::walk(base_dir, excluded) {
            let entry = entry?;
            match tree::entry_kind(&entry) {
                EntryKind::Dir => report.total_dirs += 1,
                EntryKind::File => {
                    report.total_files += 1;
                    let ext = extension_of(&entry.file_name().to_string_lossy());
                    let key = if ext.is_empty() {
                        NO_EXTENSION.to_string()
                    } else {
                        ext
                    };
                    *report.extensions.entry(key).or_insert(0) += 1;
                }
            }
        }

        Ok(report)
    }

    /// `relatorio_<YYYYMMDD_HHMM>.txt` for the generation time.
    pub fn file_name(&self) -> String {
        format!(
            "relatorio_{}.txt",
            self.generated_at.format(FILE_TIMESTAMP_FORMAT)
        )
    }

    /// Renders the fixed text layout.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "RELATÓRIO DE DIRETÓRIO: {}\n",
            self.base_dir.display()
        ));
        out.push_str(&format!(
            "Data: {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M")
        ));
        out.push_str(&format!("Total de arquivos: {}\n", self.total_files));
        out.push_str(&format!("Total de pastas: {}\n\n", self.total_dirs));
        out.push_str("DISTRIBUIÇÃO POR EXTENSÃO:\n");
        for (ext, count) in &self.extensions {
            out.push_str(&format!("{}: {} arquivo(s)\n", ext, count));
        }
        out
    }

    /// Writes the rendered report into `dir` and returns its path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        let write_error = |source| Error::ReportWriteFailed {
            path: path.clone(),
            source,
        };

        let mut writer = BufWriter::new(File::create(&path).map_err(write_error)?);
        writer
            .write_all(self.render().as_bytes())
            .map_err(write_error)?;
        writer.flush().map_err(write_error)?;

        Ok(path)
    }
}
