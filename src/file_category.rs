//! File categorization by extension.
//!
//! A [`CategoryTable`] is an ordered list of named extension sets plus a
//! fallback category that receives everything unmatched. Lookups walk the
//! list in insertion order, so the first category listing an extension wins.
//!
//! # Examples
//!
//! ```
//! use dirkeep::file_category::CategoryTable;
//!
//! let table = CategoryTable::default();
//! assert_eq!(table.categorize("report.PDF"), "documentos");
//! assert_eq!(table.categorize("photo.jpeg"), "imagens");
//! assert_eq!(table.categorize("Makefile"), "outros");
//! ```
use crate::config::ConfigError;
use crate::manager::BACKUP_DIR_NAME;
use std::collections::{BTreeSet, HashSet};
use std::path::{Component, Path};

/// Name of the built-in fallback category.
pub const DEFAULT_FALLBACK: &str = "outros";

/// A named bucket of lowercase extensions (dot included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    extensions: BTreeSet<String>,
}

impl Category {
    /// Creates a category, normalizing every extension.
    ///
    /// # Errors
    ///
    /// Returns an error if an extension is empty after trimming.
    pub fn new<I, S>(name: impl Into<String>, extensions: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let extensions = extensions
            .into_iter()
            .map(|ext| {
                normalize_extension(ext.as_ref()).ok_or_else(|| ConfigError::EmptyExtension {
                    category: name.clone(),
                })
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Self { name, extensions })
    }

    /// Returns the category (and destination directory) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized extensions of this category.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Checks whether a lowercase extension belongs to this category.
    pub fn contains(&self, ext: &str) -> bool {
        self.extensions.contains(ext)
    }
}

/// Ordered category table with a fallback bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    categories: Vec<Category>,
    fallback: String,
}

impl CategoryTable {
    /// Builds a table from ordered categories and a fallback name.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is empty, is not a plain directory name,
    /// collides with the backup directory, or appears twice.
    pub fn new(categories: Vec<Category>, fallback: impl Into<String>) -> Result<Self, ConfigError> {
        let fallback = fallback.into();
        {
            let mut seen = HashSet::new();
            for name in categories.iter().map(Category::name).chain([fallback.as_str()]) {
                validate_dir_name(name)?;
                if !seen.insert(name) {
                    return Err(ConfigError::DuplicateCategory(name.to_string()));
                }
            }
        }

        Ok(Self {
            categories,
            fallback,
        })
    }

    /// Returns the categories in lookup order, without the fallback.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Returns the fallback category name.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Returns every destination directory name, fallback last.
    pub fn dir_names(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .map(Category::name)
            .chain([self.fallback.as_str()])
    }

    /// Maps an extension (any case, dot included) to a category name.
    pub fn category_for_extension(&self, ext: &str) -> &str {
        let ext = ext.to_lowercase();
        self.categories
            .iter()
            .find(|category| category.contains(&ext))
            .map(Category::name)
            .unwrap_or(self.fallback.as_str())
    }

    /// Maps a file name to a category name using its extension.
    pub fn categorize(&self, file_name: &str) -> &str {
        self.category_for_extension(&extension_of(file_name))
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

/// Returns the built-in categories in lookup order.
pub fn default_categories() -> Vec<Category> {
    let table: [(&str, &[&str]); 5] = [
        ("documentos", &[".pdf", ".doc", ".docx", ".txt"]),
        ("imagens", &[".jpg", ".jpeg", ".png", ".gif"]),
        ("audio_video", &[".mp3", ".mp4", ".wav", ".avi"]),
        ("planilhas", &[".xls", ".xlsx", ".csv"]),
        ("codigo", &[".py", ".js", ".html", ".css"]),
    ];

    table
        .into_iter()
        .map(|(name, extensions)| Category {
            name: name.to_string(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        })
        .collect()
}

/// Returns the lowercase extension of a file name, dot included.
///
/// Leading dots do not start an extension, so `.bashrc` has none.
/// Names without a dot yield an empty string.
///
/// ```
/// use dirkeep::file_category::extension_of;
///
/// assert_eq!(extension_of("b.JPG"), ".jpg");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of(".bashrc"), "");
/// assert_eq!(extension_of("README"), "");
/// ```
pub fn extension_of(file_name: &str) -> String {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[stem_start..].rfind('.') {
        Some(idx) => file_name[stem_start + idx..].to_lowercase(),
        None => String::new(),
    }
}

/// Lowercases an extension and adds the leading dot when missing.
fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim();
    if ext.is_empty() {
        return None;
    }
    let ext = ext.to_lowercase();
    if ext.starts_with('.') {
        Some(ext)
    } else {
        Some(format!(".{}", ext))
    }
}

/// A category name must be a single plain directory component.
fn validate_dir_name(name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::EmptyCategoryName);
    }
    if name == BACKUP_DIR_NAME {
        return Err(ConfigError::ReservedCategoryName(name.to_string()));
    }

    let mut components = Path::new(name).components();
    let single_normal = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
        && !name.contains(['/', '\\']);
    if !single_normal {
        return Err(ConfigError::InvalidCategoryName(name.to_string()));
    }

    Ok(())
}
