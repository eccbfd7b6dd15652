//! Category table configuration.
//!
//! The built-in table can be replaced by a TOML file listing categories in
//! lookup order. Extensions may be written with or without the leading dot
//! and in any case; they are normalized when the table is compiled.
//!
//! # Configuration File Format
//!
//! ```toml
//! fallback = "outros"
//!
//! [[categories]]
//! name = "documentos"
//! extensions = [".pdf", ".doc", ".docx", ".txt"]
//!
//! [[categories]]
//! name = "imagens"
//! extensions = ["jpg", "JPEG", "png", "gif"]
//! ```

use crate::file_category::{Category, CategoryTable, DEFAULT_FALLBACK, default_categories};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".dirkeeprc.toml";

/// Errors that can occur while loading or validating a category configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// IO error while reading configuration.
    IoError(String),
    /// A category or fallback name is empty.
    EmptyCategoryName,
    /// A category name is not a plain directory name.
    InvalidCategoryName(String),
    /// A category name collides with the backup directory.
    ReservedCategoryName(String),
    /// The same category name appears more than once.
    DuplicateCategory(String),
    /// A category lists an empty extension.
    EmptyExtension {
        /// The category holding the empty entry.
        category: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
            ConfigError::EmptyCategoryName => write!(f, "Category names must not be empty"),
            ConfigError::InvalidCategoryName(name) => {
                write!(
                    f,
                    "Invalid category name '{}': expected a plain directory name",
                    name
                )
            }
            ConfigError::ReservedCategoryName(name) => {
                write!(f, "Category name '{}' is reserved", name)
            }
            ConfigError::DuplicateCategory(name) => {
                write!(f, "Category '{}' is defined more than once", name)
            }
            ConfigError::EmptyExtension { category } => {
                write!(f, "Category '{}' lists an empty extension", category)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Category configuration as read from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Category receiving files no other category claims.
    #[serde(default = "default_fallback")]
    pub fallback: String,

    /// Categories in lookup order.
    #[serde(default = "default_rules")]
    pub categories: Vec<CategoryRule>,
}

/// A single category entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category name, also the destination directory name.
    pub name: String,

    /// Extensions routed to this category.
    #[serde(default)]
    pub extensions: Vec<String>,
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK.to_string()
}

fn default_rules() -> Vec<CategoryRule> {
    default_categories()
        .iter()
        .map(|category| CategoryRule {
            name: category.name().to_string(),
            extensions: category.extensions().map(str::to_string).collect(),
        })
        .collect()
}

impl CategoryConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.dirkeeprc.toml` in the current directory
    /// 3. Look for `~/.config/dirkeep/config.toml` in home directory
    /// 4. Fall back to the built-in table
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but cannot be read,
    /// or if a discovered file cannot be parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("dirkeep")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if file cannot be read.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Validate the configuration and build the category table.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is invalid or duplicated, or an extension is empty.
    pub fn compile(self) -> Result<CategoryTable, ConfigError> {
        let categories = self
            .categories
            .into_iter()
            .map(|rule| Category::new(rule.name, rule.extensions))
            .collect::<Result<Vec<_>, _>>()?;

        CategoryTable::new(categories, self.fallback)
    }
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            categories: default_rules(),
        }
    }
}
