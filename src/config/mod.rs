//! Reason table files.
//!
//! A table file lists entries in precedence order:
//!
//! ```yaml
//! default_label: Other
//! reasons:
//!   - label: Null
//!     patterns: ^null$
//!   - label: Initiated
//!     patterns:
//!       - ^User initiated operation$
//!       - ^User Initiated$
//! ```
//!
//! Files ending in `.json` use the same structure as JSON.

pub mod yaml;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClassifierError;
use crate::reason::{ReasonMap, ReasonSpec, Summarizer, DEFAULT_LABEL};

/// On-disk representation of a reason table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonFile {
    /// Label for unmatched reasons; the crate default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_label: Option<String>,

    /// Table entries in precedence order.
    pub reasons: Vec<ReasonSpec>,
}

/// Serialization format of a table file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ClassifierError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ClassifierError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl ReasonFile {
    /// Captures a compiled table and default label in file form.
    pub fn from_reason_map(reason_map: &ReasonMap, default_label: Option<&str>) -> Self {
        Self {
            default_label: default_label.map(str::to_string),
            reasons: reason_map.to_specs(),
        }
    }

    /// Parses a table from YAML text and validates it.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: ReasonFile =
            serde_yaml::from_str(content).context("Failed to parse YAML reason table")?;
        file.validate()?;
        Ok(file)
    }

    /// Parses a table from JSON text and validates it.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: ReasonFile =
            serde_json::from_str(content).context("Failed to parse JSON reason table")?;
        file.validate()?;
        Ok(file)
    }

    /// Loads and validates a table file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read reason table: {}", path.display()))?;

        let file = match format {
            Format::Yaml => Self::from_yaml_str(&content),
            Format::Json => Self::from_json_str(&content),
        }
        .with_context(|| format!("Invalid reason table: {}", path.display()))?;

        debug!(path = %path.display(), entries = file.reasons.len(), "Loaded reason table");
        Ok(file)
    }

    /// Writes the table, as YAML or JSON depending on the extension.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        let content = match Format::from_path(path)? {
            Format::Yaml => yaml::to_yaml(self)?,
            Format::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize reason table")?
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write reason table: {}", path.display()))?;

        Ok(())
    }

    /// Checks that every entry compiles and labels are unique.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        self.reason_map().map(|_| ())
    }

    /// Compiles the entries into a table.
    pub fn reason_map(&self) -> Result<ReasonMap, ClassifierError> {
        ReasonMap::from_specs(&self.reasons)
    }

    /// Builds a summarizer from the table and default label.
    pub fn summarizer(&self) -> Result<Summarizer, ClassifierError> {
        let default_label = self.default_label.as_deref().unwrap_or(DEFAULT_LABEL);
        Ok(Summarizer::new(self.reason_map()?, default_label))
    }
}

/// Locates the user's reason table override.
pub struct TableLocator {
    table_path: PathBuf,
}

impl TableLocator {
    /// Creates a locator for the default path.
    pub fn new() -> Result<Self> {
        Ok(Self {
            table_path: Self::default_table_path()?,
        })
    }

    /// Creates a locator for a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { table_path: path }
    }

    /// Returns the default path ($HOME/.stackset-status/reasons.yaml).
    pub fn default_table_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".stackset-status").join("reasons.yaml"))
    }

    /// Path this locator reads from.
    pub fn table_path(&self) -> &Path {
        &self.table_path
    }

    /// Loads the override file, if there is one.
    pub fn load(&self) -> Result<Option<ReasonFile>> {
        if !self.table_path.exists() {
            debug!(path = %self.table_path.display(), "No reason table override");
            return Ok(None);
        }

        ReasonFile::load_from_file(&self.table_path).map(Some)
    }

    /// Builds a summarizer from the override file, or the built-in table.
    pub fn load_summarizer(&self) -> Result<Summarizer> {
        match self.load()? {
            Some(file) => Ok(file.summarizer()?),
            None => Ok(Summarizer::default()),
        }
    }
}
