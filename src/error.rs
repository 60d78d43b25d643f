//! Classifier error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a reason table.
///
/// Classification itself never fails; every pattern is compiled when the
/// table is built, so a bad table is rejected before any lookup runs.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// A label was given no patterns at all.
    #[error("Label '{label}' has no patterns")]
    EmptyPatternSet {
        /// Label of the offending entry.
        label: String,
    },

    /// A pattern failed to compile.
    #[error("Invalid pattern for label '{label}': {pattern}")]
    InvalidPattern {
        /// Label of the offending entry.
        label: String,
        /// Source text of the pattern.
        pattern: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// The same label appears more than once in a table.
    #[error("Duplicate label '{label}' in reason table")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },

    /// A table file has an extension that is neither YAML nor JSON.
    #[error("Unsupported reason table format: {}", .path.display())]
    UnsupportedFormat {
        /// Path of the file.
        path: PathBuf,
    },
}

// Note: anyhow already has a blanket impl for thiserror::Error types
