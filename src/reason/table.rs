//! The ordered reason table.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClassifierError;
use crate::reason::pattern::PatternSet;

/// Authored form of a label's patterns: one pattern or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSpec {
    /// Shorthand for a one-element set.
    Single(String),
    /// Alternative patterns for the same label.
    AnyOf(Vec<String>),
}

impl PatternSpec {
    /// Normalizes the spec to a list of pattern strings.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Single(pattern) => std::slice::from_ref(pattern),
            Self::AnyOf(patterns) => patterns,
        }
    }
}

/// Authored form of one table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonSpec {
    /// Summary label reported on a match.
    pub label: String,
    /// Pattern or patterns for the label.
    pub patterns: PatternSpec,
}

impl ReasonSpec {
    /// Creates an entry spec.
    pub fn new(label: impl Into<String>, patterns: PatternSpec) -> Self {
        Self {
            label: label.into(),
            patterns,
        }
    }
}

/// One compiled entry of a [`ReasonMap`].
#[derive(Debug, Clone)]
pub struct ReasonEntry {
    label: String,
    patterns: PatternSet,
}

impl ReasonEntry {
    /// Summary label for this entry.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Compiled patterns for this entry.
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }
}

/// Ordered mapping from summary label to patterns.
///
/// Iteration order is authoring order and decides precedence: the first
/// entry with a matching pattern wins. Labels are unique.
#[derive(Debug, Clone)]
pub struct ReasonMap {
    entries: Vec<ReasonEntry>,
}

impl ReasonMap {
    /// Starts an empty table builder.
    pub fn builder() -> ReasonMapBuilder {
        ReasonMapBuilder::default()
    }

    /// Compiles a table from authored entry specs.
    pub fn from_specs<'a, I>(specs: I) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = &'a ReasonSpec>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for spec in specs {
            if !seen.insert(spec.label.as_str()) {
                return Err(ClassifierError::DuplicateLabel {
                    label: spec.label.clone(),
                });
            }
            entries.push(ReasonEntry {
                label: spec.label.clone(),
                patterns: PatternSet::any_of(&spec.label, spec.patterns.as_slice())?,
            });
        }

        debug!(entries = entries.len(), "Compiled reason table");
        Ok(Self { entries })
    }

    /// Returns the label of the first entry matching `text`, if any.
    pub fn summarize(&self, text: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.patterns.is_match(text))
            .map(ReasonEntry::label)
    }

    /// Looks up an entry by label.
    pub fn get(&self, label: &str) -> Option<&ReasonEntry> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    /// Position of a label in table order.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.label == label)
    }

    /// Entries in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, ReasonEntry> {
        self.entries.iter()
    }

    /// Labels in table order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(ReasonEntry::label)
    }

    /// Converts the table back to its authored form.
    ///
    /// Single-pattern entries come back as the shorthand form.
    pub fn to_specs(&self) -> Vec<ReasonSpec> {
        self.entries
            .iter()
            .map(|entry| {
                let mut patterns: Vec<String> =
                    entry.patterns.patterns().map(str::to_string).collect();
                let spec = if patterns.len() == 1 {
                    PatternSpec::Single(patterns.remove(0))
                } else {
                    PatternSpec::AnyOf(patterns)
                };
                ReasonSpec::new(entry.label.clone(), spec)
            })
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReasonMap {
    type Item = &'a ReasonEntry;
    type IntoIter = std::slice::Iter<'a, ReasonEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Incremental builder for a [`ReasonMap`].
#[derive(Debug, Default)]
pub struct ReasonMapBuilder {
    specs: Vec<ReasonSpec>,
}

impl ReasonMapBuilder {
    /// Appends a label with a single pattern.
    #[must_use]
    pub fn single(mut self, label: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.specs
            .push(ReasonSpec::new(label, PatternSpec::Single(pattern.into())));
        self
    }

    /// Appends a label with several alternative patterns.
    #[must_use]
    pub fn any_of<I, S>(mut self, label: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns.into_iter().map(Into::into).collect();
        self.specs
            .push(ReasonSpec::new(label, PatternSpec::AnyOf(patterns)));
        self
    }

    /// Compiles every pattern and produces the table.
    pub fn build(self) -> Result<ReasonMap, ClassifierError> {
        ReasonMap::from_specs(&self.specs)
    }
}
