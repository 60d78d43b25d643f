//! Status reason classification.

use crate::reason::builtin;
use crate::reason::table::ReasonMap;

/// Label returned when no pattern matches.
pub const DEFAULT_LABEL: &str = "__Unmatched";

/// Text classified in place of a missing status reason.
pub const NULL_TEXT: &str = "null";

/// A status reason as handed over by a caller.
///
/// Tabular sources represent empty cells with a placeholder rather than a
/// string; those map to [`StatusReason::Missing`] and are classified as the
/// literal text `"null"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusReason<'a> {
    /// Raw status reason text.
    Text(&'a str),
    /// No value was present.
    Missing,
}

impl<'a> StatusReason<'a> {
    /// Text the table is searched against.
    pub fn as_text(&self) -> &'a str {
        match *self {
            Self::Text(text) => text,
            Self::Missing => NULL_TEXT,
        }
    }
}

impl<'a> From<&'a str> for StatusReason<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for StatusReason<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl<'a> From<Option<&'a str>> for StatusReason<'a> {
    fn from(text: Option<&'a str>) -> Self {
        text.map_or(Self::Missing, Self::Text)
    }
}

impl<'a> From<Option<&'a String>> for StatusReason<'a> {
    fn from(text: Option<&'a String>) -> Self {
        text.map_or(Self::Missing, |text| Self::Text(text.as_str()))
    }
}

/// Summarizes a status reason with the built-in table.
///
/// Returns [`DEFAULT_LABEL`] when nothing matches.
///
/// ```
/// use stackset_status::reason::summarize_reason;
///
/// assert_eq!(summarize_reason("No updates are to be performed."), "No updates");
/// assert_eq!(summarize_reason(None::<&str>), "Null");
/// assert_eq!(summarize_reason(""), "__Unmatched");
/// ```
pub fn summarize_reason<'a>(status_reason: impl Into<StatusReason<'a>>) -> &'static str {
    summarize_reason_with(status_reason, builtin::reason_map(), DEFAULT_LABEL)
}

/// Summarizes a status reason against `reason_map`, falling back to `default`.
///
/// Entries are tried in table order and the first matching label wins.
/// A missing reason is classified as the text `"null"`.
pub fn summarize_reason_with<'a, 'm>(
    status_reason: impl Into<StatusReason<'a>>,
    reason_map: &'m ReasonMap,
    default: &'m str,
) -> &'m str {
    let status_reason: StatusReason<'a> = status_reason.into();
    reason_map
        .summarize(status_reason.as_text())
        .unwrap_or(default)
}

/// A reason table paired with its fallback label.
#[derive(Debug, Clone)]
pub struct Summarizer {
    reason_map: ReasonMap,
    default_label: String,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(builtin::reason_map().clone(), DEFAULT_LABEL)
    }
}

impl Summarizer {
    /// Creates a summarizer over a custom table.
    pub fn new(reason_map: ReasonMap, default_label: impl Into<String>) -> Self {
        Self {
            reason_map,
            default_label: default_label.into(),
        }
    }

    /// The table in use.
    pub fn reason_map(&self) -> &ReasonMap {
        &self.reason_map
    }

    /// Label returned when nothing matches.
    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    /// Summarizes one status reason.
    pub fn summarize<'a>(&self, status_reason: impl Into<StatusReason<'a>>) -> &str {
        summarize_reason_with(status_reason, &self.reason_map, &self.default_label)
    }

    /// Summarizes each status reason, preserving input order.
    pub fn summarize_all<'a, I, R>(&self, status_reasons: I) -> Vec<&str>
    where
        I: IntoIterator<Item = R>,
        R: Into<StatusReason<'a>>,
    {
        status_reasons
            .into_iter()
            .map(|reason| self.summarize(reason))
            .collect()
    }

    /// Counts status reasons per label.
    ///
    /// Labels appear in table order with the default label last; labels
    /// with no hits are left out. When the default label is also a table
    /// label, unmatched reasons are counted under that entry.
    pub fn tally<'a, I, R>(&self, status_reasons: I) -> Vec<(String, usize)>
    where
        I: IntoIterator<Item = R>,
        R: Into<StatusReason<'a>>,
    {
        let mut counts = vec![0_usize; self.reason_map.len() + 1];
        let unmatched = self.reason_map.len();

        for reason in status_reasons {
            let reason: StatusReason<'a> = reason.into();
            let text = reason.as_text();
            let slot = self
                .reason_map
                .iter()
                .position(|entry| entry.patterns().is_match(text))
                .unwrap_or(unmatched);
            counts[slot] += 1;
        }

        if let Some(shared) = self.reason_map.position(&self.default_label) {
            let unmatched_count = std::mem::take(&mut counts[unmatched]);
            counts[shared] += unmatched_count;
        }

        self.reason_map
            .labels()
            .chain(std::iter::once(self.default_label.as_str()))
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| (label.to_string(), count))
            .collect()
    }
}
