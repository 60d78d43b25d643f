//! Status reason classification against an ordered pattern table.

pub mod builtin;
pub mod pattern;
pub mod summarize;
pub mod table;

pub use pattern::PatternSet;
pub use summarize::{
    summarize_reason, summarize_reason_with, StatusReason, Summarizer, DEFAULT_LABEL, NULL_TEXT,
};
pub use table::{PatternSpec, ReasonEntry, ReasonMap, ReasonMapBuilder, ReasonSpec};
