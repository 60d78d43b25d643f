//! # stackset-status
//!
//! Summarizes CloudFormation StackSet status reasons into a handful of
//! categories so large listings of stack instances can be scanned at a glance.
//!
//! ## Quick Start
//!
//! ```rust
//! use stackset_status::reason::summarize_reason;
//!
//! assert_eq!(summarize_reason("ACCOUNT_SUSPENDED"), "Account suspended");
//! assert_eq!(summarize_reason("something new"), "__Unmatched");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod reason;

pub use crate::error::ClassifierError;
pub use crate::reason::{summarize_reason, summarize_reason_with, ReasonMap, StatusReason};

/// The current version of stackset-status.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
