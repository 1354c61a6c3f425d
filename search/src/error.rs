//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (goal found, frontier exhausted, budget spent) are values of
//! [`crate::search::TerminationReason`], never errors.

use thiserror::Error;

/// Typed failure for pre-flight search validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A policy field holds a value the search loop cannot run with.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
}
