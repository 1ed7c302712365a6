//! Rank Table Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A rank table error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for rank table operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A line could not be parsed into a token and a rank.
    #[display("line {line}: failed to parse {field} from {value:?}")]
    ParseError {
        /// 1-based line number.
        line: usize,
        /// Which field was malformed: `token` or `rank`.
        field: &'static str,
        /// The whole offending line.
        value: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The same bytes will fail the same way.
        false
    }
}
