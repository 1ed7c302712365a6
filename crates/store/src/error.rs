//! Store Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use rankcache_source::error::{Error as SourceError, ErrorKind as SourceErrorKind};
use std::path::PathBuf;

/// A cache store error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source could not be read. Never masked by a stale cache entry.
    #[display("source unavailable: {_0}")]
    Source(SourceErrorKind),
    /// A cache entry exists but could not be read back.
    #[display("failed to read cache entry: {}", _0.display())]
    CacheRead(#[error(not(source))] PathBuf),
    /// Creating the cache directory, writing the temp file or renaming it
    /// into place failed. The fetched bytes are discarded.
    #[display("failed to write cache entry: {}", _0.display())]
    CacheWrite(#[error(not(source))] PathBuf),
}
impl ErrorKind {
    /// Convert a source error into a store error, keeping the source crate's
    /// `Exn` frame as a child in the error tree.
    #[track_caller]
    pub fn source_failed(err: SourceError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Source(inner))
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Source(kind) => kind.is_retryable(),
            Self::CacheRead(_) | Self::CacheWrite(_) => true,
        }
    }

    /// Returns `true` if the source does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Source(kind) if kind.is_not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_failed_keeps_kind() {
        let err = SourceError::from(SourceErrorKind::NotFound(PathBuf::from("ranks.tiktoken")));
        let err = ErrorKind::source_failed(err);
        assert_eq!(*err, ErrorKind::Source(SourceErrorKind::NotFound(PathBuf::from("ranks.tiktoken"))));
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(
            ErrorKind::CacheWrite(PathBuf::from("/c/abc")).to_string(),
            "failed to write cache entry: /c/abc"
        );
        assert_eq!(
            ErrorKind::Source(SourceErrorKind::Fetch("https://x".to_string())).to_string(),
            "source unavailable: failed to fetch https://x"
        );
    }
}
