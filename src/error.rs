//! Loader Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Errors from the store and parser
//! crates are carried verbatim: their kind is copied into this crate's kind
//! and their `Exn` frame is kept as a child.

use derive_more::{Display, Error};
use rankcache_ranks::error::{Error as RanksError, ErrorKind as RanksErrorKind};
use rankcache_store::error::{Error as StoreError, ErrorKind as StoreErrorKind};

/// A loader error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fetching or caching the source failed.
    #[display("{_0}")]
    Store(StoreErrorKind),
    /// The bytes were obtained but are not a valid rank table.
    #[display("invalid rank table: {_0}")]
    Parse(RanksErrorKind),
    /// The embedded resource set has no such path.
    #[display("resource not found: {_0}")]
    ResourceNotFound(#[error(not(source))] String),
}
impl ErrorKind {
    #[track_caller]
    pub fn store(err: StoreError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Store(inner))
    }

    #[track_caller]
    pub fn ranks(err: RanksError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Parse(inner))
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(kind) => kind.is_retryable(),
            Self::Parse(kind) => kind.is_retryable(),
            Self::ResourceNotFound(_) => false,
        }
    }

    /// Returns `true` for a missing local file, a 404 from a remote source or
    /// a path absent from an embedded resource set.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Store(kind) => kind.is_not_found(),
            Self::ResourceNotFound(_) => true,
            Self::Parse(_) => false,
        }
    }
}
