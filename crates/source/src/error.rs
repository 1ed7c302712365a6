//! Source Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Underlying I/O and HTTP errors are
//! kept as children in the error tree rather than stored in the kind, so kinds
//! stay cheap to clone when raised into other crates' errors.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A source error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local file does not exist
    #[display("file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Local file exists but may not be read
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Any other failure reading a local file
    #[display("I/O error reading {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// Transport-level failure (connection, TLS, body) for a remote source.
    #[display("failed to fetch {_0}")]
    Fetch(#[error(not(source))] String),
    /// Remote source answered with a non-success status.
    #[display("failed to fetch {url}: HTTP {status}")]
    Status {
        url: String,
        status: u16,
    },
    /// The HTTP client could not be constructed from the given options.
    #[display("could not build HTTP client")]
    Client,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Io(_) | Self::Fetch(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::NotFound(_) | Self::PermissionDenied(_) | Self::Client => false,
        }
    }

    /// Returns `true` if the source does not exist, locally or remotely.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Status { status: 404 | 410, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::NotFound(PathBuf::from("/a/b")).to_string(), "file not found: /a/b");
        assert_eq!(ErrorKind::Fetch("https://x/y".to_string()).to_string(), "failed to fetch https://x/y");
        assert_eq!(
            ErrorKind::Status { url: "https://x/y".to_string(), status: 503 }.to_string(),
            "failed to fetch https://x/y: HTTP 503"
        );
    }

    #[rstest]
    #[case(ErrorKind::NotFound(PathBuf::from("x")), false)]
    #[case(ErrorKind::PermissionDenied(PathBuf::from("x")), false)]
    #[case(ErrorKind::Io(PathBuf::from("x")), true)]
    #[case(ErrorKind::Fetch("u".to_string()), true)]
    #[case(ErrorKind::Status { url: "u".to_string(), status: 404 }, false)]
    #[case(ErrorKind::Status { url: "u".to_string(), status: 429 }, true)]
    #[case(ErrorKind::Status { url: "u".to_string(), status: 502 }, true)]
    #[case(ErrorKind::Client, false)]
    fn error_kind_retryable(#[case] kind: ErrorKind, #[case] expected: bool) {
        assert_eq!(kind.is_retryable(), expected);
    }
}
