//! Raw byte sources for rank tables.
//!
//! A source identifier is either a local filesystem path or an `http://` /
//! `https://` URL. It is resolved once into a [`SourceLocation`], and read
//! through the [`SourceReader`] trait so that the layers above (the cache
//! store in particular) never branch on string prefixes themselves.

pub mod error;
mod http;
mod location;
#[cfg(feature = "mock")]
mod mock;
mod reader;

pub use crate::http::HttpFetcher;
pub use crate::location::SourceLocation;
#[cfg(feature = "mock")]
pub use crate::mock::MockReader;
pub use crate::reader::{DefaultReader, ReaderHandle, SourceReader, read_local};
