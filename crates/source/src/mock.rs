//! In-memory source reader for testing.

use crate::error::{ErrorKind, Result};
use crate::{SourceLocation, SourceReader};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-memory [`SourceReader`] that counts how often it is asked for bytes.
///
/// Payloads are keyed by the source identifier. Missing identifiers fail the
/// same way the real reader would: local paths with
/// [`NotFound`](ErrorKind::NotFound), remote URLs with a 404
/// [`Status`](ErrorKind::Status).
///
/// # Examples
///
/// ```
/// use rankcache_source::{MockReader, SourceLocation, SourceReader};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let reader = MockReader::with_sources([("https://example.com/r.tiktoken", b"AAA= 0\n")]);
/// let data = reader.read(&SourceLocation::parse("https://example.com/r.tiktoken")).await?;
/// assert_eq!(data, b"AAA= 0\n");
/// assert_eq!(reader.calls(), 1);
/// # Ok(())
/// # }
/// ```
pub struct MockReader {
    sources: RwLock<HashMap<String, Vec<u8>>>,
    calls: AtomicUsize,
}

impl MockReader {
    /// Create a mock reader pre-populated with payloads.
    pub fn with_sources(sources: impl IntoIterator<Item = (impl Into<String>, impl Into<Vec<u8>>)>) -> Self {
        Self {
            sources: RwLock::new(sources.into_iter().map(|(id, data)| (id.into(), data.into())).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Replace (or add) the payload served for `identifier`.
    pub async fn insert(&self, identifier: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.sources.write().await.insert(identifier.into(), data.into());
    }

    /// Number of [`read()`](SourceReader::read) calls so far, successful or not.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
impl Default for MockReader {
    fn default() -> Self {
        let sources: [(&str, &[u8]); 0] = [];
        Self::with_sources(sources)
    }
}

#[async_trait]
impl SourceReader for MockReader {
    async fn read(&self, location: &SourceLocation) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(data) = self.sources.read().await.get(location.identifier().as_ref()) {
            return Ok(data.clone());
        }
        match location {
            SourceLocation::LocalPath(path) => exn::bail!(ErrorKind::NotFound(path.clone())),
            SourceLocation::RemoteUrl(url) => exn::bail!(ErrorKind::Status { url: url.clone(), status: 404 }),
        }
    }
}
