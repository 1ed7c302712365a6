use crate::SourceLocation;
use crate::error::{ErrorKind, Result};
use crate::http::HttpFetcher;
use async_trait::async_trait;
use exn::ResultExt;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::instrument;

/// Shared, type-erased [`SourceReader`].
pub type ReaderHandle = Arc<dyn SourceReader + Send + Sync>;

/// Reads the raw bytes behind a [`SourceLocation`].
///
/// A single attempt is made per call, and any failure is final for that call.
/// The cache store only ever talks to this trait, which is what lets tests
/// swap in a counting stand-in (see `MockReader` behind the `mock` feature).
#[async_trait]
pub trait SourceReader: Send + Sync {
    async fn read(&self, location: &SourceLocation) -> Result<Vec<u8>>;
}

/// Reads local paths from the filesystem and remote URLs over HTTP(S).
#[derive(Clone, Debug, Default)]
pub struct DefaultReader {
    http: HttpFetcher,
}
impl DefaultReader {
    pub fn new(http: HttpFetcher) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SourceReader for DefaultReader {
    async fn read(&self, location: &SourceLocation) -> Result<Vec<u8>> {
        match location {
            SourceLocation::LocalPath(path) => read_local(path).await,
            SourceLocation::RemoteUrl(url) => self.http.fetch(url).await,
        }
    }
}

/// Read a local file in full.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn read_local(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path).await {
        Ok(data) => {
            tracing::debug!(bytes = data.len(), "Read local source");
            Ok(data)
        },
        Err(err) => {
            let kind = match err.kind() {
                IoErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
                IoErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
                _ => ErrorKind::Io(path.to_path_buf()),
            };
            Err(err).or_raise(|| kind)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::tests::{fetcher, serve_once};

    #[tokio::test]
    async fn test_read_local() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("ranks.tiktoken");
        std::fs::write(&path, b"AAA= 0\n").unwrap();
        let reader = DefaultReader::default();
        let data = reader.read(&SourceLocation::LocalPath(path)).await.unwrap();
        assert_eq!(data, b"AAA= 0\n");
    }

    #[tokio::test]
    async fn test_read_local_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.tiktoken");
        let err = DefaultReader::default().read(&SourceLocation::LocalPath(path.clone())).await.unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound(path));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_read_local_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = read_local(temp_dir.path()).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Io(temp_dir.path().to_path_buf()));
    }

    #[tokio::test]
    async fn test_read_remote() {
        let url = serve_once("200 OK", b"QUJD 1\n").await;
        let reader = DefaultReader::new(fetcher());
        let data = reader.read(&SourceLocation::parse(url)).await.unwrap();
        assert_eq!(data, b"QUJD 1\n");
    }

    #[tokio::test]
    async fn test_read_through_handle() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("ranks.tiktoken");
        std::fs::write(&path, b"data").unwrap();
        let handle: ReaderHandle = Arc::new(DefaultReader::default());
        assert_eq!(handle.read(&SourceLocation::LocalPath(path)).await.unwrap(), b"data");
    }
}
