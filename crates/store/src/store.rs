use crate::CacheKey;
use crate::atomic::write_entry;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use rankcache_config::CacheConfig;
use rankcache_source::{ReaderHandle, SourceLocation};
use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::instrument;

/// Get-or-populate cache in front of a [`SourceReader`](rankcache_source::SourceReader).
///
/// Entries live flat in the configured directory, named by the
/// [`CacheKey`] of their source identifier. There is no eviction, no expiry
/// and no verification of entries beyond their existence.
///
/// # Examples
///
/// ```no_run
/// use rankcache_config::CacheConfig;
/// use rankcache_source::{DefaultReader, SourceLocation};
/// use rankcache_store::CacheStore;
/// use std::sync::Arc;
///
/// # async fn example() -> rankcache_store::error::Result<()> {
/// let store = CacheStore::new(CacheConfig::from_env(), Arc::new(DefaultReader::default()));
/// let location = SourceLocation::parse("https://openaipublic.blob.core.windows.net/encodings/r50k_base.tiktoken");
/// let bytes = store.get_or_fetch(&location).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CacheStore {
    config: CacheConfig,
    reader: ReaderHandle,
}
impl CacheStore {
    pub fn new(config: CacheConfig, reader: ReaderHandle) -> Self {
        Self { config, reader }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Path of the cache entry for `location`, whether or not it exists yet.
    /// `None` when caching is disabled.
    pub fn entry_path(&self, location: &SourceLocation) -> Option<PathBuf> {
        let key = CacheKey::derive(location.identifier());
        self.config.directory().map(|directory| directory.join(key.as_str()))
    }

    /// Return the bytes for `location`, from the cache if present, otherwise
    /// from the source (populating the cache on the way out).
    ///
    /// # Errors
    /// - [`Source`](ErrorKind::Source) if the source could not be read.
    /// - [`CacheRead`](ErrorKind::CacheRead) if an existing entry could not
    ///   be read.
    /// - [`CacheWrite`](ErrorKind::CacheWrite) if the fetched bytes could not
    ///   be stored. The bytes are not returned in that case.
    #[instrument(skip_all, fields(source = %location))]
    pub async fn get_or_fetch(&self, location: &SourceLocation) -> Result<Vec<u8>> {
        let Some(directory) = self.config.directory() else {
            tracing::debug!("Caching disabled, reading source directly");
            return self.reader.read(location).await.map_err(ErrorKind::source_failed);
        };

        let key = CacheKey::derive(location.identifier());
        let entry = directory.join(key.as_str());
        match fs::read(&entry).await {
            Ok(data) => {
                tracing::debug!(%key, bytes = data.len(), "Cache hit");
                return Ok(data);
            },
            // A missing directory (or a file in its place) is a miss; the write reports it.
            Err(err) if matches!(err.kind(), IoErrorKind::NotFound | IoErrorKind::NotADirectory) => {},
            Err(err) => return Err(err).or_raise(|| ErrorKind::CacheRead(entry)),
        }

        tracing::debug!(%key, "Cache miss");
        let data = self.reader.read(location).await.map_err(ErrorKind::source_failed)?;
        write_entry(directory.to_path_buf(), key, data).await
    }
}
