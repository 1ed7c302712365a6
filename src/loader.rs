use crate::error::{ErrorKind, Result};
use crate::resources::ResourceSet;
use async_trait::async_trait;
use rankcache_config::CacheConfig;
use rankcache_ranks::RankTable;
use rankcache_source::{DefaultReader, SourceLocation};
use rankcache_store::CacheStore;
use std::sync::Arc;
use tracing::instrument;

pub type LoaderHandle = Arc<dyn RankLoader + Send + Sync>;

/// Anything that can produce rank tables.
///
/// [`Loader`] is the real implementation; consumers hold a [`LoaderHandle`] so
/// a stand-in can be injected in their own tests.
#[async_trait]
pub trait RankLoader: Send + Sync {
    /// Load the rank table at a local path or HTTP(S) URL, going through the
    /// cache.
    async fn load(&self, identifier: &str) -> Result<RankTable>;

    /// Load the rank table at `path` inside `resources`. No cache, no network.
    fn load_embedded(&self, resources: &dyn ResourceSet, path: &str) -> Result<RankTable>;
}

/// Fetch, cache and parse rank tables.
///
/// # Examples
///
/// ```no_run
/// use rankcache::Loader;
///
/// # async fn example() -> rankcache::error::Result<()> {
/// let loader = Loader::from_env();
/// let ranks = loader.load("https://openaipublic.blob.core.windows.net/encodings/cl100k_base.tiktoken").await?;
/// println!("{} tokens", ranks.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Loader {
    store: CacheStore,
}
impl Loader {
    pub fn new(store: CacheStore) -> Self {
        Self { store }
    }

    /// Loader using the environment's cache directory and the default reader.
    pub fn from_env() -> Self {
        Self::new(CacheStore::new(CacheConfig::from_env(), Arc::new(DefaultReader::default())))
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Load the rank table behind `identifier`, a local path or an
    /// `http://`/`https://` URL.
    ///
    /// The raw bytes are served from the cache when present; otherwise they are
    /// read from the source and cached before parsing. A table that fails to
    /// parse stays cached.
    ///
    /// # Errors
    /// - [`Store`](ErrorKind::Store) if the source could not be read or the
    ///   cache could not be read or written.
    /// - [`Parse`](ErrorKind::Parse) if the bytes are not a rank table.
    #[instrument(skip(self))]
    pub async fn load(&self, identifier: &str) -> Result<RankTable> {
        let location = SourceLocation::parse(identifier);
        let data = self.store.get_or_fetch(&location).await.map_err(ErrorKind::store)?;
        let table = rankcache_ranks::parse(&data).map_err(ErrorKind::ranks)?;
        tracing::debug!(entries = table.len(), "Loaded rank table");
        Ok(table)
    }

    /// Load the rank table at `path` from an injected resource set.
    ///
    /// # Errors
    /// - [`ResourceNotFound`](ErrorKind::ResourceNotFound) if `resources` has
    ///   no such path.
    /// - [`Parse`](ErrorKind::Parse) if the bytes are not a rank table.
    #[instrument(skip(resources))]
    pub fn load_embedded(resources: &dyn ResourceSet, path: &str) -> Result<RankTable> {
        let data = resources.open(path)?;
        rankcache_ranks::parse(&data).map_err(ErrorKind::ranks)
    }
}

#[async_trait]
impl RankLoader for Loader {
    async fn load(&self, identifier: &str) -> Result<RankTable> {
        Loader::load(self, identifier).await
    }

    fn load_embedded(&self, resources: &dyn ResourceSet, path: &str) -> Result<RankTable> {
        Loader::load_embedded(resources, path)
    }
}

/// [`Loader::load()`] with the cache directory resolved from the environment
/// at call time.
pub async fn load(identifier: &str) -> Result<RankTable> {
    Loader::from_env().load(identifier).await
}

/// [`Loader::load_embedded()`] as a free function.
pub fn load_embedded(resources: &dyn ResourceSet, path: &str) -> Result<RankTable> {
    Loader::load_embedded(resources, path)
}
