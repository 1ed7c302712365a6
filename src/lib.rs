//! Fetch, cache and parse BPE rank tables.
//!
//! A rank table maps token byte strings to merge ranks and is distributed as
//! text, one `<base64 token> <decimal rank>` pair per line. [`Loader`] reads
//! such a table from a local path or an HTTP(S) URL, keeps the raw bytes in a
//! content-addressed cache directory and parses them into a [`RankTable`].
//! Tables compiled into a binary are loaded through a [`ResourceSet`] instead,
//! bypassing both the cache and the network.
//!
//! ```no_run
//! # async fn example() -> rankcache::error::Result<()> {
//! let ranks = rankcache::load("https://openaipublic.blob.core.windows.net/encodings/r50k_base.tiktoken").await?;
//! let bytes = rankcache::load_embedded(&rankcache::Builtins, "byte_level.tiktoken")?;
//! assert_eq!(bytes.len(), 256);
//! # let _ = ranks;
//! # Ok(())
//! # }
//! ```

pub mod error;
mod loader;
mod resources;

pub use crate::loader::{Loader, LoaderHandle, RankLoader, load, load_embedded};
pub use crate::resources::{Builtins, EmbeddedResources, ResourceSet};
pub use rankcache_config::CacheConfig;
pub use rankcache_ranks::{Rank, RankTable};
pub use rankcache_source::SourceLocation;
pub use rankcache_store::{CacheKey, CacheStore};
