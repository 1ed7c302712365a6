//! Configuration for rankcache.
//!
//! Two layers live here:
//!
//! - [`CacheConfig`]: the one value the cache store needs, i.e. where (and
//!   whether) cache entries are written. Resolved from the environment in the
//!   same way other tiktoken implementations do, so cache directories are
//!   shared between them.
//! - [`Settings`]: everything the command-line binary reads, layered with
//!   [`figment`] from defaults, an optional TOML file and the environment.

mod cache;
pub mod error;
mod settings;

pub use crate::cache::{CacheConfig, DEFAULT_DIRECTORY_NAME, PRIMARY_ENV, SECONDARY_ENV};
pub use crate::settings::{CacheSettings, ENV_PREFIX, HttpSettings, Settings};
