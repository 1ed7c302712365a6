//! Content-addressed on-disk cache for rank-table sources.
//!
//! The cache maps a source identifier to `<directory>/<sha1-hex>` and never
//! exposes a partially written entry: new entries are written to a temp file
//! in the same directory and renamed into place. See [`CacheStore`].

mod atomic;
pub mod error;
mod key;
mod store;

pub use crate::key::{CacheKey, KEY_LENGTH};
pub use crate::store::CacheStore;
