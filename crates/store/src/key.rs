use sha1::{Digest, Sha1};
use std::fmt;

/// Length of a [`CacheKey`] in hex characters (160 bits).
pub const KEY_LENGTH: usize = 40;

/// Lowercase hex SHA-1 digest of a source identifier; the cache filename.
///
/// SHA-1 keeps the on-disk layout interchangeable with other tiktoken
/// implementations sharing the same cache directory. Collision resistance is
/// not relied upon.
///
/// # Examples
///
/// ```
/// use rankcache_store::CacheKey;
///
/// let key = CacheKey::derive("https://openaipublic.blob.core.windows.net/encodings/cl100k_base.tiktoken");
/// assert_eq!(key.as_str(), "9b5ad71b2ce5302211f9c61530b329a4922fc6a4");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);
impl CacheKey {
    pub fn derive(identifier: impl AsRef<str>) -> Self {
        Self(hex::encode(Sha1::digest(identifier.as_ref().as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
