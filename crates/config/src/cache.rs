use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable consulted first for the cache directory.
pub const PRIMARY_ENV: &str = "TIKTOKEN_CACHE_DIR";
/// Legacy environment variable, consulted when [`PRIMARY_ENV`] is not set.
pub const SECONDARY_ENV: &str = "DATA_GYM_CACHE_DIR";
/// Name of the subfolder of the platform temp directory used by default.
pub const DEFAULT_DIRECTORY_NAME: &str = "data-gym-cache";

/// Where cache entries are stored, if anywhere.
///
/// A `CacheConfig` without a directory means caching is disabled: every load
/// goes straight to the source and nothing is written to disk. That is a
/// valid mode of operation and not an error.
///
/// # Examples
///
/// ```
/// use rankcache_config::CacheConfig;
///
/// assert!(CacheConfig::at("/var/cache/ranks").is_enabled());
/// assert!(!CacheConfig::at("").is_enabled());
/// assert!(!CacheConfig::disabled().is_enabled());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    directory: Option<PathBuf>,
}
impl CacheConfig {
    /// Caching disabled.
    pub fn disabled() -> Self {
        Self { directory: None }
    }

    /// Cache entries stored in `directory`. An empty path disables caching.
    pub fn at(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        match directory.as_os_str().is_empty() {
            true => Self::disabled(),
            false => Self { directory: Some(directory) },
        }
    }

    /// Resolve the cache directory from the process environment.
    ///
    /// The environment is read on every call; nothing is memoized, so changes
    /// made between calls are picked up.
    pub fn from_env() -> Self {
        Self::resolve(std::env::var_os(PRIMARY_ENV), std::env::var_os(SECONDARY_ENV))
    }

    /// Resolve the cache directory from the values of [`PRIMARY_ENV`] and
    /// [`SECONDARY_ENV`].
    ///
    /// The first variable that is *set* wins, even when set to an empty value
    /// (which disables caching). When neither is set the directory defaults to
    /// [`default_directory()`](Self::default_directory).
    pub fn resolve(primary: Option<OsString>, secondary: Option<OsString>) -> Self {
        match primary.or(secondary) {
            Some(directory) => Self::at(directory),
            None => Self::at(Self::default_directory()),
        }
    }

    /// `<platform temp dir>/data-gym-cache`
    pub fn default_directory() -> PathBuf {
        std::env::temp_dir().join(DEFAULT_DIRECTORY_NAME)
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.directory.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn os(value: &str) -> Option<OsString> {
        Some(OsString::from(value))
    }

    #[rstest]
    #[case(os("/primary"), os("/secondary"), Some("/primary"))]
    #[case(None, os("/secondary"), Some("/secondary"))]
    #[case(os("/primary"), None, Some("/primary"))]
    // Set-but-empty disables caching rather than falling through.
    #[case(os(""), os("/secondary"), None)]
    #[case(None, os(""), None)]
    fn test_resolve(
        #[case] primary: Option<OsString>,
        #[case] secondary: Option<OsString>,
        #[case] expected: Option<&str>,
    ) {
        let config = CacheConfig::resolve(primary, secondary);
        assert_eq!(config.directory(), expected.map(Path::new));
    }

    #[test]
    fn test_resolve_defaults_to_temp_dir() {
        let config = CacheConfig::resolve(None, None);
        let directory = config.directory().unwrap();
        assert!(directory.starts_with(std::env::temp_dir()));
        assert!(directory.ends_with(DEFAULT_DIRECTORY_NAME));
    }

    #[test]
    fn test_empty_path_disables() {
        assert_eq!(CacheConfig::at(""), CacheConfig::disabled());
        assert_eq!(CacheConfig::at(PathBuf::new()).directory(), None);
    }

    #[test]
    fn test_at_keeps_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CacheConfig::at(temp_dir.path());
        assert!(config.is_enabled());
        assert_eq!(config.directory(), Some(temp_dir.path()));
    }
}
