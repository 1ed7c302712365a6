use crate::CacheConfig;
use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment variables overriding [`Settings`].
///
/// Nested keys are separated by a double underscore, so `cache.dir` is set
/// with `RANKCACHE_CACHE__DIR`.
pub const ENV_PREFIX: &str = "RANKCACHE_";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Settings for the `rankcache` binary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub cache: CacheSettings,
    pub http: HttpSettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Set to `false` to bypass the cache entirely.
    pub enabled: bool,
    /// Overrides the environment-derived cache directory. An empty value
    /// disables caching.
    pub dir: Option<PathBuf>,
}
impl Default for CacheSettings {
    fn default() -> Self {
        Self { enabled: true, dir: None }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Whole-request timeout. Unset means no timeout beyond the transport's own.
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}
impl HttpSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Settings {
    /// Build the layered [`Figment`]: defaults, then the TOML file (explicit or
    /// [`default_file()`](Self::default_file), silently skipped if missing),
    /// then [`ENV_PREFIX`]ed environment variables.
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));
        if let Some(path) = file.map(Path::to_path_buf).or_else(Self::default_file) {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load settings.
    ///
    /// An explicitly requested file must exist; the default file is optional.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file
            && !path.exists()
        {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        let settings: Settings = Self::figment(file).extract().or_raise(|| ErrorKind::Invalid)?;
        tracing::debug!(?settings, "Loaded settings");
        Ok(settings)
    }

    /// Per-user configuration file, e.g. `~/.config/rankcache/config.toml`.
    pub fn default_file() -> Option<PathBuf> {
        ProjectDirs::from("", "", "rankcache").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// The [`CacheConfig`] these settings describe.
    ///
    /// Falls back to [`CacheConfig::from_env()`] when no directory is
    /// configured, so the usual environment variables keep working.
    pub fn cache_config(&self) -> CacheConfig {
        if !self.cache.enabled {
            return CacheConfig::disabled();
        }
        match &self.cache.dir {
            Some(dir) => CacheConfig::at(dir),
            None => CacheConfig::from_env(),
        }
    }
}
