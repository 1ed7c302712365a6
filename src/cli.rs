use clap::{ArgAction, Parser, Subcommand};
use derive_more::{Display, Error};
use rankcache::error::{Error as LoadError, ErrorKind as LoadErrorKind};
use rankcache::{Builtins, CacheConfig, CacheKey, CacheStore, Loader, RankTable, SourceLocation};
use rankcache_config::Settings;
use rankcache_config::error::{Error as ConfigError, ErrorKind as ConfigErrorKind};
use rankcache_source::error::{Error as SourceError, ErrorKind as SourceErrorKind};
use rankcache_source::{DefaultReader, HttpFetcher};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("{_0}")]
    Config(ConfigErrorKind),
    #[display("could not set up HTTP client: {_0}")]
    Http(SourceErrorKind),
    #[display("{_0}")]
    Load(LoadErrorKind),
}
impl ErrorKind {
    fn config(err: ConfigError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Config(inner))
    }

    fn http(err: SourceError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Http(inner))
    }

    fn load(err: LoadError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Load(inner))
    }
}

/// Fetch, cache and parse BPE rank tables.
#[derive(Parser, Debug)]
#[command(name = "rankcache", version, about)]
pub struct Cli {
    /// Settings file (defaults to `config.toml` in the user config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Neither read nor write the cache.
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Cache directory, overriding settings and environment.
    #[arg(long, global = true, conflicts_with = "no_cache")]
    pub cache_dir: Option<PathBuf>,

    /// More logging; repeat for more detail. `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a rank table from a path or URL and print its size.
    Load { source: String },
    /// Print the cache key and entry path for a path or URL.
    Key { source: String },
    /// List builtin rank tables, or load one by name.
    Builtin { name: Option<String> },
}

impl Cli {
    pub fn env_filter(&self) -> EnvFilter {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }

    pub fn cache_config(&self, settings: &Settings) -> CacheConfig {
        if self.no_cache {
            return CacheConfig::disabled();
        }
        match &self.cache_dir {
            Some(directory) => CacheConfig::at(directory),
            None => settings.cache_config(),
        }
    }

    pub async fn run(self) -> Result<()> {
        let settings = Settings::load(self.config.as_deref()).map_err(ErrorKind::config)?;
        let config = self.cache_config(&settings);
        if !config.is_enabled() {
            tracing::info!("Caching disabled");
        }

        match self.command {
            Command::Load { source } => {
                let http = HttpFetcher::with_options(settings.http.timeout(), settings.http.user_agent.as_deref())
                    .map_err(ErrorKind::http)?;
                let loader = Loader::new(CacheStore::new(config, Arc::new(DefaultReader::new(http))));
                let table = loader.load(&source).await.map_err(ErrorKind::load)?;
                print_stats(&source, &table);
            },
            Command::Key { source } => {
                let location = SourceLocation::parse(source);
                let key = CacheKey::derive(location.identifier());
                println!("{key}");
                match config.directory() {
                    Some(directory) => println!("{}", directory.join(key.as_str()).display()),
                    None => println!("caching disabled"),
                }
            },
            Command::Builtin { name: None } => {
                for name in Builtins::list() {
                    println!("{name}");
                }
            },
            Command::Builtin { name: Some(name) } => {
                let table = Loader::load_embedded(&Builtins, &name).map_err(ErrorKind::load)?;
                print_stats(&name, &table);
            },
        }
        Ok(())
    }
}

fn print_stats(source: &str, table: &RankTable) {
    match table.max_rank() {
        Some(max) => println!("{source}: {} entries, max rank {max}", table.len()),
        None => println!("{source}: empty"),
    }
}
