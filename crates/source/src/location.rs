use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

const REMOTE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Where the bytes of a source identifier come from.
///
/// Resolved once from the caller-supplied identifier: anything starting with
/// `http://` or `https://` is remote, everything else is a local path. The
/// check is a plain, case-sensitive prefix match.
///
/// # Examples
///
/// ```
/// use rankcache_source::SourceLocation;
/// use std::path::PathBuf;
///
/// let remote = SourceLocation::parse("https://example.com/cl100k_base.tiktoken");
/// assert!(remote.is_remote());
///
/// let local = SourceLocation::parse("ranks/cl100k_base.tiktoken");
/// assert_eq!(local, SourceLocation::LocalPath(PathBuf::from("ranks/cl100k_base.tiktoken")));
/// assert_eq!(local.identifier(), "ranks/cl100k_base.tiktoken");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceLocation {
    LocalPath(PathBuf),
    RemoteUrl(String),
}
impl SourceLocation {
    pub fn parse(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        match REMOTE_SCHEMES.iter().any(|scheme| identifier.starts_with(scheme)) {
            true => Self::RemoteUrl(identifier),
            false => Self::LocalPath(PathBuf::from(identifier)),
        }
    }

    /// The identifier this location was parsed from.
    ///
    /// Cache keys are derived from this string, so it must round-trip exactly.
    /// Local paths built from non-UTF-8 `PathBuf`s (not possible through
    /// [`parse()`](Self::parse)) are converted lossily.
    pub fn identifier(&self) -> Cow<'_, str> {
        match self {
            Self::LocalPath(path) => path.to_string_lossy(),
            Self::RemoteUrl(url) => Cow::Borrowed(url),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteUrl(_))
    }
}
impl FromStr for SourceLocation {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
impl From<&str> for SourceLocation {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}
impl From<String> for SourceLocation {
    fn from(value: String) -> Self {
        Self::parse(value)
    }
}
impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}
