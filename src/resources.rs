//! Read-only resource sets for loading rank tables without cache or network.
//!
//! Anything that can hand out bytes by path implements [`ResourceSet`]. Files
//! compiled into the binary with [`rust-embed`](rust_embed) are exposed via
//! [`EmbeddedResources`]; this crate ships one such set, [`Builtins`].

use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use rust_embed::{Embed, RustEmbed};
use std::borrow::Cow;
use std::collections::HashMap;
use std::marker::PhantomData;

/// Opaque read-only byte source keyed by path.
pub trait ResourceSet: Send + Sync {
    /// Contents of `path`, or [`ResourceNotFound`](ErrorKind::ResourceNotFound).
    fn open(&self, path: &str) -> Result<Cow<'_, [u8]>>;
}

/// [`ResourceSet`] over a `#[derive(Embed)]` folder.
///
/// # Examples
///
/// ```ignore
/// use rankcache::{EmbeddedResources, Loader};
/// use rust_embed::Embed;
///
/// #[derive(Embed)]
/// #[folder = "encodings/"]
/// struct Encodings;
///
/// let ranks = Loader::load_embedded(&EmbeddedResources::<Encodings>::new(), "cl100k_base.tiktoken")?;
/// ```
pub struct EmbeddedResources<E>(PhantomData<fn() -> E>);
impl<E: RustEmbed> EmbeddedResources<E> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}
impl<E: RustEmbed> Default for EmbeddedResources<E> {
    fn default() -> Self {
        Self::new()
    }
}
impl<E: RustEmbed> ResourceSet for EmbeddedResources<E> {
    fn open(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        open_embedded::<E>(path)
    }
}

fn open_embedded<E: RustEmbed>(path: &str) -> Result<Cow<'static, [u8]>> {
    E::get(path).map(|file| file.data).ok_or_raise(|| ErrorKind::ResourceNotFound(path.to_string()))
}

impl ResourceSet for HashMap<String, Vec<u8>> {
    fn open(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        self.get(path)
            .map(|data| Cow::Borrowed(data.as_slice()))
            .ok_or_raise(|| ErrorKind::ResourceNotFound(path.to_string()))
    }
}

/// Rank tables compiled into this crate.
///
/// `byte_level.tiktoken` maps every single byte to its own value as rank: the
/// base vocabulary every byte-level BPE table starts from.
#[derive(Embed)]
#[folder = "assets/ranks/"]
pub struct Builtins;
impl Builtins {
    /// Names of all builtin rank tables.
    pub fn list() -> Vec<Cow<'static, str>> {
        <Self as RustEmbed>::iter().filter(|name| name.ends_with(".tiktoken")).collect()
    }

    pub fn exists(name: impl AsRef<str>) -> bool {
        <Self as RustEmbed>::get(name.as_ref()).is_some()
    }
}
impl ResourceSet for Builtins {
    fn open(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        open_embedded::<Self>(path)
    }
}
