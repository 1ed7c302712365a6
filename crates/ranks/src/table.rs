use std::collections::HashMap;
use std::collections::hash_map;

/// Merge priority of a token; lower ranks are merged first.
pub type Rank = u32;

/// Mapping from token bytes to [`Rank`].
///
/// Keys are unique and unordered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankTable(HashMap<Vec<u8>, Rank>);
impl RankTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity(capacity))
    }

    /// Insert a token, returning the rank it replaced (if any).
    pub fn insert(&mut self, token: impl Into<Vec<u8>>, rank: Rank) -> Option<Rank> {
        self.0.insert(token.into(), rank)
    }

    pub fn get(&self, token: impl AsRef<[u8]>) -> Option<Rank> {
        self.0.get(token.as_ref()).copied()
    }

    pub fn contains(&self, token: impl AsRef<[u8]>) -> bool {
        self.0.contains_key(token.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest rank in the table, `None` when empty. Tokenizers usually number
    /// special tokens from `max_rank() + 1`.
    pub fn max_rank(&self) -> Option<Rank> {
        self.0.values().copied().max()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], Rank)> {
        self.0.iter().map(|(token, rank)| (token.as_slice(), *rank))
    }

    pub fn into_inner(self) -> HashMap<Vec<u8>, Rank> {
        self.0
    }
}
impl From<HashMap<Vec<u8>, Rank>> for RankTable {
    fn from(value: HashMap<Vec<u8>, Rank>) -> Self {
        Self(value)
    }
}
impl From<RankTable> for HashMap<Vec<u8>, Rank> {
    fn from(value: RankTable) -> Self {
        value.0
    }
}
impl<T: Into<Vec<u8>>> FromIterator<(T, Rank)> for RankTable {
    fn from_iter<I: IntoIterator<Item = (T, Rank)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(token, rank)| (token.into(), rank)).collect())
    }
}
impl IntoIterator for RankTable {
    type Item = (Vec<u8>, Rank);
    type IntoIter = hash_map::IntoIter<Vec<u8>, Rank>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
