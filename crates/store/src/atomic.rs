//! Two-phase cache population: write a uniquely named temp file next to the
//! entry, then rename it over the entry.
//!
//! Readers of an entry only ever see a missing file or a complete one.
//! Concurrent writers of the same key each get their own temp file; whichever
//! rename lands last wins, which is fine because a source's content is
//! expected not to change.

use crate::CacheKey;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temp files are named `<key>.<random>.tmp`, never colliding with a key.
pub(crate) const TEMP_SUFFIX: &str = ".tmp";

/// Store `data` as the entry for `key` inside `directory`, creating the
/// directory if needed. Hands `data` back on success.
pub(crate) async fn write_entry(directory: PathBuf, key: CacheKey, data: Vec<u8>) -> Result<Vec<u8>> {
    let target = directory.join(key.as_str());
    let written = tokio::task::spawn_blocking(move || persist(&directory, &key, &data).map(|_| data))
        .await
        .or_raise(|| ErrorKind::CacheWrite(target))??;
    Ok(written)
}

fn persist(directory: &Path, key: &CacheKey, data: &[u8]) -> Result<PathBuf> {
    let target = directory.join(key.as_str());
    fs::create_dir_all(directory).or_raise(|| ErrorKind::CacheWrite(target.clone()))?;

    let prefix = format!("{key}.");
    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(TEMP_SUFFIX);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Entries are shared with anyone who can read the directory (umask applies).
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let mut temp = builder.tempfile_in(directory).or_raise(|| ErrorKind::CacheWrite(target.clone()))?;
    tracing::trace!(temp = %temp.path().display(), bytes = data.len(), "Writing temp cache file");
    temp.write_all(data).or_raise(|| ErrorKind::CacheWrite(target.clone()))?;
    temp.as_file().sync_all().or_raise(|| ErrorKind::CacheWrite(target.clone()))?;

    // Dropping the PersistError drops the temp file with it.
    if let Err(err) = temp.persist(&target) {
        tracing::warn!(entry = %target.display(), error = %err.error, "Failed to move cache entry into place");
        return Err(err.error).or_raise(|| ErrorKind::CacheWrite(target));
    }
    tracing::debug!(entry = %target.display(), bytes = data.len(), "Cache entry written");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(directory: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(directory)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_persist_leaves_only_entry() {
        let temp_dir = tempfile::tempdir().unwrap();
        let key = CacheKey::derive("ranks.tiktoken");
        let target = persist(temp_dir.path(), &key, b"AAA= 0\n").unwrap();
        assert_eq!(target, temp_dir.path().join(key.as_str()));
        assert_eq!(fs::read(&target).unwrap(), b"AAA= 0\n");
        assert_eq!(names(temp_dir.path()), vec![key.to_string()]);
    }

    #[test]
    fn test_persist_replaces_entry() {
        let temp_dir = tempfile::tempdir().unwrap();
        let key = CacheKey::derive("ranks.tiktoken");
        persist(temp_dir.path(), &key, b"old").unwrap();
        let target = persist(temp_dir.path(), &key, b"new").unwrap();
        assert_eq!(fs::read(target).unwrap(), b"new");
        assert_eq!(names(temp_dir.path()).len(), 1);
    }

    #[test]
    fn test_persist_creates_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let directory = temp_dir.path().join("a/b/c");
        let key = CacheKey::derive("ranks.tiktoken");
        let target = persist(&directory, &key, b"data").unwrap();
        assert!(target.starts_with(&directory));
        assert!(target.is_file());
    }

    #[test]
    fn test_persist_directory_is_a_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let directory = temp_dir.path().join("not-a-directory");
        fs::write(&directory, b"").unwrap();
        let key = CacheKey::derive("ranks.tiktoken");
        let err = persist(&directory, &key, b"data").unwrap_err();
        assert_eq!(*err, ErrorKind::CacheWrite(directory.join(key.as_str())));
    }

    #[test]
    fn test_persist_rename_onto_directory_cleans_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let key = CacheKey::derive("ranks.tiktoken");
        // A non-empty directory squatting on the entry name makes the rename fail.
        fs::create_dir_all(temp_dir.path().join(key.as_str()).join("squatter")).unwrap();
        let err = persist(temp_dir.path(), &key, b"data").unwrap_err();
        assert!(matches!(&*err, ErrorKind::CacheWrite(_)));
        assert_eq!(names(temp_dir.path()), vec![key.to_string()]);
    }

    #[tokio::test]
    async fn test_write_entry_returns_data() {
        let temp_dir = tempfile::tempdir().unwrap();
        let key = CacheKey::derive("ranks.tiktoken");
        let data = write_entry(temp_dir.path().to_path_buf(), key.clone(), b"QUJD 1\n".to_vec()).await.unwrap();
        assert_eq!(data, b"QUJD 1\n");
        assert_eq!(fs::read(temp_dir.path().join(key.as_str())).unwrap(), data);
    }
}
