// cart_store/src/storage/file.rs

use super::KeyValueStore;
use anyhow::{bail, Context};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{event, Level};

/// Directory-backed key-value store. Each key is one `<key>.json` file.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written record.
#[derive(Debug, Clone)]
pub struct FileStore {
  root: PathBuf,
}

impl FileStore {
  /// Opens (creating if needed) the store rooted at `root`.
  pub fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
    let root = root.into();
    fs::create_dir_all(&root).with_context(|| format!("creating storage directory {}", root.display()))?;
    event!(Level::DEBUG, root = %root.display(), "File store opened.");
    Ok(Self { root })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Checks that `key` can be stored: non-empty, not starting with `.`, and made
  /// only of ASCII letters, digits, `_`, `-` and `.`.
  pub fn validate_key(key: &str) -> anyhow::Result<()> {
    let valid = !key.is_empty()
      && !key.starts_with('.')
      && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !valid {
      bail!("storage key '{}' is not usable as a file name", key);
    }
    Ok(())
  }

  fn path_for(&self, key: &str) -> anyhow::Result<PathBuf> {
    Self::validate_key(key)?;
    Ok(self.root.join(format!("{}.json", key)))
  }
}

impl KeyValueStore for FileStore {
  fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
    let path = self.path_for(key)?;
    match fs::read_to_string(&path) {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
  }

  fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
    let path = self.path_for(key)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, value).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
  }

  fn remove(&self, key: &str) -> anyhow::Result<()> {
    let path = self.path_for(key)?;
    match fs::remove_file(&path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
    }
  }
}
