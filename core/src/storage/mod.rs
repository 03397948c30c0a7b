// cart_store/src/storage/mod.rs

//! The persistent key-value boundary the cart record lives behind.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Durable string key-value storage, the equivalent of a browser's local storage.
///
/// Implementations report any failure to reach the underlying medium as an error;
/// a missing key is `Ok(None)`, never an error. The cart store wraps failures into
/// `CartError::StorageUnavailable`.
pub trait KeyValueStore: Send + Sync {
  fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

  fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

  /// Removes the key. Removing an absent key succeeds.
  fn remove(&self, key: &str) -> anyhow::Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
  fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
    (**self).get(key)
  }

  fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
    (**self).set(key, value)
  }

  fn remove(&self, key: &str) -> anyhow::Result<()> {
    (**self).remove(key)
  }
}
