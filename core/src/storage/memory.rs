// cart_store/src/storage/memory.rs

use super::KeyValueStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-process key-value store with shared ownership.
///
/// Clones share the same map, so a store handed to a `CartStore` can still be
/// inspected (or tampered with, in tests) through another handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(Arc<RwLock<HashMap<String, String>>>);

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Raw value currently stored under `key`, bypassing the trait.
  pub fn raw(&self, key: &str) -> Option<String> {
    self.0.read().get(key).cloned()
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.0.read().contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.0.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.read().is_empty()
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
    Ok(self.0.read().get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
    self.0.write().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> anyhow::Result<()> {
    self.0.write().remove(key);
    Ok(())
  }
}
