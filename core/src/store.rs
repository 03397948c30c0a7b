// cart_store/src/store.rs

//! Defines `CartStore`, the single owner of the persisted cart record.
//!
//! Every read and write of the record goes through this type. Mutations are
//! read-modify-write sequences executed under one mutex, so concurrent callers
//! (e.g. several HTTP workers sharing an `Arc<CartStore>`) never interleave
//! between the read and the write half of an update. Each mutation is numbered
//! while the lock is held and listeners only ever see those numbers increase.

use crate::config::{CartConfig, DEFAULT_STORAGE_KEY};
use crate::error::{CartError, CartResult, StorageOp};
use crate::lookup::ProductLookup;
use crate::model::{decode_record, encode_record, LineItem};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::summary::{self, CartSummary, PartialSummary, SummaryOptions};
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use std::cell::Cell;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Snapshot passed to change listeners after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartChange {
  /// Position of the mutation in the store's history, starting at 1.
  pub sequence: u64,
  /// Sum of quantities across the cart, i.e. the badge count.
  pub total_quantity: u64,
  pub distinct_items: usize,
}

impl CartChange {
  fn of(sequence: u64, items: &[LineItem]) -> Self {
    Self {
      sequence,
      total_quantity: total_of(items),
      distinct_items: items.len(),
    }
  }
}

/// Callback invoked after every mutation.
pub type ChangeListener = Arc<dyn Fn(&CartChange) + Send + Sync + 'static>;

pub struct CartStore {
  storage: Arc<dyn KeyValueStore>,
  key: String,
  // Guards every read-modify-write; holds the sequence of the last mutation.
  mutation_lock: Mutex<u64>,
  // Sequence of the last change handed to listeners. Reentrant so a listener
  // may itself mutate the cart.
  delivered: ReentrantMutex<Cell<u64>>,
  listeners: RwLock<Vec<ChangeListener>>,
}

impl std::fmt::Debug for CartStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartStore")
      .field("key", &self.key)
      .field("listeners", &self.listeners.read().len())
      .finish()
  }
}

impl CartStore {
  /// Creates a store keeping its record under the default `"cart"` key.
  pub fn new(storage: impl KeyValueStore + 'static) -> Self {
    Self::from_parts(Arc::new(storage), DEFAULT_STORAGE_KEY.to_string())
  }

  /// Creates a store keeping its record under `key`.
  pub fn with_key(storage: impl KeyValueStore + 'static, key: impl Into<String>) -> CartResult<Self> {
    let key = key.into();
    if key.trim().is_empty() {
      return Err(CartError::invalid_input("storage key must not be empty"));
    }
    Ok(Self::from_parts(Arc::new(storage), key))
  }

  /// Builds a store from configuration: file-backed when `data_dir` is set,
  /// in-memory otherwise.
  pub fn from_config(config: &CartConfig) -> CartResult<Self> {
    match &config.data_dir {
      Some(dir) => {
        FileStore::validate_key(&config.storage_key).map_err(|e| CartError::Configuration {
          message: e.to_string(),
        })?;
        let store = FileStore::open(dir).map_err(|source| CartError::StorageUnavailable {
          operation: StorageOp::Write,
          key: config.storage_key.clone(),
          source,
        })?;
        Self::with_key(store, config.storage_key.clone())
      }
      None => Self::with_key(MemoryStore::new(), config.storage_key.clone()),
    }
  }

  fn from_parts(storage: Arc<dyn KeyValueStore>, key: String) -> Self {
    Self {
      storage,
      key,
      mutation_lock: Mutex::new(0),
      delivered: ReentrantMutex::new(Cell::new(0)),
      listeners: RwLock::new(Vec::new()),
    }
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  /// Registers a listener called after each `add_item`, `remove_item`, `clear` and
  /// `replace`, typically to refresh a quantity badge. Changes arrive in mutation
  /// order; one overtaken by a newer change is skipped.
  pub fn on_change(&self, listener: impl Fn(&CartChange) + Send + Sync + 'static) {
    self.listeners.write().push(Arc::new(listener));
  }

  // --- Mutations ---

  /// Adds `delta` (which may be negative) to the quantity of `product_id`.
  ///
  /// - Absent product, positive delta: appended with `quantity = delta`.
  /// - Absent product, non-positive delta: nothing to decrement, no-op.
  /// - Resulting quantity `<= 0`: the item is removed.
  #[instrument(name = "CartStore::add_item", skip(self), err(Display))]
  pub fn add_item(&self, product_id: &str, delta: i64) -> CartResult<()> {
    if product_id.trim().is_empty() {
      return Err(CartError::invalid_input("product id must not be empty"));
    }
    if delta == 0 {
      return Err(CartError::invalid_input("quantity delta must not be zero"));
    }

    let change = {
      let mut sequence = self.mutation_lock.lock();
      let mut items = self.load()?;

      match items.iter().position(|item| item.product_id == product_id) {
        None if delta <= 0 => {
          event!(Level::DEBUG, "Product not in cart; nothing to decrement.");
        }
        None => {
          let quantity = checked_quantity(product_id, delta)?;
          items.push(LineItem::new(product_id, quantity));
          self.persist(&items)?;
          event!(Level::DEBUG, quantity, "Line item appended.");
        }
        Some(index) => {
          let updated = i64::from(items[index].quantity).saturating_add(delta);
          if updated <= 0 {
            items.remove(index);
            event!(Level::DEBUG, "Quantity dropped to zero; line item removed.");
          } else {
            items[index].quantity = checked_quantity(product_id, updated)?;
            event!(Level::DEBUG, quantity = items[index].quantity, "Line item updated.");
          }
          self.persist(&items)?;
        }
      }
      *sequence += 1;
      CartChange::of(*sequence, &items)
    };

    self.notify(&change);
    Ok(())
  }

  /// Removes `product_id` from the cart. A missing cart or product is a silent no-op.
  #[instrument(name = "CartStore::remove_item", skip(self), err(Display))]
  pub fn remove_item(&self, product_id: &str) -> CartResult<()> {
    let change = {
      let mut sequence = self.mutation_lock.lock();
      let mut items = self.load()?;
      if let Some(index) = items.iter().position(|item| item.product_id == product_id) {
        items.remove(index);
        self.persist(&items)?;
        event!(Level::DEBUG, "Line item removed.");
      } else {
        event!(Level::DEBUG, "Product not in cart; nothing to remove.");
      }
      *sequence += 1;
      CartChange::of(*sequence, &items)
    };

    self.notify(&change);
    Ok(())
  }

  /// Erases the cart record entirely.
  #[instrument(name = "CartStore::clear", skip(self), err(Display))]
  pub fn clear(&self) -> CartResult<()> {
    let change = {
      let mut sequence = self.mutation_lock.lock();
      self
        .storage
        .remove(&self.key)
        .map_err(|source| self.storage_error(StorageOp::Remove, source))?;
      *sequence += 1;
      CartChange::of(*sequence, &[])
    };
    event!(Level::INFO, key = %self.key, "Cart cleared.");
    self.notify(&change);
    Ok(())
  }

  /// Replaces the whole cart with `items`, e.g. to seed a demo cart.
  /// The items must satisfy the cart invariants (positive quantities, unique ids).
  #[instrument(name = "CartStore::replace", skip_all, fields(count = items.len()), err(Display))]
  pub fn replace(&self, items: Vec<LineItem>) -> CartResult<()> {
    let encoded = encode_record(&items)?;
    decode_record(&self.key, &encoded).map_err(|err| CartError::invalid_input(err.to_string()))?;
    let change = {
      let mut sequence = self.mutation_lock.lock();
      self.persist(&items)?;
      *sequence += 1;
      CartChange::of(*sequence, &items)
    };
    event!(Level::INFO, "Cart contents replaced.");
    self.notify(&change);
    Ok(())
  }

  // --- Reads ---

  /// Line items in insertion order. Empty when there is no record or the record
  /// is malformed.
  pub fn items(&self) -> CartResult<Vec<LineItem>> {
    self.load()
  }

  /// Sum of quantities across the cart. Never consults product data.
  pub fn total_quantity(&self) -> CartResult<u64> {
    Ok(total_of(&self.load()?))
  }

  /// Quantity of a single product, 0 when absent.
  pub fn quantity_of(&self, product_id: &str) -> CartResult<u32> {
    Ok(
      self
        .load()?
        .iter()
        .find(|item| item.product_id == product_id)
        .map_or(0, |item| item.quantity),
    )
  }

  pub fn is_empty(&self) -> CartResult<bool> {
    Ok(self.load()?.is_empty())
  }

  // --- Summaries ---

  /// Joins every line item with its product, in cart order.
  ///
  /// Fails with `ProductLookupFailed` on the first product that cannot be resolved;
  /// a failed lookup is never counted as zero cost.
  #[instrument(name = "CartStore::compute_summary", skip_all, err(Display))]
  pub async fn compute_summary(&self, lookup: &dyn ProductLookup) -> CartResult<CartSummary> {
    let items = self.load()?;
    let summary = summary::summarize_strict(&items, lookup).await?;
    event!(Level::DEBUG, lines = summary.lines.len(), total = %summary.total, "Cart summary computed.");
    Ok(summary)
  }

  /// Like [`compute_summary`](Self::compute_summary), but keeps resolving past
  /// failures and honours the lookup mode and timeout in `options`.
  #[instrument(name = "CartStore::compute_summary_with", skip_all, fields(mode = ?options.mode), err(Display))]
  pub async fn compute_summary_with(
    &self,
    lookup: &dyn ProductLookup,
    options: &SummaryOptions,
  ) -> CartResult<PartialSummary> {
    let items = self.load()?;
    Ok(summary::summarize_collecting(&items, lookup, options).await)
  }

  // --- Record access ---

  fn load(&self) -> CartResult<Vec<LineItem>> {
    let raw = self
      .storage
      .get(&self.key)
      .map_err(|source| self.storage_error(StorageOp::Read, source))?;

    let Some(raw) = raw else {
      return Ok(Vec::new());
    };
    match decode_record(&self.key, &raw) {
      Ok(items) => Ok(items),
      Err(err) => {
        event!(Level::WARN, error = %err, "Treating malformed cart record as an empty cart.");
        Ok(Vec::new())
      }
    }
  }

  fn persist(&self, items: &[LineItem]) -> CartResult<()> {
    let encoded = encode_record(items)?;
    self
      .storage
      .set(&self.key, &encoded)
      .map_err(|source| self.storage_error(StorageOp::Write, source))
  }

  fn storage_error(&self, operation: StorageOp, source: anyhow::Error) -> CartError {
    event!(Level::ERROR, key = %self.key, %operation, error = %source, "Cart storage failure.");
    CartError::StorageUnavailable {
      operation,
      key: self.key.clone(),
      source,
    }
  }

  // Runs outside the mutation lock. Deliveries are serialized and a change
  // older than one already delivered is dropped, so the last badge a listener
  // sees always belongs to the latest mutation.
  fn notify(&self, change: &CartChange) {
    let delivered = self.delivered.lock();
    if change.sequence <= delivered.get() {
      event!(
        Level::DEBUG,
        sequence = change.sequence,
        delivered = delivered.get(),
        "Dropping superseded cart change."
      );
      return;
    }
    delivered.set(change.sequence);

    let listeners: Vec<ChangeListener> = self.listeners.read().clone();
    for listener in listeners {
      listener(change);
    }
  }
}

fn total_of(items: &[LineItem]) -> u64 {
  items.iter().map(|item| u64::from(item.quantity)).sum()
}

fn checked_quantity(product_id: &str, quantity: i64) -> CartResult<u32> {
  u32::try_from(quantity).map_err(|_| CartError::QuantityOverflow {
    product_id: product_id.to_string(),
  })
}
