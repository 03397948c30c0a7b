// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use cart_store::{KeyValueStore, MemoryStore, Product, ProductLookup, StaticCatalog};
use rust_decimal_macros::dec;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// --- Common Catalog ---
pub fn test_catalog() -> StaticCatalog {
  StaticCatalog::new([
    Product::new("P1", "Silver ring", dec!(9.99)).with_description("A plain silver ring."),
    Product::new("P2", "Gold chain", dec!(120.50)).with_preview("/assets/images/chain.png"),
    Product::new("P3", "Pearl earrings", dec!(0.335)),
    Product::new("FREE", "Gift wrap", dec!(0)),
  ])
}

// --- Storage that can be switched into failure modes ---
#[derive(Debug, Clone, Default)]
pub struct FailingStore {
  pub inner: MemoryStore,
  pub fail_reads: Arc<AtomicBool>,
  pub fail_writes: Arc<AtomicBool>,
  pub fail_removes: Arc<AtomicBool>,
}

impl FailingStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn fail_reads(&self, on: bool) {
    self.fail_reads.store(on, Ordering::SeqCst);
  }

  pub fn fail_writes(&self, on: bool) {
    self.fail_writes.store(on, Ordering::SeqCst);
  }

  pub fn fail_removes(&self, on: bool) {
    self.fail_removes.store(on, Ordering::SeqCst);
  }
}

impl KeyValueStore for FailingStore {
  fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
    if self.fail_reads.load(Ordering::SeqCst) {
      bail!("storage disabled");
    }
    self.inner.get(key)
  }

  fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
    if self.fail_writes.load(Ordering::SeqCst) {
      bail!("quota exceeded");
    }
    self.inner.set(key, value)
  }

  fn remove(&self, key: &str) -> anyhow::Result<()> {
    if self.fail_removes.load(Ordering::SeqCst) {
      bail!("storage disabled");
    }
    self.inner.remove(key)
  }
}

// --- Lookup that counts calls, can be slowed down and can fail for chosen ids ---
#[derive(Clone)]
pub struct CountingLookup {
  pub catalog: StaticCatalog,
  pub calls: Arc<AtomicUsize>,
  pub delay: Option<Duration>,
  pub failing_ids: HashSet<String>,
}

impl CountingLookup {
  pub fn new(catalog: StaticCatalog) -> Self {
    Self {
      catalog,
      calls: Arc::new(AtomicUsize::new(0)),
      delay: None,
      failing_ids: HashSet::new(),
    }
  }

  pub fn with_delay(mut self, delay: Duration) -> Self {
    self.delay = Some(delay);
    self
  }

  pub fn failing_for(mut self, product_id: &str) -> Self {
    self.failing_ids.insert(product_id.to_string());
    self
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ProductLookup for CountingLookup {
  async fn get_product(&self, product_id: &str) -> anyhow::Result<Product> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if let Some(delay) = self.delay {
      tokio::time::sleep(delay).await;
    }
    if self.failing_ids.contains(product_id) {
      return Err(anyhow!("HTTP error 500 while fetching product {}", product_id));
    }
    self.catalog.get_product(product_id).await
  }
}

// --- Deterministic pseudo-random sequence for property-style tests ---
pub struct Lcg(u64);

impl Lcg {
  pub fn new(seed: u64) -> Self {
    Lcg(seed)
  }

  pub fn next_u64(&mut self) -> u64 {
    self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    self.0 >> 33
  }

  /// Uniform-ish value in `[low, high]`.
  pub fn range(&mut self, low: i64, high: i64) -> i64 {
    let span = (high - low + 1) as u64;
    low + (self.next_u64() % span) as i64
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
