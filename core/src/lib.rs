// cart_store/src/lib.rs

//! cart_store: a persisted, client-local shopping cart for storefronts.
//!
//! The crate provides:
//!  - A `CartStore` that exclusively owns one record in a key-value store and
//!    exposes add/remove/clear mutations plus item and badge-count reads.
//!  - Pluggable persistence through the `KeyValueStore` trait (in-memory and
//!    directory-backed implementations included).
//!  - Asynchronous product resolution through the `ProductLookup` trait, used to
//!    compute priced summaries with exact decimal totals.
//!  - A typed `CartCommand` for dispatching UI actions.
//!  - `RenderGate`, which keeps stale summaries from overwriting fresher ones.

pub mod command;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod money;
pub mod render;
pub mod storage;
pub mod store;
pub mod summary;

// --- Re-exports for the Public API ---

pub use crate::command::CartCommand;
pub use crate::config::{CartConfig, DEFAULT_STORAGE_KEY};
pub use crate::error::{CartError, CartResult, StorageOp};
pub use crate::lookup::{FunctionalLookup, ProductLookup, StaticCatalog, TimeoutLookup};
pub use crate::model::{LineItem, Product};
pub use crate::money::{format_amount, DEFAULT_CURRENCY_SYMBOL};
pub use crate::render::{Generation, RenderGate};
pub use crate::storage::{FileStore, KeyValueStore, MemoryStore};
pub use crate::store::{CartChange, CartStore, ChangeListener};
pub use crate::summary::{CartSummary, LookupMode, PartialSummary, SummaryLine, SummaryOptions};

// Re-exported so callers can build prices without a direct dependency.
pub use rust_decimal::Decimal;

/*
    Typical flow:
    1. Pick a `KeyValueStore` (e.g. `FileStore::open(dir)?`) and build a `CartStore`,
       or call `CartStore::from_config(&CartConfig::from_env()?)`.
    2. Register a badge refresher with `store.on_change(|change| ...)`.
    3. Translate UI events into `CartCommand`s and `store.apply(&command)?` them.
    4. To render, take `gate.begin()`, `store.compute_summary(&lookup).await`, and
       `gate.publish(generation, summary)`; only the newest render is kept.
*/
