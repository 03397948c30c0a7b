// cart_store/src/render.rs

//! Last-write-wins gating for asynchronously computed views.
//!
//! Every render is tagged with a [`Generation`] taken from a monotonically
//! increasing counter. A result may only replace the published one if its
//! generation is newer, so a slow, superseded summary can never overwrite a
//! fresher one.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{event, Level};

/// Tag identifying one render request. Later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
  pub fn value(self) -> u64 {
    self.0
  }
}

#[derive(Debug)]
pub struct RenderGate<T> {
  issued: AtomicU64,
  published: Mutex<Option<(Generation, T)>>,
}

impl<T: Clone> RenderGate<T> {
  pub fn new() -> Self {
    Self {
      issued: AtomicU64::new(0),
      published: Mutex::new(None),
    }
  }

  /// Starts a new render and returns its generation.
  pub fn begin(&self) -> Generation {
    Generation(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
  }

  /// Whether no newer render has been started since `generation`.
  /// Lets a caller skip work whose result would be discarded anyway.
  pub fn is_current(&self, generation: Generation) -> bool {
    self.issued.load(Ordering::SeqCst) == generation.0
  }

  /// Publishes `value` for `generation`. Returns `false` (dropping the value)
  /// when an equal or newer generation has already been published.
  pub fn publish(&self, generation: Generation, value: T) -> bool {
    let mut slot = self.published.lock();
    if let Some((published_gen, _)) = slot.as_ref() {
      if *published_gen >= generation {
        event!(
          Level::WARN,
          stale_generation = generation.0,
          published_generation = published_gen.0,
          "Discarding stale render result."
        );
        return false;
      }
    }
    *slot = Some((generation, value));
    true
  }

  /// The most recently published value, if any.
  pub fn latest(&self) -> Option<T> {
    self.published.lock().as_ref().map(|(_, value)| value.clone())
  }

  pub fn latest_generation(&self) -> Option<Generation> {
    self.published.lock().as_ref().map(|(generation, _)| *generation)
  }
}

impl<T: Clone> Default for RenderGate<T> {
  fn default() -> Self {
    Self::new()
  }
}
