// cart_store/src/lookup/timeout.rs

use super::ProductLookup;
use crate::model::Product;
use anyhow::anyhow;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::{event, Level};

/// Wraps another lookup so that a hanging backend fails instead of stalling a render.
///
/// Must be driven from inside a Tokio runtime with the time driver enabled.
#[derive(Debug, Clone)]
pub struct TimeoutLookup<L> {
  inner: L,
  limit: Duration,
}

impl<L: ProductLookup> TimeoutLookup<L> {
  pub fn new(inner: L, limit: Duration) -> Self {
    Self { inner, limit }
  }

  pub fn limit(&self) -> Duration {
    self.limit
  }

  pub fn into_inner(self) -> L {
    self.inner
  }
}

#[async_trait]
impl<L: ProductLookup> ProductLookup for TimeoutLookup<L> {
  async fn get_product(&self, product_id: &str) -> anyhow::Result<Product> {
    within_limit(product_id, self.limit, self.inner.get_product(product_id)).await
  }
}

/// Awaits a lookup future, turning an elapsed `limit` into an error.
pub(crate) async fn within_limit<F>(product_id: &str, limit: Duration, lookup: F) -> anyhow::Result<Product>
where
  F: Future<Output = anyhow::Result<Product>>,
{
  match tokio::time::timeout(limit, lookup).await {
    Ok(result) => result,
    Err(_) => {
      event!(
        Level::WARN,
        product_id,
        limit_ms = limit.as_millis() as u64,
        "Product lookup timed out."
      );
      Err(anyhow!("lookup timed out after {:?}", limit))
    }
  }
}
