// cart_store/src/lookup/functional.rs

use super::ProductLookup;
use crate::model::Product;
use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;

/// Resolves products by invoking a user-supplied asynchronous function.
///
/// The function receives an owned copy of the product id and returns a `Future`
/// resolving to `anyhow::Result<Product>`. Useful for adapting an HTTP client or
/// any other backend without writing a dedicated type.
pub struct FunctionalLookup<F, Fut>
where
  F: Fn(String) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = anyhow::Result<Product>> + Send + 'static,
{
  lookup_fn: F,
  _phantom_fut: PhantomData<fn() -> Fut>,
}

impl<F, Fut> FunctionalLookup<F, Fut>
where
  F: Fn(String) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = anyhow::Result<Product>> + Send + 'static,
{
  pub fn new(lookup_fn: F) -> Self {
    Self {
      lookup_fn,
      _phantom_fut: PhantomData,
    }
  }
}

#[async_trait]
impl<F, Fut> ProductLookup for FunctionalLookup<F, Fut>
where
  F: Fn(String) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = anyhow::Result<Product>> + Send + 'static,
{
  async fn get_product(&self, product_id: &str) -> anyhow::Result<Product> {
    (self.lookup_fn)(product_id.to_string()).await
  }
}
