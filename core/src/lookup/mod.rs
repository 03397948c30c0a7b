// cart_store/src/lookup/mod.rs

//! Defines the `ProductLookup` trait and its implementations for resolving a
//! product identifier into live [`Product`] data.

pub mod catalog;
pub mod functional;
pub mod timeout;

pub use catalog::StaticCatalog;
pub use functional::FunctionalLookup;
pub use timeout::TimeoutLookup;

use crate::model::Product;
use async_trait::async_trait;
use std::sync::Arc;

/// Asynchronous capability that resolves a product identifier to its product data.
///
/// Implementations either return a fully populated [`Product`] or an error; they must
/// never hand back placeholder data for an unknown id. The error is `anyhow::Error`
/// so backends can attach whatever context they have; the cart store wraps it into
/// `CartError::ProductLookupFailed` together with the product id.
#[async_trait]
pub trait ProductLookup: Send + Sync {
  async fn get_product(&self, product_id: &str) -> anyhow::Result<Product>;
}

#[async_trait]
impl<T: ProductLookup + ?Sized> ProductLookup for Arc<T> {
  async fn get_product(&self, product_id: &str) -> anyhow::Result<Product> {
    (**self).get_product(product_id).await
  }
}
