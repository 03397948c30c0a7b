// cart_store/src/lookup/catalog.rs

use super::ProductLookup;
use crate::model::Product;
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::HashMap;

/// Resolves products from a fixed, in-memory set.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
  products: HashMap<String, Product>,
}

impl StaticCatalog {
  pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
    Self {
      products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
    }
  }

  /// Adds or replaces a product, keyed by its id.
  pub fn insert(&mut self, product: Product) -> Option<Product> {
    self.products.insert(product.id.clone(), product)
  }

  pub fn get(&self, product_id: &str) -> Option<&Product> {
    self.products.get(product_id)
  }

  pub fn len(&self) -> usize {
    self.products.len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.is_empty()
  }
}

#[async_trait]
impl ProductLookup for StaticCatalog {
  async fn get_product(&self, product_id: &str) -> anyhow::Result<Product> {
    self
      .products
      .get(product_id)
      .cloned()
      .ok_or_else(|| anyhow!("product '{}' not found in catalog", product_id))
  }
}
