// demos/storefront_app/src/services/catalog_mock.rs

use async_trait::async_trait;
use cart_store::{Product, ProductLookup, StaticCatalog};
use rust_decimal::Decimal;
use tracing::info;

/// Stand-in for the product backend. Serves a fixed jewellery catalog with a bit
/// of simulated latency.
pub struct MockCatalog {
  products: StaticCatalog,
}

impl MockCatalog {
  pub fn new() -> Self {
    let description = "This is the product description.";
    Self {
      products: StaticCatalog::new([
        Product::new("1234", "Silver ring", Decimal::new(999, 2))
          .with_description(description)
          .with_preview("/static/assets/images/ring.png"),
        Product::new("5678", "Gold chain", Decimal::new(12050, 2))
          .with_description(description)
          .with_preview("/static/assets/images/chain.png"),
        Product::new("9012", "Pearl earrings", Decimal::new(4500, 2)).with_description(description),
        Product::new("3456", "Charm bracelet", Decimal::new(3275, 2)).with_description(description),
      ]),
    }
  }
}

impl Default for MockCatalog {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl ProductLookup for MockCatalog {
  async fn get_product(&self, product_id: &str) -> anyhow::Result<Product> {
    info!("Simulating product fetch for {}", product_id);
    tokio::time::sleep(std::time::Duration::from_millis(20)).await; // Simulate network latency

    // Simulate potential failure
    if product_id.to_lowercase().contains("fail_test") {
      tracing::warn!("Simulated product backend failure for {}", product_id);
      anyhow::bail!("HTTP error 500 while fetching product {}", product_id);
    }

    self.products.get_product(product_id).await
  }
}
