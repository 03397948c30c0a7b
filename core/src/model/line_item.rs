// cart_store/src/model/line_item.rs

use serde::{Deserialize, Serialize};

/// One entry of the cart: a product identifier and how many of it are in the cart.
///
/// Persisted as `{"id": "...", "quantity": n}`. Records written by older storefront
/// drafts used `reference` instead of `id`; those are still accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItem {
  #[serde(rename = "id", alias = "reference")]
  pub product_id: String,
  pub quantity: u32,
}

impl LineItem {
  pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
    Self {
      product_id: product_id.into(),
      quantity,
    }
  }
}
