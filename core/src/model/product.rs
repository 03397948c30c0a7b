// cart_store/src/model/product.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product data as resolved by a [`ProductLookup`](crate::ProductLookup).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub description: Option<String>, // Description can be optional
  pub price: Decimal,
  #[serde(default)]
  pub preview: Option<String>, // URL of the preview image, if any
}

impl Product {
  pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      description: None,
      price,
      preview: None,
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
    self.preview = Some(preview.into());
    self
  }
}
