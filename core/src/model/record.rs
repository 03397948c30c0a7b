// cart_store/src/model/record.rs

//! Codec for the persisted cart record: a JSON array of `{"id", "quantity"}` objects.

use crate::error::{CartError, CartResult};
use crate::model::line_item::LineItem;
use std::collections::HashSet;

/// Decodes a raw persisted value into line items.
///
/// A JSON `null` decodes to an empty cart, same as an absent key. Anything that
/// does not parse, or that parses but breaks the cart invariants (zero quantity,
/// blank or duplicate ids), is reported as `MalformedRecord`.
pub fn decode_record(key: &str, raw: &str) -> CartResult<Vec<LineItem>> {
  let malformed = |reason: String| CartError::MalformedRecord {
    key: key.to_string(),
    reason,
  };

  let items: Option<Vec<LineItem>> = serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;
  let items = items.unwrap_or_default();

  let mut seen = HashSet::with_capacity(items.len());
  for item in &items {
    if item.product_id.trim().is_empty() {
      return Err(malformed("line item with blank product id".to_string()));
    }
    if item.quantity == 0 {
      return Err(malformed(format!("product '{}' stored with quantity 0", item.product_id)));
    }
    if !seen.insert(item.product_id.as_str()) {
      return Err(malformed(format!("product '{}' appears more than once", item.product_id)));
    }
  }
  Ok(items)
}

/// Encodes line items into the canonical persisted form.
pub fn encode_record(items: &[LineItem]) -> CartResult<String> {
  serde_json::to_string(items).map_err(|e| CartError::Internal(format!("Failed to encode cart record: {}", e)))
}
