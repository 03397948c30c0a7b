// demos/storefront_app/src/models/cart_view.rs

use cart_store::{format_amount, PartialSummary, SummaryLine};
use serde::Serialize;

/// One product row of the cart table, already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRow {
  pub product_id: String,
  pub name: String,
  pub description: Option<String>,
  pub preview: Option<String>,
  pub quantity: String, // "2x"
  pub price: String,
  pub cost: String,
}

/// The cart page: product rows, the total row and the purchase button state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTableView {
  pub generation: u64,
  pub rows: Vec<CartRow>,
  pub total: String,
  /// `false` when some products could not be priced; `total` then covers only `rows`.
  pub complete: bool,
  pub unavailable: Vec<String>,
  pub item_count: u64,
  pub purchase_enabled: bool,
}

impl CartTableView {
  pub fn build(generation: u64, summary: &PartialSummary, item_count: u64, currency: &str) -> Self {
    let rows: Vec<CartRow> = summary.lines.iter().map(|line| row_for(line, currency)).collect();
    let unavailable: Vec<String> = summary.failed_product_ids().into_iter().map(str::to_string).collect();

    Self {
      generation,
      rows,
      total: format_amount(summary.resolved_total(), currency),
      complete: summary.is_complete(),
      unavailable,
      item_count,
      purchase_enabled: item_count > 0,
    }
  }
}

fn row_for(line: &SummaryLine, currency: &str) -> CartRow {
  CartRow {
    product_id: line.product_id.clone(),
    name: line.name.clone(),
    description: line.description.clone(),
    preview: line.preview.clone(),
    quantity: format!("{}x", line.quantity),
    price: format_amount(line.unit_price, currency),
    cost: format_amount(line.line_cost, currency),
  }
}
