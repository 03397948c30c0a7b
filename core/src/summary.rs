// cart_store/src/summary.rs

//! The derived, never-persisted view of the cart: every line item joined with its
//! live product data, per-line costs and the cart-wide total.

use crate::error::{CartError, CartResult};
use crate::lookup::timeout::within_limit;
use crate::lookup::ProductLookup;
use crate::model::{LineItem, Product};
use crate::money;
use futures_util::future::join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;
use tracing::{event, Level};

/// One resolved row of the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
  pub product_id: String,
  pub name: String,
  pub description: Option<String>,
  pub preview: Option<String>,
  pub quantity: u32,
  pub unit_price: Decimal,
  /// `quantity × unit_price`, unrounded.
  pub line_cost: Decimal,
}

/// A fully resolved summary. Only ever built when every line item resolved.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CartSummary {
  pub lines: Vec<SummaryLine>,
  /// Sum of the unrounded line costs.
  pub total: Decimal,
}

impl CartSummary {
  pub(crate) fn from_lines(lines: Vec<SummaryLine>) -> CartResult<Self> {
    let total = sum_costs(&lines)?;
    Ok(Self { lines, total })
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  pub fn total_quantity(&self) -> u64 {
    self.lines.iter().map(|line| u64::from(line.quantity)).sum()
  }

  /// The total formatted for display, e.g. `19.98€`.
  pub fn display_total(&self, currency_symbol: &str) -> String {
    money::format_amount(self.total, currency_symbol)
  }
}

/// Summary that keeps going past lookup failures.
///
/// `lines` holds the rows that resolved, in cart order; `failures` holds one
/// `ProductLookupFailed` per row that did not. The caller decides whether to show
/// the partial result with an error indicator or give up.
#[derive(Debug, Default)]
pub struct PartialSummary {
  pub lines: Vec<SummaryLine>,
  pub failures: Vec<CartError>,
}

impl PartialSummary {
  pub fn is_complete(&self) -> bool {
    self.failures.is_empty()
  }

  /// Total over the resolved rows only. Not trustworthy unless `is_complete()`.
  pub fn resolved_total(&self) -> Decimal {
    self.lines.iter().map(|line| line.line_cost).sum()
  }

  /// Ids of the products whose lookup failed.
  pub fn failed_product_ids(&self) -> Vec<&str> {
    self.failures.iter().filter_map(CartError::product_id).collect()
  }

  /// Converts into a complete summary, or returns the first failure.
  pub fn into_complete(self) -> CartResult<CartSummary> {
    if let Some(first) = self.failures.into_iter().next() {
      return Err(first);
    }
    CartSummary::from_lines(self.lines)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupMode {
  /// Resolve line items one after another, in cart order.
  #[default]
  Sequential,
  /// Resolve all line items concurrently. Output order is still cart order.
  Parallel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryOptions {
  pub mode: LookupMode,
  /// Per-lookup limit. An elapsed limit counts as a lookup failure.
  pub timeout: Option<Duration>,
}

impl SummaryOptions {
  pub fn parallel() -> Self {
    Self {
      mode: LookupMode::Parallel,
      timeout: None,
    }
  }

  pub fn with_timeout(mut self, limit: Duration) -> Self {
    self.timeout = Some(limit);
    self
  }
}

/// Resolves every item in cart order, stopping at the first failure.
pub(crate) async fn summarize_strict(items: &[LineItem], lookup: &dyn ProductLookup) -> CartResult<CartSummary> {
  let mut lines = Vec::with_capacity(items.len());
  for item in items {
    lines.push(resolve_line(lookup, item, None).await?);
  }
  CartSummary::from_lines(lines)
}

/// Resolves every item, collecting failures instead of stopping.
pub(crate) async fn summarize_collecting(
  items: &[LineItem],
  lookup: &dyn ProductLookup,
  options: &SummaryOptions,
) -> PartialSummary {
  let results: Vec<CartResult<SummaryLine>> = match options.mode {
    LookupMode::Sequential => {
      let mut results = Vec::with_capacity(items.len());
      for item in items {
        results.push(resolve_line(lookup, item, options.timeout).await);
      }
      results
    }
    LookupMode::Parallel => join_all(items.iter().map(|item| resolve_line(lookup, item, options.timeout))).await,
  };

  let mut summary = PartialSummary::default();
  for result in results {
    match result {
      Ok(line) => summary.lines.push(line),
      Err(err) => summary.failures.push(err),
    }
  }
  if !summary.is_complete() {
    event!(
      Level::WARN,
      failed = summary.failures.len(),
      resolved = summary.lines.len(),
      "Cart summary is incomplete."
    );
  }
  summary
}

async fn resolve_line(
  lookup: &dyn ProductLookup,
  item: &LineItem,
  timeout: Option<Duration>,
) -> CartResult<SummaryLine> {
  let fetched = match timeout {
    Some(limit) => within_limit(&item.product_id, limit, lookup.get_product(&item.product_id)).await,
    None => lookup.get_product(&item.product_id).await,
  };

  let failed = |source: anyhow::Error| CartError::ProductLookupFailed {
    product_id: item.product_id.clone(),
    source,
  };

  let product = fetched.map_err(failed)?;
  validate_product(item, &product).map_err(failed)?;

  let line_cost = Decimal::from(item.quantity)
    .checked_mul(product.price)
    .ok_or_else(|| CartError::LineCostOverflow {
      product_id: item.product_id.clone(),
    })?;

  event!(Level::TRACE, product_id = %item.product_id, %line_cost, "Line item resolved.");

  Ok(SummaryLine {
    product_id: item.product_id.clone(),
    name: product.name,
    description: product.description,
    preview: product.preview,
    quantity: item.quantity,
    unit_price: product.price,
    line_cost,
  })
}

fn validate_product(item: &LineItem, product: &Product) -> anyhow::Result<()> {
  if product.id != item.product_id {
    anyhow::bail!(
      "lookup returned product '{}' for requested id '{}'",
      product.id,
      item.product_id
    );
  }
  if product.price < Decimal::ZERO {
    anyhow::bail!("negative unit price {}", product.price);
  }
  Ok(())
}

fn sum_costs(lines: &[SummaryLine]) -> CartResult<Decimal> {
  lines.iter().try_fold(Decimal::ZERO, |acc, line| {
    acc
      .checked_add(line.line_cost)
      .ok_or_else(|| CartError::Internal("cart total overflow".to_string()))
  })
}
