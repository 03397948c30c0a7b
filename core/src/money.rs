// cart_store/src/money.rs

//! Display helpers for decimal currency amounts.
//!
//! Amounts are carried unrounded through every computation; rounding happens only
//! here, at the display edge.

use rust_decimal::{Decimal, RoundingStrategy};

/// The currency symbol storefront amounts are shown with unless configured otherwise.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";

/// Rounds an amount to cents, half away from zero.
pub fn round_for_display(amount: Decimal) -> Decimal {
  amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two fraction digits followed by the currency symbol,
/// e.g. `19.98€`.
pub fn format_amount(amount: Decimal, currency_symbol: &str) -> String {
  format!("{:.2}{}", round_for_display(amount), currency_symbol)
}
