// tests/summary_tests.rs
mod common;

use async_trait::async_trait;
use cart_store::{
  format_amount, CartError, Decimal, CartStore, FunctionalLookup, LookupMode, MemoryStore, Product, ProductLookup, RenderGate,
  StaticCatalog, SummaryOptions, TimeoutLookup,
};
use common::*;
use rust_decimal_macros::dec;
use serial_test::serial;
use std::time::Duration;

fn cart_with(items: &[(&str, i64)]) -> CartStore {
  let store = CartStore::new(MemoryStore::new());
  for (id, qty) in items {
    store.add_item(id, *qty).unwrap();
  }
  store
}

#[tokio::test]
#[serial]
async fn test_summary_multiplies_quantity_by_unit_price() {
  setup_tracing();
  let store = cart_with(&[("P1", 2)]);

  let summary = store.compute_summary(&test_catalog()).await.unwrap();

  assert_eq!(summary.total, dec!(19.98));
  assert_eq!(summary.lines.len(), 1);
  assert_eq!(summary.lines[0].line_cost, dec!(19.98));
  assert_eq!(summary.lines[0].unit_price, dec!(9.99));
  assert_eq!(summary.lines[0].name, "Silver ring");
  assert_eq!(summary.lines[0].description.as_deref(), Some("A plain silver ring."));
  assert_eq!(summary.display_total("€"), "19.98€");
}

#[tokio::test]
#[serial]
async fn test_summary_lines_follow_cart_order() {
  setup_tracing();
  let store = cart_with(&[("P2", 1), ("P1", 3), ("FREE", 1)]);

  let summary = store.compute_summary(&test_catalog()).await.unwrap();

  let ids: Vec<&str> = summary.lines.iter().map(|l| l.product_id.as_str()).collect();
  assert_eq!(ids, vec!["P2", "P1", "FREE"]);
  assert_eq!(summary.total, dec!(120.50) + dec!(29.97));
  assert_eq!(summary.total_quantity(), 5);
  assert_eq!(summary.lines[0].preview.as_deref(), Some("/assets/images/chain.png"));
}

#[tokio::test]
#[serial]
async fn test_empty_cart_summary_is_zero_and_does_no_lookups() {
  setup_tracing();
  let store = cart_with(&[]);
  let lookup = CountingLookup::new(test_catalog());

  let summary = store.compute_summary(&lookup).await.unwrap();

  assert!(summary.is_empty());
  assert_eq!(summary.total, dec!(0));
  assert_eq!(lookup.call_count(), 0);
}

#[tokio::test]
#[serial]
async fn test_total_accumulates_unrounded_line_costs() {
  setup_tracing();
  // 0.335 rounds to 0.34 per unit for display, but three of them cost exactly 1.005.
  let store = cart_with(&[("P3", 3)]);

  let summary = store.compute_summary(&test_catalog()).await.unwrap();

  assert_eq!(summary.total, dec!(1.005));
  assert_eq!(format_amount(summary.total, "€"), "1.01€");
  assert_eq!(format_amount(summary.lines[0].unit_price, "€"), "0.34€");
}

#[tokio::test]
#[serial]
async fn test_badge_count_never_consults_lookup() {
  setup_tracing();
  let store = cart_with(&[("P1", 2), ("P2", 5)]);
  let lookup = CountingLookup::new(test_catalog());

  assert_eq!(store.total_quantity().unwrap(), 7);
  assert_eq!(lookup.call_count(), 0);
}

#[tokio::test]
#[serial]
async fn test_unknown_product_fails_the_summary() {
  setup_tracing();
  let store = cart_with(&[("P1", 1), ("MISSING", 2)]);

  let err = store.compute_summary(&test_catalog()).await.unwrap_err();

  match err {
    CartError::ProductLookupFailed { product_id, source } => {
      assert_eq!(product_id, "MISSING");
      assert!(source.to_string().contains("not found"));
    }
    other => panic!("Expected ProductLookupFailed, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn test_partial_summary_collects_every_failure() {
  setup_tracing();
  let store = cart_with(&[("P1", 2), ("P2", 1), ("P3", 1)]);
  let lookup = CountingLookup::new(test_catalog()).failing_for("P2").failing_for("P3");

  let partial = store
    .compute_summary_with(&lookup, &SummaryOptions::default())
    .await
    .unwrap();

  assert!(!partial.is_complete());
  assert_eq!(partial.lines.len(), 1);
  assert_eq!(partial.resolved_total(), dec!(19.98));
  assert_eq!(partial.failed_product_ids(), vec!["P2", "P3"]);
  assert_eq!(lookup.call_count(), 3);

  let err = partial.into_complete().unwrap_err();
  assert_eq!(err.product_id(), Some("P2"));
}

#[tokio::test]
#[serial]
async fn test_complete_partial_summary_converts() {
  setup_tracing();
  let store = cart_with(&[("P1", 2), ("P2", 1)]);

  let partial = store
    .compute_summary_with(&test_catalog(), &SummaryOptions::default())
    .await
    .unwrap();
  assert!(partial.is_complete());

  let summary = partial.into_complete().unwrap();
  assert_eq!(summary.total, dec!(140.48));
}

#[tokio::test]
#[serial]
async fn test_parallel_lookups_keep_cart_order_and_run_concurrently() {
  setup_tracing();
  let store = cart_with(&[("P1", 1), ("P2", 1), ("P3", 2), ("FREE", 1)]);
  let lookup = CountingLookup::new(test_catalog()).with_delay(Duration::from_millis(50));

  let started = std::time::Instant::now();
  let partial = store
    .compute_summary_with(&lookup, &SummaryOptions::parallel())
    .await
    .unwrap();
  let elapsed = started.elapsed();

  let ids: Vec<&str> = partial.lines.iter().map(|l| l.product_id.as_str()).collect();
  assert_eq!(ids, vec!["P1", "P2", "P3", "FREE"]);
  assert_eq!(lookup.call_count(), 4);
  assert!(
    elapsed < Duration::from_millis(180),
    "parallel lookups took {:?}, expected well under 4 × 50ms",
    elapsed
  );
}

#[tokio::test]
#[serial]
async fn test_timeout_turns_hanging_lookup_into_failure() {
  setup_tracing();
  let store = cart_with(&[("P1", 1)]);
  let lookup = CountingLookup::new(test_catalog()).with_delay(Duration::from_secs(5));
  let options = SummaryOptions {
    mode: LookupMode::Sequential,
    timeout: Some(Duration::from_millis(20)),
  };

  let partial = store.compute_summary_with(&lookup, &options).await.unwrap();

  assert!(partial.lines.is_empty());
  assert_eq!(partial.failed_product_ids(), vec!["P1"]);
  assert!(partial.failures[0].to_string().contains("P1"));
}

#[tokio::test]
#[serial]
async fn test_timeout_lookup_wrapper() {
  setup_tracing();
  let slow = CountingLookup::new(test_catalog()).with_delay(Duration::from_secs(5));
  let wrapped = TimeoutLookup::new(slow, Duration::from_millis(20));
  assert!(wrapped.get_product("P1").await.is_err());

  let fast = TimeoutLookup::new(test_catalog(), Duration::from_secs(1));
  assert_eq!(fast.get_product("P1").await.unwrap().price, dec!(9.99));
}

#[tokio::test]
#[serial]
async fn test_negative_price_is_rejected_as_garbage() {
  setup_tracing();
  let store = cart_with(&[("BAD", 1)]);
  let catalog = StaticCatalog::new([Product::new("BAD", "Broken", dec!(-1.00))]);

  let err = store.compute_summary(&catalog).await.unwrap_err();
  assert!(matches!(err, CartError::ProductLookupFailed { ref product_id, .. } if product_id == "BAD"));
}

struct WrongIdLookup;

#[async_trait]
impl ProductLookup for WrongIdLookup {
  async fn get_product(&self, _product_id: &str) -> anyhow::Result<Product> {
    Ok(Product::new("SOMETHING-ELSE", "Mixup", dec!(1)))
  }
}

#[tokio::test]
#[serial]
async fn test_lookup_returning_another_product_is_rejected() {
  setup_tracing();
  let store = cart_with(&[("P1", 1)]);

  let err = store.compute_summary(&WrongIdLookup).await.unwrap_err();
  assert!(matches!(err, CartError::ProductLookupFailed { .. }));
}

#[tokio::test]
#[serial]
async fn test_functional_lookup_adapts_async_closure() {
  setup_tracing();
  let store = cart_with(&[("X", 4)]);
  let lookup = FunctionalLookup::new(|id: String| async move {
    Ok::<_, anyhow::Error>(Product::new(id, "Generated", dec!(2.50)))
  });

  let summary = store.compute_summary(&lookup).await.unwrap();
  assert_eq!(summary.total, dec!(10.00));
}

#[tokio::test]
#[serial]
async fn test_render_gate_discards_stale_summaries() {
  setup_tracing();
  let store = cart_with(&[("P1", 1)]);
  let gate = RenderGate::new();

  let older = gate.begin();
  let older_summary = store.compute_summary(&test_catalog()).await.unwrap();

  store.add_item("P1", 1).unwrap();
  let newer = gate.begin();
  assert!(!gate.is_current(older));
  assert!(gate.is_current(newer));
  let newer_summary = store.compute_summary(&test_catalog()).await.unwrap();

  // The newer render finishes first; the slow, older one must not overwrite it.
  assert!(gate.publish(newer, newer_summary));
  assert!(!gate.publish(older, older_summary));

  assert_eq!(gate.latest().unwrap().total, dec!(19.98));
  assert_eq!(gate.latest_generation(), Some(newer));
  assert!(newer > older);
}

#[test]
#[serial]
fn test_render_gate_accepts_in_order_publishes() {
  setup_tracing();
  let gate: RenderGate<u32> = RenderGate::new();
  assert_eq!(gate.latest(), None);

  let first = gate.begin();
  assert!(gate.publish(first, 1));
  let second = gate.begin();
  assert!(gate.publish(second, 2));
  assert!(!gate.publish(second, 3), "same generation cannot publish twice");

  assert_eq!(gate.latest(), Some(2));
  assert_eq!(second.value(), first.value() + 1);
}

#[tokio::test]
#[serial]
async fn test_line_cost_overflow_names_the_product() {
  setup_tracing();
  let store = cart_with(&[("P1", 1), ("HUGE", 2)]);
  let catalog = StaticCatalog::new([
    Product::new("P1", "Silver ring", dec!(9.99)),
    Product::new("HUGE", "Priceless", Decimal::MAX),
  ]);

  let partial = store
    .compute_summary_with(&catalog, &SummaryOptions::default())
    .await
    .unwrap();

  assert!(!partial.is_complete());
  assert_eq!(partial.failed_product_ids(), vec!["HUGE"]);
  assert!(matches!(
    partial.failures[0],
    CartError::LineCostOverflow { ref product_id } if product_id == "HUGE"
  ));
  assert_eq!(partial.resolved_total(), dec!(9.99));
}
