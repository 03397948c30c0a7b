// examples/basic_cart.rs

use cart_store::{CartCommand, CartStore, MemoryStore, Product, RenderGate, StaticCatalog};
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

  // 1. Persistence and product data
  let store = CartStore::new(MemoryStore::new());
  let catalog = StaticCatalog::new([
    Product::new("1234", "Silver ring", dec!(9.99)),
    Product::new("5678", "Gold chain", dec!(120.50)),
  ]);

  // 2. Badge refresh on every change
  store.on_change(|change| tracing::info!(badge = change.total_quantity, "Cart badge refreshed."));

  // 3. UI actions arrive as (action, id) pairs
  for (action, id) in [("increase", "1234"), ("increase", "1234"), ("increase", "5678"), ("decrease", "5678")] {
    store.apply(&CartCommand::from_action(action, id)?)?;
  }
  store.add_item("5678", 1)?;

  // 4. Render, keeping only the newest summary
  let gate = RenderGate::new();
  let generation = gate.begin();
  let summary = store.compute_summary(&catalog).await?;
  gate.publish(generation, summary);

  if let Some(summary) = gate.latest() {
    for line in &summary.lines {
      tracing::info!(
        "{}x {} ({}) = {}",
        line.quantity,
        line.name,
        cart_store::format_amount(line.unit_price, "€"),
        cart_store::format_amount(line.line_cost, "€")
      );
    }
    tracing::info!("Total: {}", summary.display_total("€"));
  }

  store.apply(&CartCommand::Clear)?;
  Ok(())
}
