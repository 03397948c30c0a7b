// demos/storefront_app/src/main.rs

mod config;
mod errors;
mod models;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::services::MockCatalog;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use cart_store::{CartStore, LineItem, RenderGate};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting storefront server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let cart = match CartStore::from_config(&app_config.cart) {
    Ok(store) => Arc::new(store),
    Err(e) => {
      tracing::error!(error = %e, "Failed to open cart storage.");
      return Err(std::io::Error::other(e.to_string()));
    }
  };

  cart.on_change(|change| {
    tracing::info!(
      badge = change.total_quantity,
      distinct_items = change.distinct_items,
      "Cart changed."
    );
  });

  if app_config.seed_cart {
    let seed = vec![LineItem::new("1234", 2), LineItem::new("5678", 1)];
    if let Err(e) = cart.replace(seed) {
      tracing::error!(error = %e, "Failed to seed the cart.");
    } else {
      tracing::info!("Demo cart seeded.");
    }
  }

  let app_state = AppState {
    cart,
    catalog: Arc::new(MockCatalog::new()),
    cart_view_gate: Arc::new(RenderGate::new()),
    config: app_config.clone(),
  };

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
