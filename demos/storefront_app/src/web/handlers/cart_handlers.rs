// demos/storefront_app/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use cart_store::CartCommand;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::CartTableView;
use crate::state::AppState;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct AddItemRequestPayload {
  pub product_id: String,
  /// May be negative to take units away.
  #[serde(default = "default_quantity")]
  pub quantity: i64,
}

fn default_quantity() -> i64 {
  1
}

#[derive(Deserialize, Debug)]
pub struct CartActionPayload {
  pub action: String,
  #[serde(default)]
  pub id: String,
}

// --- Handler Implementations ---

/// Renders the cart table. Lookups for several renders may overlap; a render that
/// finishes after a newer one has been published answers with the newer view.
#[instrument(name = "handler::view_cart", skip(app_state))]
pub async fn view_cart_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let generation = app_state.cart_view_gate.begin();
  let options = app_state.config.cart.summary_options();

  let summary = app_state
    .cart
    .compute_summary_with(app_state.catalog.as_ref(), &options)
    .await?;
  let item_count = app_state.cart.total_quantity()?;

  if !summary.is_complete() {
    warn!(
      unavailable = ?summary.failed_product_ids(),
      "Rendering cart with products whose data could not be fetched."
    );
  }

  let view = CartTableView::build(
    generation.value(),
    &summary,
    item_count,
    &app_state.config.cart.currency_symbol,
  );

  if app_state.cart_view_gate.publish(generation, view.clone()) {
    return Ok(HttpResponse::Ok().json(view));
  }
  let latest = app_state.cart_view_gate.latest().unwrap_or(view);
  Ok(HttpResponse::Ok().json(latest))
}

/// The badge number. Answered from the cart record alone.
#[instrument(name = "handler::cart_counter", skip(app_state))]
pub async fn cart_counter_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let count = app_state.cart.total_quantity()?;
  Ok(HttpResponse::Ok().json(json!({ "count": count })))
}

#[instrument(
    name = "handler::add_item",
    skip(app_state, req_payload),
    fields(product_id = %req_payload.product_id, quantity = %req_payload.quantity)
)]
pub async fn add_item_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddItemRequestPayload>,
) -> Result<HttpResponse> {
  let payload = req_payload.into_inner();
  app_state.cart.add_item(&payload.product_id, payload.quantity)?;

  let quantity = app_state.cart.quantity_of(&payload.product_id)?;
  info!("Cart updated: product {} now at quantity {}", payload.product_id, quantity);

  Ok(HttpResponse::Ok().json(json!({
      "productId": payload.product_id,
      "quantity": quantity,
      "count": app_state.cart.total_quantity()?,
  })))
}

/// Entry point for the +/-/remove buttons of the cart table.
#[instrument(name = "handler::cart_action", skip(app_state, req_payload), fields(action = %req_payload.action))]
pub async fn cart_action_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CartActionPayload>,
) -> Result<HttpResponse> {
  let command = CartCommand::from_action(&req_payload.action, &req_payload.id)?;
  app_state.cart.apply(&command)?;

  Ok(HttpResponse::Ok().json(json!({ "count": app_state.cart.total_quantity()? })))
}

#[instrument(name = "handler::remove_item", skip(app_state))]
pub async fn remove_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse> {
  let product_id = path.into_inner();
  if product_id.trim().is_empty() {
    return Err(AppError::Validation("Product id must not be empty.".to_string()));
  }
  app_state.cart.remove_item(&product_id)?;
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::clear_cart", skip(app_state))]
pub async fn clear_cart_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  app_state.cart.clear()?;
  Ok(HttpResponse::NoContent().finish())
}
