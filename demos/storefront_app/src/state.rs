// demos/storefront_app/src/state.rs
use crate::config::AppConfig;
use crate::models::CartTableView;
use cart_store::{CartStore, ProductLookup, RenderGate};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub cart: Arc<CartStore>,
  pub catalog: Arc<dyn ProductLookup>,
  // Newest rendered cart table; older renders finishing late are dropped
  pub cart_view_gate: Arc<RenderGate<CartTableView>>,
  pub config: Arc<AppConfig>, // Share loaded config
}
