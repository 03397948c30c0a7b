// demos/storefront_app/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use cart_store::CartConfig;
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  // Seed the cart with the demo line items on startup
  pub seed_cart: bool,

  pub cart: CartConfig,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let seed_cart = get_env("SEED_CART")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_CART value: {}", e)))?;

    let cart = CartConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      seed_cart,
      cart,
    })
  }
}
