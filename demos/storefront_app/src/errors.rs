// demos/storefront_app/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use cart_store::CartError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Cart Error: {source}")]
  Cart {
    #[from] // Allows conversion from cart_store::CartError
    source: CartError,
  },
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Cart { source } => match source {
        CartError::InvalidInput { message } => HttpResponse::BadRequest().json(json!({"error": message})),
        CartError::QuantityOverflow { product_id } => HttpResponse::BadRequest()
          .json(json!({"error": "Quantity too large", "productId": product_id})),
        CartError::ProductLookupFailed { product_id, .. } => HttpResponse::BadGateway()
          .json(json!({"error": "Product data unavailable", "productId": product_id})),
        CartError::StorageUnavailable { .. } => {
          HttpResponse::ServiceUnavailable().json(json!({"error": "Cart storage unavailable"}))
        }
        other => HttpResponse::InternalServerError().json(json!({"error": "Cart error", "detail": other.to_string()})),
      },
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
