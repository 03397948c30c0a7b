// cart_store/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// The storage call that failed, used for `StorageUnavailable` diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
  Read,
  Write,
  Remove,
}

impl std::fmt::Display for StorageOp {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      StorageOp::Read => f.write_str("reading"),
      StorageOp::Write => f.write_str("writing"),
      StorageOp::Remove => f.write_str("removing"),
    }
  }
}

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Storage unavailable while {operation} key '{key}'. Source: {source}")]
  StorageUnavailable {
    operation: StorageOp,
    key: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Product lookup failed for product '{product_id}'. Source: {source}")]
  ProductLookupFailed {
    product_id: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Malformed cart record under key '{key}': {reason}")]
  MalformedRecord { key: String, reason: String },

  #[error("Invalid input: {message}")]
  InvalidInput { message: String },

  #[error("Quantity overflow for product '{product_id}'")]
  QuantityOverflow { product_id: String },

  #[error("Line cost overflow for product '{product_id}'")]
  LineCostOverflow { product_id: String },

  #[error("Configuration error: {message}")]
  Configuration { message: String },

  #[error("Internal cart error: {0}")]
  Internal(String),
}

impl CartError {
  pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
    CartError::InvalidInput {
      message: message.into(),
    }
  }

  /// Product id this error refers to, when it is item-specific.
  pub fn product_id(&self) -> Option<&str> {
    match self {
      CartError::ProductLookupFailed { product_id, .. }
      | CartError::QuantityOverflow { product_id }
      | CartError::LineCostOverflow { product_id } => Some(product_id.as_str()),
      _ => None,
    }
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
