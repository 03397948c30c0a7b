// cart_store/src/config.rs

use crate::error::{CartError, CartResult};
use crate::money::DEFAULT_CURRENCY_SYMBOL;
use crate::storage::FileStore;
use crate::summary::{LookupMode, SummaryOptions};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Storage key the cart record lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
  pub storage_key: String,
  /// Directory for a `FileStore`. `None` means an in-memory store.
  pub data_dir: Option<PathBuf>,
  pub currency_symbol: String,
  pub lookup_timeout: Option<Duration>,
  pub parallel_lookups: bool,
}

impl Default for CartConfig {
  fn default() -> Self {
    Self {
      storage_key: DEFAULT_STORAGE_KEY.to_string(),
      data_dir: None,
      currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
      lookup_timeout: None,
      parallel_lookups: false,
    }
  }
}

impl CartConfig {
  /// Loads the configuration from `CART_*` environment variables, reading a `.env`
  /// file first if one is present. Unset variables keep their defaults.
  pub fn from_env() -> CartResult<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the configuration from an arbitrary variable source.
  pub fn from_lookup(get_var: impl Fn(&str) -> Option<String>) -> CartResult<Self> {
    let defaults = Self::default();

    let storage_key = get_var("CART_STORAGE_KEY").unwrap_or(defaults.storage_key);
    if storage_key.trim().is_empty() {
      return Err(CartError::Configuration {
        message: "CART_STORAGE_KEY must not be empty".to_string(),
      });
    }

    let data_dir = get_var("CART_DATA_DIR").filter(|s| !s.trim().is_empty()).map(PathBuf::from);
    if data_dir.is_some() {
      FileStore::validate_key(&storage_key).map_err(|e| CartError::Configuration {
        message: format!("CART_STORAGE_KEY cannot be used with CART_DATA_DIR: {}", e),
      })?;
    }
    let currency_symbol = get_var("CART_CURRENCY").unwrap_or(defaults.currency_symbol);

    let lookup_timeout = get_var("CART_LOOKUP_TIMEOUT_MS")
      .map(|raw| parse_var::<u64>("CART_LOOKUP_TIMEOUT_MS", &raw))
      .transpose()?
      .map(Duration::from_millis);

    let parallel_lookups = get_var("CART_PARALLEL_LOOKUPS")
      .map(|raw| parse_var::<bool>("CART_PARALLEL_LOOKUPS", &raw))
      .transpose()?
      .unwrap_or(defaults.parallel_lookups);

    tracing::debug!(
      storage_key = %storage_key,
      file_backed = data_dir.is_some(),
      parallel_lookups,
      "Cart configuration loaded."
    );

    Ok(Self {
      storage_key,
      data_dir,
      currency_symbol,
      lookup_timeout,
      parallel_lookups,
    })
  }

  /// Summary options derived from this configuration.
  pub fn summary_options(&self) -> SummaryOptions {
    SummaryOptions {
      mode: if self.parallel_lookups {
        LookupMode::Parallel
      } else {
        LookupMode::Sequential
      },
      timeout: self.lookup_timeout,
    }
  }
}

fn parse_var<T>(name: &str, raw: &str) -> CartResult<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw.trim().parse::<T>().map_err(|e| CartError::Configuration {
    message: format!("Invalid {} value '{}': {}", name, raw, e),
  })
}
