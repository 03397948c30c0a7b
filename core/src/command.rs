// cart_store/src/command.rs

//! Typed cart commands dispatched by the presentation layer.

use crate::error::{CartError, CartResult};
use crate::store::CartStore;
use tracing::{event, Level};

/// A user action against the cart. The presentation layer translates button presses
/// into one of these and hands it to [`CartStore::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CartCommand {
  /// Add one unit of the product.
  Increase(String),
  /// Take one unit away; the line item disappears when it reaches zero.
  Decrease(String),
  /// Drop the product from the cart regardless of quantity.
  Remove(String),
  /// Empty the whole cart.
  Clear,
}

impl CartCommand {
  /// Parses the action name/product id pair storefront buttons carry.
  ///
  /// `"remove"` with an empty id is the "remove everything" button on the total
  /// row and maps to [`CartCommand::Clear`].
  pub fn from_action(action: &str, product_id: &str) -> CartResult<Self> {
    let product_id = product_id.trim();
    let needs_id = |command: fn(String) -> CartCommand| {
      if product_id.is_empty() {
        Err(CartError::invalid_input(format!("action '{}' requires a product id", action)))
      } else {
        Ok(command(product_id.to_string()))
      }
    };

    match action.trim().to_ascii_lowercase().as_str() {
      "increase" => needs_id(CartCommand::Increase),
      "decrease" => needs_id(CartCommand::Decrease),
      "remove" if product_id.is_empty() => Ok(CartCommand::Clear),
      "remove" => Ok(CartCommand::Remove(product_id.to_string())),
      "clear" => Ok(CartCommand::Clear),
      other => Err(CartError::invalid_input(format!("unknown cart action '{}'", other))),
    }
  }

  /// The product the command targets, `None` for `Clear`.
  pub fn product_id(&self) -> Option<&str> {
    match self {
      CartCommand::Increase(id) | CartCommand::Decrease(id) | CartCommand::Remove(id) => Some(id),
      CartCommand::Clear => None,
    }
  }
}

impl CartStore {
  /// Dispatches a command onto the matching typed operation.
  pub fn apply(&self, command: &CartCommand) -> CartResult<()> {
    event!(Level::DEBUG, ?command, "Applying cart command.");
    match command {
      CartCommand::Increase(product_id) => self.add_item(product_id, 1),
      CartCommand::Decrease(product_id) => self.add_item(product_id, -1),
      CartCommand::Remove(product_id) => self.remove_item(product_id),
      CartCommand::Clear => self.clear(),
    }
  }
}
