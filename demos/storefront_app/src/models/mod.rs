// demos/storefront_app/src/models/mod.rs

//! View models the HTTP layer renders the cart into.

pub mod cart_view;

pub use cart_view::{CartRow, CartTableView};
