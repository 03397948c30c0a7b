// cart_store/src/model/mod.rs

//! Data structures for the persisted cart record and the product data it is joined with.

pub mod line_item;
pub mod product;
pub mod record;

pub use line_item::LineItem;
pub use product::Product;
pub use record::{decode_record, encode_record};
