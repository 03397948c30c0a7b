// demos/storefront_app/src/services/mod.rs

pub mod catalog_mock;

pub use catalog_mock::MockCatalog;
