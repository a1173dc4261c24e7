//! # Catalog Core - Domain Module
//!
//! Domain entities for the product catalog.

pub mod product;

pub use product::{normalize_code, CodeLookup, NewProduct, Product};
