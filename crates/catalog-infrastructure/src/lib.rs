//! # Catalog Infrastructure
//!
//! PostgreSQL implementations (adapters) for the catalog ports.

pub mod database;

pub use database::{create_pool, run_migrations, PgProductRepository};
