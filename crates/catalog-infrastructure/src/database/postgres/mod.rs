//! PostgreSQL repository implementations

pub mod product_repo_impl;

pub use product_repo_impl::PgProductRepository;
