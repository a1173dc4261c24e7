//! Product repository trait (port)

use async_trait::async_trait;
use crate::domain::{NewProduct, Product};
use crate::error::DomainError;

/// Storage access for the `products` table.
///
/// Codes passed in are already normalized. Every storage failure comes back
/// as `DomainError::DatabaseError`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError>;
    async fn exists_by_code(&self, code: &str) -> Result<bool, DomainError>;
    /// All products ordered by name
    async fn find_all(&self) -> Result<Vec<Product>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    /// Insert and return the stored row. `created_at` must already be set.
    async fn insert(&self, product: &NewProduct) -> Result<Product, DomainError>;
    /// Overwrite code and name. `None` when no row has this id.
    async fn update(&self, id: i32, product: &NewProduct) -> Result<Option<Product>, DomainError>;
    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i32) -> Result<bool, DomainError>;
}
