//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Product code already exists: {0}")]
    CodeAlreadyExists(String),

    #[error("Product not found: {0}")]
    ProductNotFound(i32),

    #[error("Database operation failed: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Whether the failure came from the persistence layer rather than a business rule
    pub fn is_storage_fault(&self) -> bool {
        matches!(self, DomainError::DatabaseError(_))
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
