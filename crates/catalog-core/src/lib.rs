//! # Catalog Core
//!
//! Product entity, business rules, and the repository port.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
