// ============================================================================
// Catalog Core - Product Entity
// File: crates/catalog-core/src/domain/product.rs
// Description: Product entity, write-side input, and lookup outcome
// ============================================================================

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;
use validator::Validate;

use catalog_shared::constants::{CODE_MAX_LENGTH, NAME_MAX_LENGTH};

use crate::error::DomainError;

static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("code pattern is a valid regex"));

/// Trim surrounding whitespace and upper-case.
///
/// Every comparison and every write goes through this, so code matching is
/// case-insensitive by normalization, not by collation.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Persisted product.
///
/// Identity is the code: two products with the same code are equal whatever
/// their numeric ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

/// Input for create and update
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(max = CODE_MAX_LENGTH, message = "Product code cannot be longer than 50 characters"))]
    #[validate(regex(path = *CODE_PATTERN, message = "Product code may only contain letters and digits"))]
    pub code: String,

    #[validate(length(max = NAME_MAX_LENGTH, message = "Product name cannot be longer than 100 characters"))]
    pub name: String,

    /// Set on first persistence when left empty
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewProduct {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            created_at: None,
        }
    }

    /// Trim code and name, check required fields, bounds and the code
    /// pattern, then upper-case the code.
    ///
    /// Checks run before upper-casing: some non-ASCII letters fold into
    /// ASCII when upper-cased (`ß` becomes `SS`).
    pub fn normalized(self) -> Result<Self, DomainError> {
        let draft = Self {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            created_at: self.created_at,
        };

        if draft.code.is_empty() {
            return Err(DomainError::ValidationError("Product code is required".to_string()));
        }
        if draft.name.is_empty() {
            return Err(DomainError::ValidationError("Product name is required".to_string()));
        }

        draft.validate()?;
        Ok(Self {
            code: draft.code.to_ascii_uppercase(),
            ..draft
        })
    }
}

/// Outcome of a lookup by code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeLookup {
    Found(Product),
    NotFound,
}

impl CodeLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, CodeLookup::Found(_))
    }

    pub fn product(&self) -> Option<&Product> {
        match self {
            CodeLookup::Found(product) => Some(product),
            CodeLookup::NotFound => None,
        }
    }

    pub fn into_product(self) -> Option<Product> {
        match self {
            CodeLookup::Found(product) => Some(product),
            CodeLookup::NotFound => None,
        }
    }
}

impl From<Option<Product>> for CodeLookup {
    fn from(product: Option<Product>) -> Self {
        product.map_or(CodeLookup::NotFound, CodeLookup::Found)
    }
}
