// ============================================================================
// Catalog Core - Product Service
// File: crates/catalog-core/src/services/product_service.rs
// ============================================================================
//! Code verification and product maintenance rules

use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::{normalize_code, CodeLookup, NewProduct, Product};
use crate::error::DomainError;
use crate::repositories::ProductRepository;

/// Business layer over a product repository
pub struct ProductService<R: ProductRepository + ?Sized> {
    product_repo: Arc<R>,
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(product_repo: Arc<R>) -> Self {
        info!("ProductService initialized");
        Self { product_repo }
    }

    /// Check whether a product with this code exists.
    ///
    /// Blank input is `NotFound` and never reaches storage.
    pub async fn verify_code(&self, raw: &str) -> Result<CodeLookup, DomainError> {
        debug!("Verifying code: {:?}", raw);

        let code = normalize_code(raw);
        if code.is_empty() {
            warn!("Attempt to verify an empty code");
            return Ok(CodeLookup::NotFound);
        }
        debug!("Normalized code: {}", code);

        let lookup = CodeLookup::from(self.product_repo.find_by_code(&code).await?);
        match &lookup {
            CodeLookup::Found(product) => info!("Code verified - exists: {} ({})", code, product.name),
            CodeLookup::NotFound => info!("Code verified - does not exist: {}", code),
        }

        Ok(lookup)
    }

    pub async fn find_by_code(&self, raw: &str) -> Result<CodeLookup, DomainError> {
        self.verify_code(raw).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        debug!("Finding product by id: {}", id);
        if id <= 0 {
            warn!("Invalid product id: {}", id);
            return Ok(None);
        }
        self.product_repo.find_by_id(id).await
    }

    /// All products, ordered by name
    pub async fn list_all(&self) -> Result<Vec<Product>, DomainError> {
        debug!("Listing all products");
        self.product_repo.find_all().await
    }

    pub async fn count(&self) -> Result<i64, DomainError> {
        self.product_repo.count().await
    }

    /// Validate and persist a new product.
    pub async fn create(&self, input: NewProduct) -> Result<Product, DomainError> {
        let mut product = input.normalized()?;
        debug!("Creating product: {}", product.code);

        if self.product_repo.exists_by_code(&product.code).await? {
            warn!("Create rejected, code already exists: {}", product.code);
            return Err(DomainError::CodeAlreadyExists(product.code));
        }

        product.created_at.get_or_insert_with(Utc::now);
        let created = self.product_repo.insert(&product).await?;

        info!("Product created: {} (id {})", created.code, created.id);
        Ok(created)
    }

    /// Validate and overwrite code and name of an existing product.
    pub async fn update(&self, id: i32, input: NewProduct) -> Result<Product, DomainError> {
        let product = input.normalized()?;
        debug!("Updating product {}: {}", id, product.code);

        let existing = match self.find_by_id(id).await? {
            Some(existing) => existing,
            None => {
                warn!("Update rejected, product does not exist: {}", id);
                return Err(DomainError::ProductNotFound(id));
            }
        };

        if existing.code != product.code {
            if let Some(owner) = self.product_repo.find_by_code(&product.code).await? {
                if owner.id != id {
                    warn!("Update rejected, code {} belongs to product {}", product.code, owner.id);
                    return Err(DomainError::CodeAlreadyExists(product.code));
                }
            }
        }

        let updated = self
            .product_repo
            .update(id, &product)
            .await?
            .ok_or(DomainError::ProductNotFound(id))?;

        info!("Product updated: {} (id {})", updated.code, updated.id);
        Ok(updated)
    }

    /// Remove a product. Unknown ids are a no-op; returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        debug!("Deleting product with id: {}", id);
        if id <= 0 {
            warn!("Delete skipped, invalid product id: {}", id);
            return Ok(false);
        }

        let removed = self.product_repo.delete_by_id(id).await?;
        if removed {
            info!("Product deleted: {}", id);
        } else {
            warn!("Delete skipped, no product with id: {}", id);
        }
        Ok(removed)
    }
}
