// ============================================================================
// Catalog Infrastructure - PostgreSQL Product Repository
// File: crates/catalog-infrastructure/src/database/postgres/product_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, info};

use catalog_core::domain::{NewProduct, Product};
use catalog_core::error::DomainError;
use catalog_core::repositories::ProductRepository;

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct ProductRow {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            code: row.code,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

fn map_write_error(e: sqlx::Error, code: &str) -> DomainError {
    let unique_violation = e
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());

    if unique_violation {
        DomainError::CodeAlreadyExists(code.to_string())
    } else {
        DomainError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, DomainError> {
        debug!("Finding product by code: {}", code);

        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, code, name, created_at
            FROM products
            WHERE code = $1
            "#
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding product by code {}: {}", code, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, code, name, created_at
            FROM products
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding product by id {}: {}", id, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM products WHERE code = $1)"
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error checking code {}: {}", code, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        debug!("Code {} exists: {}", code, exists);
        Ok(exists)
    }

    async fn find_all(&self) -> Result<Vec<Product>, DomainError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, code, name, created_at
            FROM products
            ORDER BY name
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing products: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Found {} products", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error counting products: {}", e);
                DomainError::DatabaseError(e.to_string())
            })
    }

    async fn insert(&self, product: &NewProduct) -> Result<Product, DomainError> {
        let row: ProductRow = sqlx::query_as(
            r#"
            INSERT INTO products (code, name, created_at)
            VALUES ($1, $2, COALESCE($3, NOW()))
            RETURNING id, code, name, created_at
            "#
        )
        .bind(&product.code)
        .bind(&product.name)
        .bind(product.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating product {}: {}", product.code, e);
            map_write_error(e, &product.code)
        })?;

        Ok(row.into())
    }

    async fn update(&self, id: i32, product: &NewProduct) -> Result<Option<Product>, DomainError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            UPDATE products
            SET
                code = $2,
                name = $3
            WHERE id = $1
            RETURNING id, code, name, created_at
            "#
        )
        .bind(id)
        .bind(&product.code)
        .bind(&product.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating product {}: {}", id, e);
            map_write_error(e, &product.code)
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting product {}: {}", id, e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
