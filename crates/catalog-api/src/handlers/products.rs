// ============================================================================
// Catalog API - Product Handlers
// File: crates/catalog-api/src/handlers/products.rs
// ============================================================================
//! JSON endpoints for product maintenance

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use catalog_core::{NewProduct, Product};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Create/update request payload
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub code: String,
    pub name: String,
}

impl From<ProductRequest> for NewProduct {
    fn from(req: ProductRequest) -> Self {
        NewProduct::new(req.code, req.name)
    }
}

/// Product DTO for responses
#[derive(Debug, Serialize)]
pub struct ProductDto {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub created_at: String,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            code: product.code,
            name: product.name,
            created_at: product.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub code_exists: bool,
    pub product: Option<ProductDto>,
}

/// List handler - GET /api/v1/products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductDto>>>, ApiError> {
    let products = state.products.list_all().await?;
    Ok(Json(ApiResponse::success(
        products.into_iter().map(ProductDto::from).collect(),
    )))
}

/// Count handler - GET /api/v1/products/count
pub async fn count_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.products.count().await?;
    Ok(Json(ApiResponse::success(CountResponse { count })))
}

/// Get handler - GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product {} does not exist", id)))?;
    Ok(Json(ApiResponse::success(product.into())))
}

/// Lookup handler - GET /api/v1/products/by-code/{code}
pub async fn lookup_product(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<LookupResponse>>, ApiError> {
    let lookup = state.products.find_by_code(&code).await?;
    Ok(Json(ApiResponse::success(LookupResponse {
        code_exists: lookup.is_found(),
        product: lookup.into_product().map(ProductDto::from),
    })))
}

/// Create handler - POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductDto>>), ApiError> {
    let product = state.products.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(product.into()))))
}

/// Update handler - PUT /api/v1/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    let product = state.products.update(id, payload.into()).await?;
    Ok(Json(ApiResponse::success(product.into())))
}

/// Delete handler - DELETE /api/v1/products/{id}
///
/// Deleting an unknown id is not an error.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{send_json, test_app, InMemoryProductRepository};

    #[tokio::test]
    async fn test_create_then_lookup_any_casing() {
        let app = test_app(InMemoryProductRepository::new());

        let (status, created) = send_json(
            &app,
            "POST",
            "/api/v1/products",
            Some(json!({ "code": " abc123 ", "name": "Widget" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["data"]["code"], "ABC123");
        assert!(created["data"]["id"].as_i64().unwrap() > 0);

        for variant in ["ABC123", "abc123", "AbC123"] {
            let (status, found) =
                send_json(&app, "GET", &format!("/api/v1/products/by-code/{}", variant), None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(found["data"]["code_exists"], true);
            assert_eq!(found["data"]["product"]["name"], "Widget");
        }
    }

    #[tokio::test]
    async fn test_duplicate_code_conflicts() {
        let app = test_app(InMemoryProductRepository::with_products(&[("ABC123", "Widget")]));

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/v1/products",
            Some(json!({ "code": "abc123", "name": "Another" })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_invalid_payload_is_bad_request() {
        let app = test_app(InMemoryProductRepository::new());

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/v1/products",
            Some(json!({ "code": "AB-12", "name": "Widget" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_code_that_folds_into_ascii_is_rejected() {
        let app = test_app(InMemoryProductRepository::new());

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/v1/products",
            Some(json!({ "code": "straße", "name": "Widget" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, count) = send_json(&app, "GET", "/api/v1/products/count", None).await;
        assert_eq!(count["data"]["count"], 0);
    }

    #[tokio::test]
    async fn test_update_to_free_code() {
        let app = test_app(InMemoryProductRepository::with_products(&[("ABC123", "Widget")]));

        let (status, body) = send_json(
            &app,
            "PUT",
            "/api/v1/products/1",
            Some(json!({ "code": "new1", "name": "Widget" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["code"], "NEW1");

        let (_, old) = send_json(&app, "GET", "/api/v1/products/by-code/ABC123", None).await;
        assert_eq!(old["data"]["code_exists"], false);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let app = test_app(InMemoryProductRepository::with_products(&[
            ("C1", "Zeta"),
            ("A1", "Alpha"),
            ("B1", "Mu"),
        ]));

        let (status, body) = send_json(&app, "GET", "/api/v1/products", None).await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Alpha", "Mu", "Zeta"]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_keeps_count() {
        let app = test_app(InMemoryProductRepository::with_products(&[("ABC123", "Widget")]));

        let (status, _) = send_json(&app, "DELETE", "/api/v1/products/999", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, count) = send_json(&app, "GET", "/api/v1/products/count", None).await;
        assert_eq!(count["data"]["count"], 1);
    }

    #[tokio::test]
    async fn test_delete_existing_product() {
        let app = test_app(InMemoryProductRepository::with_products(&[("ABC123", "Widget")]));

        let (status, _) = send_json(&app, "DELETE", "/api/v1/products/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send_json(&app, "GET", "/api/v1/products/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_unknown_product_is_not_found() {
        let app = test_app(InMemoryProductRepository::new());

        let (status, body) = send_json(
            &app,
            "PUT",
            "/api/v1/products/7",
            Some(json!({ "code": "ABC123", "name": "Widget" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (_, count) = send_json(&app, "GET", "/api/v1/products/count", None).await;
        assert_eq!(count["data"]["count"], 0);
    }

    #[tokio::test]
    async fn test_update_existing_product() {
        let app = test_app(InMemoryProductRepository::with_products(&[("ABC123", "Widget")]));

        let (status, body) = send_json(
            &app,
            "PUT",
            "/api/v1/products/1",
            Some(json!({ "code": "abc123", "name": "Widget Pro" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Widget Pro");
        assert_eq!(body["data"]["code"], "ABC123");
    }

    #[tokio::test]
    async fn test_storage_fault_hides_details() {
        let app = test_app(InMemoryProductRepository::failing());

        let (status, body) = send_json(&app, "GET", "/api/v1/products", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "DATABASE_ERROR");
        assert_eq!(body["error"]["message"], "Database operation failed");
    }
}
