//! In-memory repository and request helpers for handler tests

use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use catalog_core::repositories::ProductRepository;
use catalog_core::{DomainError, NewProduct, Product};
use chrono::Utc;
use tower::ServiceExt;

use crate::routes::build_router;
use crate::state::AppState;

pub struct InMemoryProductRepository {
    rows: Mutex<Vec<Product>>,
    next_id: AtomicI32,
    lookups: AtomicUsize,
    failing: bool,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
            lookups: AtomicUsize::new(0),
            failing: false,
        }
    }

    /// Every call fails like a lost connection
    pub fn failing() -> Self {
        Self { failing: true, ..Self::new() }
    }

    pub fn with_products(products: &[(&str, &str)]) -> Self {
        let repo = Self::new();
        {
            let mut rows = repo.rows.lock().unwrap();
            for (code, name) in products {
                rows.push(Product {
                    id: repo.next_id.fetch_add(1, Ordering::SeqCst),
                    code: code.to_string(),
                    name: name.to_string(),
                    created_at: Utc::now(),
                });
            }
        }
        repo
    }

    /// Number of lookups by code that reached storage
    pub fn lookup_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing {
            Err(DomainError::DatabaseError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.rows.lock().unwrap().iter().find(|p| p.code == code).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, DomainError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().iter().any(|p| p.code == code))
    }

    async fn find_all(&self) -> Result<Vec<Product>, DomainError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn insert(&self, product: &NewProduct) -> Result<Product, DomainError> {
        self.check()?;
        let stored = Product {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            code: product.code.clone(),
            name: product.name.clone(),
            created_at: product.created_at.unwrap_or_else(Utc::now),
        };
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i32, product: &NewProduct) -> Result<Option<Product>, DomainError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|p| p.id == id).map(|row| {
            row.code = product.code.clone();
            row.name = product.name.clone();
            row.clone()
        }))
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, DomainError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }
}

pub fn test_app(repo: InMemoryProductRepository) -> Router {
    test_app_with(Arc::new(repo))
}

pub fn test_app_with(repo: Arc<InMemoryProductRepository>) -> Router {
    let state = AppState::new(repo).unwrap();
    build_router(state)
}

pub async fn call(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = call(app, request).await;
    (response.status(), body_text(response).await)
}

pub async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    let response = call(app, request).await;
    (response.status(), body_text(response).await)
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let body = match body {
        Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
        None => Body::empty(),
    };
    let response = call(app, builder.body(body).unwrap()).await;
    let status = response.status();
    let text = body_text(response).await;
    let json = if text.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}
