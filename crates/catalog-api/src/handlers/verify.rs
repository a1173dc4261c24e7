// ============================================================================
// Catalog API - Code Verification Handlers
// File: crates/catalog-api/src/handlers/verify.rs
// ============================================================================
//! Form endpoint that checks a product code and renders the result page

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Redirect},
    Form,
};
use catalog_core::normalize_code;
use catalog_shared::constants::LANDING_PAGE;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::state::{AppState, SharedProductService};
use crate::view::VerificationView;

/// Verification form payload
#[derive(Debug, Deserialize)]
pub struct VerifyCodeForm {
    #[serde(default)]
    pub code: Option<String>,
}

/// Resolve a raw form value into the values shown on the result page
pub async fn resolve_view(
    products: &SharedProductService,
    raw: Option<&str>,
) -> (StatusCode, VerificationView) {
    let code = normalize_code(raw.unwrap_or_default());
    if code.is_empty() {
        warn!("Empty or missing code received");
        return (StatusCode::OK, VerificationView::blank_code());
    }
    debug!("Normalized code: {}", code);

    match products.verify_code(&code).await {
        Ok(lookup) => {
            if lookup.is_found() {
                info!("Code found: {}", code);
            } else {
                info!("Code not found: {}", code);
            }
            (StatusCode::OK, VerificationView::from_lookup(code, lookup))
        }
        Err(e) => {
            error!("Error verifying code {}: {}", code, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                VerificationView::storage_fault(code),
            )
        }
    }
}

/// Verify handler - POST /verify-code
pub async fn verify_code(
    State(state): State<AppState>,
    Form(form): Form<VerifyCodeForm>,
) -> (StatusCode, Html<String>) {
    info!("Verification request received for code: {:?}", form.code);

    let (status, view) = resolve_view(&state.products, form.code.as_deref()).await;
    state.pages.page(status, &view)
}

/// GET /verify-code has nothing to show; send the visitor to the form
pub async fn redirect_to_landing() -> Redirect {
    debug!("GET request received, redirecting to {}", LANDING_PAGE);
    Redirect::to(LANDING_PAGE)
}
