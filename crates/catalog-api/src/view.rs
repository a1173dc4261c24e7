//! Result page rendering for the verification form

use axum::{http::StatusCode, response::Html};
use catalog_core::CodeLookup;
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use tracing::error;

const RESULT_TEMPLATE_NAME: &str = "result";
const RESULT_TEMPLATE: &str = include_str!("../templates/result.hbs");

pub const BLANK_CODE_MESSAGE: &str = "Please provide a product code.";
pub const STORAGE_FAULT_MESSAGE: &str =
    "The product database could not be queried. Please try again later.";

/// Served when the result page itself cannot be rendered
pub const RENDER_FAULT_PAGE: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Product code verification</title></head>\n<body><p>The result page could not be displayed. Please try again later.</p><p><a href=\"/index.html\">Back</a></p></body>\n</html>\n";

/// Values handed to the result page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationView {
    pub code_exists: bool,
    pub code: Option<String>,
    pub product_name: Option<String>,
    pub error: Option<String>,
}

impl VerificationView {
    pub fn blank_code() -> Self {
        Self {
            error: Some(BLANK_CODE_MESSAGE.to_string()),
            ..Self::default()
        }
    }

    pub fn from_lookup(code: String, lookup: CodeLookup) -> Self {
        match lookup {
            CodeLookup::Found(product) => Self {
                code_exists: true,
                code: Some(product.code),
                product_name: Some(product.name),
                error: None,
            },
            CodeLookup::NotFound => Self {
                code_exists: false,
                code: Some(code),
                product_name: None,
                error: None,
            },
        }
    }

    pub fn storage_fault(code: String) -> Self {
        Self {
            code: Some(code),
            error: Some(STORAGE_FAULT_MESSAGE.to_string()),
            ..Self::default()
        }
    }
}

pub struct PageRenderer {
    registry: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_template_string(RESULT_TEMPLATE_NAME, RESULT_TEMPLATE)?;
        Ok(Self { registry })
    }

    pub fn render_result(&self, view: &VerificationView) -> Result<String, RenderError> {
        self.registry.render(RESULT_TEMPLATE_NAME, view)
    }

    /// Render the result page, falling back to a static error page
    pub fn page(&self, status: StatusCode, view: &VerificationView) -> (StatusCode, Html<String>) {
        match self.render_result(view) {
            Ok(page) => (status, Html(page)),
            Err(e) => {
                error!("Failed to render result page: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(RENDER_FAULT_PAGE.to_string()),
                )
            }
        }
    }
}
