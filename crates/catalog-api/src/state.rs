use std::sync::Arc;

use catalog_core::repositories::ProductRepository;
use catalog_core::services::ProductService;
use handlebars::TemplateError;

use crate::view::PageRenderer;

pub type SharedProductService = Arc<ProductService<dyn ProductRepository>>;

#[derive(Clone)]
pub struct AppState {
    pub products: SharedProductService,
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Result<Self, TemplateError> {
        Ok(Self {
            products: Arc::new(ProductService::new(product_repo)),
            pages: Arc::new(PageRenderer::new()?),
        })
    }
}
