//! Domain services (business logic)

pub mod product_service;

pub use product_service::ProductService;
