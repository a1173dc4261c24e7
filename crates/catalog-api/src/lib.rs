//! # Catalog API
//!
//! HTTP handlers, result page rendering, and router assembly.

pub mod handlers;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_support;

pub use routes::build_router;
pub use state::AppState;
