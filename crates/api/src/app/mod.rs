//! HTTP API application wiring (axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: infrastructure wiring (store behind the catalog service)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use tienda_infra::ProductStore;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests, which supply an in-memory store).
pub fn build_app(store: Arc<dyn ProductStore>) -> Router {
    let services = Arc::new(services::AppServices::new(store));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/products", routes::products::router())
        .layer(Extension(services))
}
