//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store handle, templates and asset location shared by handlers
//! - `routes/`: HTTP routes + handlers (one file per page area)
//! - `dto.rs`: form inputs and template view models
//! - `errors.rs`: error-to-response mapping

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use vendo_infra::{Config, VendingStore};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;
pub mod views;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Paths that match no route are served from the public directory.
pub fn build_app(store: Arc<dyn VendingStore>, config: &Config) -> Result<Router, tera::Error> {
    let services = Arc::new(services::AppServices::new(store, config)?);

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_tracing))
                .layer(Extension(services)),
        ))
}
