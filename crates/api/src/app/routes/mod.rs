use axum::{
    Router,
    routing::{get, post},
};

pub mod admin;
pub mod catalog;
pub mod purchase;
pub mod sales;
pub mod system;

/// Router for all page endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(catalog::index))
        .route("/purchase/:id", post(purchase::purchase))
        .route("/sales", get(sales::history))
        .nest("/admin", admin::router())
}
