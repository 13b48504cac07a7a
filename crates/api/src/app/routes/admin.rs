use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Path},
    response::{Html, Redirect},
    routing::{get, post},
};
use tracing::info;

use vendo_core::ItemId;

use crate::app::errors::AppError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items))
        .route("/restock/:id", post(restock))
}

/// `GET /admin`: every stored item with a restock button.
pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Html<String>, AppError> {
    let items = services.store.list_items().await?;
    Ok(Html(services.views.admin(&items)?))
}

/// `POST /admin/restock/:id`: add stock, then back to the admin page.
///
/// An id that matches nothing (including a non-numeric one) is a no-op.
pub async fn restock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    match id.parse::<ItemId>() {
        Ok(item_id) => {
            services.store.restock(item_id).await?;
        }
        Err(e) => info!(%e, "restock ignored"),
    }
    Ok(Redirect::to("/admin"))
}
