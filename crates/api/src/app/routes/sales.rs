use std::sync::Arc;

use axum::{extract::Extension, response::Html};

use crate::app::errors::AppError;
use crate::app::services::AppServices;

/// `GET /sales`: sale history, newest first.
pub async fn history(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Html<String>, AppError> {
    let history = services.store.sales_history().await?;
    Ok(Html(services.views.sales(&history)?))
}
