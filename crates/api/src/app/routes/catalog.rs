use std::sync::Arc;

use axum::{extract::Extension, response::Html};

use vendo_infra::assets::scan_images;
use vendo_inventory::merge_catalog;

use crate::app::errors::AppError;
use crate::app::services::AppServices;

/// `GET /`: the vending-machine front, items merged with the image assets.
pub async fn index(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Html<String>, AppError> {
    let items = services.store.list_items().await?;
    let images = scan_images(&services.images_dir).await?;
    let entries = merge_catalog(&items, images);
    Ok(Html(services.views.catalog(&entries)?))
}
