use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Path, rejection::FormRejection},
    response::Html,
};
use tracing::debug;

use vendo_core::ItemId;
use vendo_inventory::{InsertedMoney, PurchaseError};

use crate::app::dto::PurchaseForm;
use crate::app::errors::AppError;
use crate::app::services::AppServices;

/// `POST /purchase/:id` with form field `money`.
///
/// An unreadable form counts as no money inserted. A non-numeric id cannot
/// name an item, so it is refused as not found before money is looked at.
pub async fn purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    form: Result<Form<PurchaseForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let inserted = match form {
        Ok(Form(form)) => InsertedMoney::parse(form.money.as_deref()),
        Err(rejection) => {
            debug!(%rejection, "unreadable purchase form");
            InsertedMoney::invalid()
        }
    };

    let item_id: ItemId = id.parse().map_err(|_| PurchaseError::ItemNotFound)?;
    let receipt = services.store.purchase(item_id, inserted).await?;
    Ok(Html(services.views.purchased(&receipt)?))
}
