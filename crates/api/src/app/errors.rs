use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use vendo_infra::{PurchaseFailure, StoreError};
use vendo_inventory::PurchaseError;

/// Anything a handler can fail with.
///
/// Purchase refusals are shown to the customer verbatim. Everything else is
/// logged and answered with a generic 500 so an empty page never hides a
/// storage failure.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Purchase(#[from] PurchaseError),

    #[error("storage failure: {0}")]
    Store(#[from] StoreError),

    #[error("failed to read image assets: {0}")]
    Assets(#[from] std::io::Error),

    #[error("failed to render page: {0}")]
    Render(#[from] tera::Error),
}

impl From<PurchaseFailure> for AppError {
    fn from(value: PurchaseFailure) -> Self {
        match value {
            PurchaseFailure::Rejected(e) => AppError::Purchase(e),
            PurchaseFailure::Store(e) => AppError::Store(e),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Purchase(PurchaseError::ItemNotFound) => StatusCode::NOT_FOUND,
            AppError::Purchase(PurchaseError::OutOfStock) => StatusCode::CONFLICT,
            AppError::Purchase(PurchaseError::InsufficientFunds { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Store(_) | AppError::Assets(_) | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Purchase(e) => (status, e.to_string()).into_response(),
            other => {
                tracing::error!(error = %other, "request failed");
                (status, "Error: the vending machine is out of order, please try again later.")
                    .into_response()
            }
        }
    }
}
