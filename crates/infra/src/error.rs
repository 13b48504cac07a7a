//! Storage error model.

use thiserror::Error;

use vendo_core::DomainError;
use vendo_inventory::PurchaseError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-level failure.
///
/// Reads never degrade to an empty result: every failure surfaces here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error in {operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A stored row does not satisfy the domain invariants.
    #[error("corrupt row: {0}")]
    CorruptRow(#[from] DomainError),
}

impl StoreError {
    pub(crate) fn database(
        operation: &'static str,
    ) -> impl Fn(sqlx::Error) -> StoreError + Copy {
        move |source| StoreError::Database { operation, source }
    }
}

/// Why a purchase did not complete.
#[derive(Debug, Error)]
pub enum PurchaseFailure {
    /// Refused by the purchase rules; nothing was written.
    #[error(transparent)]
    Rejected(#[from] PurchaseError),

    /// Storage failed; the transaction was rolled back.
    #[error(transparent)]
    Store(#[from] StoreError),
}
