//! Infrastructure layer: configuration, SQLite storage, asset scanning.

pub mod assets;
pub mod config;
pub mod error;
pub mod store;

#[cfg(test)]
mod integration_tests;

pub use config::{Config, DatabaseConfig};
pub use error::{PurchaseFailure, StoreError, StoreResult};
pub use store::{PurchaseReceipt, SqliteVendingStore, VendingStore};
