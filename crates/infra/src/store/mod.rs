//! Vending-machine storage.
//!
//! `VendingStore` is the seam the HTTP layer talks to; `SqliteVendingStore` is
//! the only backend.

use async_trait::async_trait;

use vendo_core::{ItemId, Money};
use vendo_inventory::{InsertedMoney, Item};
use vendo_sales::{Sale, SaleHistoryEntry};

use crate::error::{PurchaseFailure, StoreResult};

mod sqlite;

pub use sqlite::SqliteVendingStore;

/// Result of a committed purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    /// The item as it was when the sale was decided.
    pub item: Item,
    pub change: Money,
    pub remaining_stock: i64,
    pub sale: Sale,
}

/// Storage operations behind the HTTP surface.
///
/// Implementations must make `purchase` atomic: the stock decrement and the
/// sale insert are committed together or not at all, and concurrent purchases
/// can never drive stock below zero.
#[async_trait]
pub trait VendingStore: Send + Sync {
    /// All items in storage order.
    async fn list_items(&self) -> StoreResult<Vec<Item>>;

    async fn get_item(&self, id: ItemId) -> StoreResult<Option<Item>>;

    /// Add `RESTOCK_INCREMENT` units. `None` when no item has this id.
    async fn restock(&self, id: ItemId) -> StoreResult<Option<Item>>;

    /// Sell one unit of `id` for `inserted`.
    async fn purchase(
        &self,
        id: ItemId,
        inserted: InsertedMoney,
    ) -> Result<PurchaseReceipt, PurchaseFailure>;

    /// Every sale joined with its item, newest first.
    async fn sales_history(&self) -> StoreResult<Vec<SaleHistoryEntry>>;
}
