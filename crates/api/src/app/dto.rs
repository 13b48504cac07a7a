//! Form inputs and the view models handed to templates.

use serde::{Deserialize, Serialize};

use vendo_infra::PurchaseReceipt;
use vendo_sales::SaleHistoryEntry;

/// Body of `POST /purchase/:id`. `money` is kept raw; coercion happens in
/// `InsertedMoney::parse`.
#[derive(Debug, Default, Deserialize)]
pub struct PurchaseForm {
    pub money: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PurchasedView {
    pub name: String,
    pub change: i64,
    pub remaining_stock: i64,
}

impl From<&PurchaseReceipt> for PurchasedView {
    fn from(receipt: &PurchaseReceipt) -> Self {
        Self {
            name: receipt.item.name().to_string(),
            change: receipt.change.amount(),
            remaining_stock: receipt.remaining_stock,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaleRowView {
    pub sold_at: String,
    pub name: String,
    pub price: i64,
}

impl From<&SaleHistoryEntry> for SaleRowView {
    fn from(entry: &SaleHistoryEntry) -> Self {
        Self {
            sold_at: entry.sold_at_display(),
            name: entry.item_name.clone(),
            price: entry.price.amount(),
        }
    }
}
