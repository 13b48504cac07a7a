use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendo_core::{Entity, ItemId, Money, SaleId};

use crate::sold_at::display_sold_at;

/// An immutable record of one completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub item_id: ItemId,
    pub sold_at: DateTime<Utc>,
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A sale joined with its item at read time.
///
/// `price` is the item's *current* price, not necessarily what was paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleHistoryEntry {
    pub sale_id: SaleId,
    pub item_id: ItemId,
    pub item_name: String,
    pub price: Money,
    pub sold_at: DateTime<Utc>,
}

impl SaleHistoryEntry {
    pub fn sold_at_display(&self) -> String {
        display_sold_at(self.sold_at)
    }
}

/// Totals shown above the history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SalesSummary {
    pub count: usize,
    pub revenue: Money,
}

impl SalesSummary {
    pub fn from_history(history: &[SaleHistoryEntry]) -> Self {
        Self {
            count: history.len(),
            revenue: history.iter().map(|e| e.price).sum(),
        }
    }
}
