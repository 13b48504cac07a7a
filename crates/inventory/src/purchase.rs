//! Purchase decision: the checks a purchase must pass before any write.
//!
//! The checks run strictly in order and the first failure wins:
//! item lookup, stock, then funds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vendo_core::{ItemId, Money};

use crate::item::Item;

/// Money inserted by the customer, as submitted in the purchase form.
///
/// A missing or non-numeric amount is kept as the invalid sentinel instead of
/// being rejected up front; it then fails the funds check.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertedMoney(Option<Money>);

impl InsertedMoney {
    pub fn new(amount: i64) -> Self {
        Self(Some(Money::new(amount)))
    }

    pub fn invalid() -> Self {
        Self(None)
    }

    /// Coerce a raw form value. Surrounding whitespace is ignored.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).and_then(|s| s.parse::<i64>().ok()) {
            Some(amount) => Self::new(amount),
            None => Self::invalid(),
        }
    }

    pub fn amount(&self) -> Option<Money> {
        self.0
    }
}

impl core::fmt::Display for InsertedMoney {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            Some(money) => core::fmt::Display::fmt(&money, f),
            None => f.write_str("invalid amount"),
        }
    }
}

/// Why a purchase was refused. The messages are shown to the customer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("Error: item not found")]
    ItemNotFound,

    #[error("Error: sold out!")]
    OutOfStock,

    #[error("Not enough money (price: {price} / inserted: {received})")]
    InsufficientFunds {
        price: Money,
        received: InsertedMoney,
    },
}

/// Outcome of a purchase that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseDecision {
    pub item_id: ItemId,
    pub change: Money,
}

/// Decide whether `item` may be sold for `inserted`.
///
/// `None` means the lookup found no row. This never mutates anything; the
/// caller performs the stock decrement and sale insert on success.
pub fn decide_purchase(
    item: Option<&Item>,
    inserted: InsertedMoney,
) -> Result<PurchaseDecision, PurchaseError> {
    let item = item.ok_or(PurchaseError::ItemNotFound)?;

    if item.stock() <= 0 {
        return Err(PurchaseError::OutOfStock);
    }

    let price = item.price();
    let money = match inserted.amount() {
        Some(money) if money >= price => money,
        _ => {
            return Err(PurchaseError::InsufficientFunds {
                price,
                received: inserted,
            });
        }
    };

    // money >= price >= 0, so the difference cannot overflow.
    Ok(PurchaseDecision {
        item_id: item.id_typed(),
        change: Money::new(money.amount() - price.amount()),
    })
}
