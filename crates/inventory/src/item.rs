use serde::{Deserialize, Serialize};

use vendo_core::{DomainError, Entity, ItemId, Money};

/// Units added to an item's stock by one restock.
pub const RESTOCK_INCREMENT: i64 = 10;

/// A vending-machine product and its remaining stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    price: Money,
    stock: i64,
    image: String,
}

impl Item {
    /// Rehydrate an item, rejecting rows that break the price/stock invariants.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        price: Money,
        stock: i64,
        image: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if price < Money::ZERO {
            return Err(DomainError::invariant(format!("item {id}: price cannot be negative")));
        }
        if stock < 0 {
            return Err(DomainError::invariant(format!("item {id}: stock cannot go negative")));
        }
        Ok(Self {
            id,
            name: name.into(),
            price,
            stock,
            image: image.into(),
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn is_sold_out(&self) -> bool {
        self.stock <= 0
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// An item that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    pub image: String,
}

impl NewItem {
    pub fn new(name: impl Into<String>, price: i64, stock: i64, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: Money::new(price),
            stock,
            image: image.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.price < Money::ZERO {
            return Err(DomainError::validation("price cannot be negative"));
        }
        if self.stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        Ok(())
    }
}

/// Items inserted into an empty catalog on first start.
pub fn seed_items() -> Vec<NewItem> {
    vec![
        NewItem::new("Cola", 150, 5, "cola.png"),
        NewItem::new("Green Tea", 120, 5, "tea.png"),
    ]
}
