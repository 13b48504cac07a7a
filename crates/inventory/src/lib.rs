//! Inventory domain module.
//!
//! This crate contains the vending-machine business rules for items: the
//! purchase decision, the restock rule, the catalog view and the seed list,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod catalog;
pub mod item;
pub mod purchase;

pub use catalog::{CatalogEntry, is_image_file, merge_catalog, name_from_filename};
pub use item::{Item, NewItem, RESTOCK_INCREMENT, seed_items};
pub use purchase::{InsertedMoney, PurchaseDecision, PurchaseError, decide_purchase};
