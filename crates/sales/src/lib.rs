//! Sales domain module.
//!
//! Sale records, the sales-history view and the `sold_at` timestamp encoding.
//! Pure domain logic (no IO, no HTTP, no storage).

pub mod sale;
pub mod sold_at;

pub use sale::{Sale, SaleHistoryEntry, SalesSummary};
pub use sold_at::{decode_sold_at, display_sold_at, encode_sold_at};
