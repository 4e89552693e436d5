//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the validated types it is built from
//! - The `TransactionStore` that owns the ledger and persists it
//! - Listing with filters and the income/expense summary

mod core;
mod query;
mod store;
mod summary;

pub use self::core::{Description, Kind, Transaction, TransactionId};
pub use query::Filter;
pub use store::{StoreConfig, TransactionStore};
pub use summary::Summary;
