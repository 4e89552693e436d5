//! Cashbook is a small ledger for tracking income and expenses.
//!
//! The [TransactionStore] owns the list of transactions. It validates every
//! change, writes a snapshot of the whole ledger to a [KeyValueStore] after
//! each one, and answers the queries a user interface needs: a filtered list
//! of transactions, most recent first, and a [Summary] of the totals.

#![warn(missing_docs)]

mod amount;
mod clock;
pub mod db;
mod error;
pub mod snapshot;
pub mod stores;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use amount::{parse_amount, positive_amount};
pub use clock::{Clock, SystemClock};
pub use error::Error;
pub use stores::{KeyValueStore, MemoryStore, SqliteStore};
pub use transaction::{
    Description, Filter, Kind, StoreConfig, Summary, Transaction, TransactionId, TransactionStore,
};
