//! Contains the key-value store trait and its implementations, which the
//! ledger [snapshot](crate::snapshot) is persisted to.

mod key_value;
mod sqlite;

pub use key_value::{KeyValueStore, MemoryStore};
pub use sqlite::{SqliteStore, create_key_value_table};
