//! Sets up the SQLite database used by [SqliteStore](crate::stores::SqliteStore).

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, stores::create_key_value_table};

/// Create the tables the ledger needs, if they do not exist yet.
///
/// # Errors
/// Returns an [Error::StorageError] if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_key_value_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
