//! Defines the crate level error type.

use crate::transaction::TransactionId;

/// The errors that may occur when working with the ledger.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty (or whitespace only) string was used as a transaction description.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// The amount was not a finite number greater than zero.
    ///
    /// Callers should pass in the text or number that was rejected.
    #[error("\"{0}\" is not a valid amount, amounts must be numbers greater than zero")]
    InvalidAmount(String),

    /// The text could not be parsed as a transaction kind.
    #[error("\"{0}\" is not a valid transaction type, expected \"income\" or \"expense\"")]
    InvalidKind(String),

    /// Tried to update a transaction that does not exist
    #[error("tried to update the transaction {0}, which is not in the ledger")]
    UpdateMissingTransaction(TransactionId),

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete the transaction {0}, which is not in the ledger")]
    DeleteMissingTransaction(TransactionId),

    /// The key-value backend failed to read or write.
    ///
    /// When this is returned from a mutation, the in-memory ledger already
    /// holds the change but the persisted snapshot does not. Call
    /// [TransactionStore::persist](crate::TransactionStore::persist) to retry.
    #[error("could not access storage: {0}")]
    StorageError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while serializing the ledger as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl Error {
    /// Whether the error was caused by invalid input.
    ///
    /// Validation errors never change the ledger, the caller should ask for
    /// corrected input and try again.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyDescription | Error::InvalidAmount(_) | Error::InvalidKind(_)
        )
    }

    /// Whether the error refers to a transaction ID that is not in the ledger.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::UpdateMissingTransaction(_) | Error::DeleteMissingTransaction(_)
        )
    }

    /// Whether the error came from persisting the ledger.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Error::StorageError(_) | Error::DatabaseLockError | Error::JSONSerializationError(_)
        )
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::StorageError(value.to_string())
    }
}
