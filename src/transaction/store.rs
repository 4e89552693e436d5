//! Defines the transaction store, which owns the ledger and keeps its
//! persisted snapshot up to date.

use time::OffsetDateTime;

use crate::{Clock, Error, SystemClock, positive_amount, snapshot, stores::KeyValueStore};

use super::{
    core::{Description, Kind, Transaction, TransactionId},
    query::{Filter, filter_and_sort},
    summary::Summary,
};

/// Settings for a [TransactionStore].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// The key the snapshot is read from and written to.
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: snapshot::DEFAULT_STORAGE_KEY.to_owned(),
        }
    }
}

/// Owns the ledger of transactions and every change made to it.
///
/// The store is hydrated from `storage` when it is created and writes the
/// full snapshot back after every successful change, so the two stay in
/// step. Changes require `&mut self`; callers that share a store between
/// threads should wrap it in a mutex so that only one change is in flight.
///
/// # Examples
///
/// ```
/// use cashbook_rs::{Filter, Kind, MemoryStore, TransactionStore};
/// use rust_decimal::Decimal;
///
/// let mut store = TransactionStore::new(MemoryStore::new());
/// store.add("Wages", 100.0, Kind::Income).unwrap();
/// store.add("Rent", 40.25, Kind::Expense).unwrap();
///
/// assert_eq!(store.list(Filter::IncomeOnly).len(), 1);
/// assert_eq!(store.summary().net_balance, Decimal::new(5_975, 2));
/// ```
#[derive(Debug)]
pub struct TransactionStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    config: StoreConfig,
    transactions: Vec<Transaction>,
    /// The largest numeric ID issued, loaded or persisted so far.
    last_issued_id: i128,
}

impl<S: KeyValueStore> TransactionStore<S> {
    /// Create a store that loads from and saves to `storage` under the
    /// default key, stamping transactions with the system time.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, SystemClock, StoreConfig::default())
    }
}

impl<S: KeyValueStore, C: Clock> TransactionStore<S, C> {
    /// Create a store with a custom clock and configuration.
    ///
    /// A missing or malformed snapshot results in an empty ledger, see
    /// [snapshot::load].
    ///
    /// New IDs continue after the largest of the IDs in the snapshot and the
    /// last issued ID saved by [snapshot::save_last_id], so the ID of a
    /// transaction that was removed before the store was reopened is not
    /// issued again.
    pub fn with_config(storage: S, clock: C, config: StoreConfig) -> Self {
        let transactions = snapshot::load(&storage, &config.storage_key);

        let last_issued_id = transactions
            .iter()
            .filter_map(|transaction| transaction.id.as_ref().parse::<i64>().ok())
            .map(i128::from)
            .chain(snapshot::load_last_id(&storage, &config.storage_key))
            .max()
            .unwrap_or(0);

        Self {
            storage,
            clock,
            config,
            transactions,
            last_issued_id,
        }
    }

    /// Record a new transaction.
    ///
    /// The transaction is given a fresh ID and stamped with the current time.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyDescription] if `description` is blank,
    /// - [Error::InvalidAmount] if `amount` is not a finite number greater than zero,
    /// - or a storage error if the snapshot could not be saved. In this case
    ///   the transaction has been added in memory but is not yet durable.
    pub fn add(
        &mut self,
        description: &str,
        amount: f64,
        kind: Kind,
    ) -> Result<Transaction, Error> {
        let description = Description::new(description)?;
        let amount = positive_amount(amount)?;

        let created_at = self.clock.now();
        let transaction = Transaction {
            id: self.next_id(created_at),
            description,
            amount,
            kind,
            created_at,
        };

        self.transactions.push(transaction.clone());
        tracing::debug!("Added transaction {}", transaction.id);
        self.persist()?;

        Ok(transaction)
    }

    /// Replace the transaction with the ID `id`.
    ///
    /// The transaction keeps its ID and its place in the ledger, and its
    /// timestamp is reset to the current time.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyDescription] or [Error::InvalidAmount] if the new values are invalid,
    /// - [Error::UpdateMissingTransaction] if `id` is not in the ledger,
    /// - or a storage error if the snapshot could not be saved.
    pub fn update(
        &mut self,
        id: &TransactionId,
        description: &str,
        amount: f64,
        kind: Kind,
    ) -> Result<Transaction, Error> {
        let description = Description::new(description)?;
        let amount = positive_amount(amount)?;

        let index = self
            .position(id)
            .ok_or_else(|| Error::UpdateMissingTransaction(id.clone()))?;

        let transaction = Transaction {
            id: id.clone(),
            description,
            amount,
            kind,
            created_at: self.clock.now(),
        };

        self.transactions[index] = transaction.clone();
        tracing::debug!("Updated transaction {id}");
        self.persist()?;

        Ok(transaction)
    }

    /// Delete the transaction with the ID `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingTransaction] if `id` is not in the ledger,
    ///   including when it has already been deleted,
    /// - or a storage error if the snapshot could not be saved.
    pub fn remove(&mut self, id: &TransactionId) -> Result<(), Error> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::DeleteMissingTransaction(id.clone()))?;

        self.transactions.remove(index);
        tracing::debug!("Removed transaction {id}");
        self.persist()
    }

    /// Get the transactions that pass `filter`, most recent first.
    ///
    /// Transactions with the same timestamp are returned in the order they
    /// are held in the ledger.
    pub fn list(&self, filter: Filter) -> Vec<Transaction> {
        filter_and_sort(&self.transactions, filter)
    }

    /// Total income, total expenses and the balance between them.
    pub fn summary(&self) -> Summary {
        Summary::from_transactions(&self.transactions)
    }

    /// Look up a transaction by its ID.
    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| &transaction.id == id)
    }

    /// The number of transactions in the ledger.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the ledger has no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Write the full ledger, and the last issued ID, to storage.
    ///
    /// Every change already does this. Call it directly to retry after a
    /// change returned a storage error.
    ///
    /// # Errors
    /// Returns a storage error if the snapshot or the last issued ID could
    /// not be saved.
    pub fn persist(&mut self) -> Result<(), Error> {
        snapshot::save(
            &mut self.storage,
            &self.config.storage_key,
            &self.transactions,
        )?;

        snapshot::save_last_id(
            &mut self.storage,
            &self.config.storage_key,
            self.last_issued_id,
        )
    }

    /// The backend the ledger is persisted to.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn position(&self, id: &TransactionId) -> Option<usize> {
        self.transactions
            .iter()
            .position(|transaction| &transaction.id == id)
    }

    /// Create an ID from the millisecond timestamp of `now`.
    ///
    /// IDs only ever increase, so two transactions created in the same
    /// millisecond, or after the system clock moved backwards, still get
    /// distinct IDs.
    fn next_id(&mut self, now: OffsetDateTime) -> TransactionId {
        let millis = now.unix_timestamp_nanos() / 1_000_000;
        let mut candidate = millis.max(self.last_issued_id + 1);

        // Non-numeric IDs from older snapshots are not covered by `last_issued_id`.
        while self.position(&TransactionId::new(&candidate.to_string())).is_some() {
            candidate += 1;
        }

        self.last_issued_id = candidate;
        TransactionId::new(&candidate.to_string())
    }
}
