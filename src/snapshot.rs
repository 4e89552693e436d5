//! Reads and writes the ledger snapshot: the complete list of transactions
//! serialized as one JSON array under a single key. The last issued ID is
//! kept under a second key so that IDs are not reused across restarts.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::{Error, Transaction, stores::KeyValueStore};

/// The key the snapshot is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "transactions";

/// Load the transactions stored under `key`.
///
/// This function never fails. A missing, empty or unreadable snapshot loads
/// as an empty ledger, and the problem is logged. A snapshot is unreadable if
/// it is not valid JSON, if any record is missing a field or breaks a
/// transaction invariant (blank description, amount not above zero), or if
/// two records share an ID.
pub fn load(storage: &impl KeyValueStore, key: &str) -> Vec<Transaction> {
    let payload = match storage.get(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            tracing::debug!("No snapshot stored under \"{key}\", starting with an empty ledger");
            return Vec::new();
        }
        Err(error) => {
            tracing::error!("Could not read snapshot \"{key}\", starting with an empty ledger: {error}");
            return Vec::new();
        }
    };

    if payload.trim().is_empty() {
        return Vec::new();
    }

    match parse(&payload) {
        Ok(transactions) => {
            tracing::debug!("Loaded {} transactions from \"{key}\"", transactions.len());
            transactions
        }
        Err(reason) => {
            tracing::warn!("Discarding malformed snapshot \"{key}\": {reason}");
            Vec::new()
        }
    }
}

/// Overwrite the snapshot under `key` with `transactions`.
///
/// # Errors
/// This function will return a:
/// - [Error::JSONSerializationError] if the transactions cannot be serialized,
/// - or the error from [KeyValueStore::set] if the write fails.
pub fn save(
    storage: &mut impl KeyValueStore,
    key: &str,
    transactions: &[Transaction],
) -> Result<(), Error> {
    let payload = serde_json::to_string(transactions)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    storage.set(key, &payload).inspect_err(|error| {
        tracing::error!("Could not save snapshot \"{key}\": {error}");
    })?;

    tracing::debug!("Saved {} transactions to \"{key}\"", transactions.len());

    Ok(())
}

/// The key the last issued ID is stored under, next to the snapshot under
/// `key`.
pub fn last_id_key(key: &str) -> String {
    format!("{key}.last_id")
}

/// Load the last ID issued by a ledger whose snapshot is stored under `key`.
///
/// Returns `None` if no ID was saved, e.g. by older versions that only wrote
/// the snapshot, or if the saved value cannot be read.
pub fn load_last_id(storage: &impl KeyValueStore, key: &str) -> Option<i128> {
    let key = last_id_key(key);

    let value = match storage.get(&key) {
        Ok(value) => value?,
        Err(error) => {
            tracing::error!("Could not read \"{key}\": {error}");
            return None;
        }
    };

    value
        .trim()
        .parse()
        .inspect_err(|error| tracing::warn!("Ignoring malformed last ID \"{value}\": {error}"))
        .ok()
}

/// Save `last_id` as the last ID issued by the ledger stored under `key`.
///
/// # Errors
/// Returns the error from [KeyValueStore::set] if the write fails.
pub fn save_last_id(
    storage: &mut impl KeyValueStore,
    key: &str,
    last_id: i128,
) -> Result<(), Error> {
    let key = last_id_key(key);

    storage
        .set(&key, &last_id.to_string())
        .inspect_err(|error| tracing::error!("Could not save \"{key}\": {error}"))
}

fn parse(payload: &str) -> Result<Vec<Transaction>, String> {
    let transactions: Vec<Transaction> =
        serde_json::from_str(payload).map_err(|error| error.to_string())?;

    let mut seen_ids = HashSet::new();

    for transaction in &transactions {
        if transaction.amount <= Decimal::ZERO {
            return Err(format!(
                "transaction {} has the non-positive amount {}",
                transaction.id, transaction.amount
            ));
        }

        if !seen_ids.insert(&transaction.id) {
            return Err(format!("the ID {} is used more than once", transaction.id));
        }
    }

    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use crate::{
        Description, Kind, Transaction, TransactionId,
        stores::{KeyValueStore, MemoryStore},
        test_utils::FailingStore,
    };

    use super::{DEFAULT_STORAGE_KEY, last_id_key, load, load_last_id, save, save_last_id};

    const KEY: &str = DEFAULT_STORAGE_KEY;

    fn create_transactions() -> Vec<Transaction> {
        vec![
            Transaction {
                id: TransactionId::new("1759651200000"),
                description: Description::new("Wages").unwrap(),
                amount: Decimal::new(1_500, 0),
                kind: Kind::Income,
                created_at: datetime!(2025-10-05 08:00:00 UTC),
            },
            Transaction {
                id: TransactionId::new("1759654800000"),
                description: Description::new("Coffee").unwrap(),
                amount: Decimal::new(55, 1),
                kind: Kind::Expense,
                created_at: datetime!(2025-10-05 09:00:00.25 UTC),
            },
        ]
    }

    #[test]
    fn load_missing_key_is_empty() {
        let store = MemoryStore::new();

        assert!(load(&store, KEY).is_empty());
    }

    #[test]
    fn load_malformed_payloads_is_empty() {
        let payloads = [
            "",
            "   ",
            "not json",
            "{\"id\": \"1\"}",
            "[{\"id\": \"1\"}]",
            r#"[{"id":"1","description":"","amount":5,"type":"income","date":"2025-10-05T08:00:00Z"}]"#,
            r#"[{"id":"1","description":"Rent","amount":0,"type":"expense","date":"2025-10-05T08:00:00Z"}]"#,
            r#"[{"id":"1","description":"Rent","amount":-3,"type":"expense","date":"2025-10-05T08:00:00Z"}]"#,
            r#"[{"id":"1","description":"Rent","amount":5,"type":"gift","date":"2025-10-05T08:00:00Z"}]"#,
            r#"[{"id":"1","description":"Rent","amount":5,"type":"expense","date":"yesterday"}]"#,
        ];

        for payload in payloads {
            let store = MemoryStore::with_value(KEY, payload);

            let got = load(&store, KEY);

            assert!(got.is_empty(), "want empty ledger for {payload:?}, got {got:?}");
        }
    }

    #[test]
    fn load_rejects_duplicate_ids() {
        let payload = r#"[
            {"id":"1","description":"Rent","amount":5,"type":"expense","date":"2025-10-05T08:00:00Z"},
            {"id":"1","description":"Wages","amount":9,"type":"income","date":"2025-10-05T09:00:00Z"}
        ]"#;
        let store = MemoryStore::with_value(KEY, payload);

        assert!(load(&store, KEY).is_empty());
    }

    #[test]
    fn load_read_failure_is_empty() {
        let (store, _) = FailingStore::new();
        let store = store.fail_reads();

        assert!(load(&store, KEY).is_empty());
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::new();
        let want = create_transactions();

        save(&mut store, KEY, &want).unwrap();
        let got = load(&store, KEY);

        assert_eq!(want, got);
    }

    #[test]
    fn save_of_load_reproduces_payload() {
        let mut original = MemoryStore::new();
        save(&mut original, KEY, &create_transactions()).unwrap();
        let want = original.get(KEY).unwrap().unwrap();

        let mut copy = MemoryStore::new();
        save(&mut copy, KEY, &load(&original, KEY)).unwrap();
        let got = copy.get(KEY).unwrap().unwrap();

        assert_eq!(want, got);
    }

    #[test]
    fn save_of_load_keeps_every_digit() {
        let payload = r#"[{"id":"1759651200000","description":"Fee","amount":12.345,"type":"expense","date":"2025-10-05T08:00:00Z"},{"id":"1759654800000","description":"Rounding","amount":0.001,"type":"income","date":"2025-10-05T09:00:00Z"}]"#;
        let original = MemoryStore::with_value(KEY, payload);

        let transactions = load(&original, KEY);
        let mut copy = MemoryStore::new();
        save(&mut copy, KEY, &transactions).unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].amount, Decimal::new(12_345, 3));
        assert_eq!(transactions[1].amount, Decimal::new(1, 3));
        assert_eq!(copy.get(KEY).unwrap().as_deref(), Some(payload));
    }

    #[test]
    fn loads_browser_era_payload() {
        let payload = r#"[{"id":"1700000000000","description":"Salary","amount":2500,"type":"income","date":"2023-11-14T22:13:20.000Z"},{"id":"1700000100000","description":"Groceries","amount":82.35,"type":"expense","date":"2023-11-14T22:15:00.000Z"}]"#;
        let store = MemoryStore::with_value(KEY, payload);

        let transactions = load(&store, KEY);

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].amount, Decimal::new(2_500, 0));
        assert_eq!(transactions[1].amount, Decimal::new(8_235, 2));
        assert_eq!(transactions[1].kind, Kind::Expense);

        let mut copy = MemoryStore::new();
        save(&mut copy, KEY, &transactions).unwrap();
        assert_eq!(load(&copy, KEY), transactions);
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let mut store = MemoryStore::new();
        let mut transactions = create_transactions();
        save(&mut store, KEY, &transactions).unwrap();

        transactions.pop();
        save(&mut store, KEY, &transactions).unwrap();

        assert_eq!(load(&store, KEY), transactions);
    }

    #[test]
    fn last_id_is_stored_next_to_the_snapshot() {
        let mut store = MemoryStore::new();

        save_last_id(&mut store, KEY, 1_759_651_200_001).unwrap();

        assert_eq!(load_last_id(&store, KEY), Some(1_759_651_200_001));
        assert_eq!(
            store.get(&last_id_key(KEY)),
            Ok(Some("1759651200001".to_owned()))
        );
        assert_eq!(store.get(KEY), Ok(None));
    }

    #[test]
    fn missing_or_malformed_last_id_is_none() {
        assert_eq!(load_last_id(&MemoryStore::new(), KEY), None);

        let store = MemoryStore::with_value(&last_id_key(KEY), "soon");
        assert_eq!(load_last_id(&store, KEY), None);

        let (store, _) = FailingStore::new();
        assert_eq!(load_last_id(&store.fail_reads(), KEY), None);
    }

    #[test]
    fn save_surfaces_write_failure() {
        let (mut store, switch) = FailingStore::new();
        switch.set(true);

        let result = save(&mut store, KEY, &create_transactions());

        assert!(result.is_err_and(|error| error.is_storage_error()));
    }
}
