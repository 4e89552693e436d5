//! Query helpers for listing transactions.

use super::core::{Kind, Transaction};

/// Selects which transactions are returned by
/// [TransactionStore::list](crate::TransactionStore::list).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    /// Every transaction.
    #[default]
    All,
    /// Only [Kind::Income] transactions.
    IncomeOnly,
    /// Only [Kind::Expense] transactions.
    ExpenseOnly,
}

impl Filter {
    /// Whether a transaction of `kind` passes the filter.
    pub fn matches(self, kind: Kind) -> bool {
        match self {
            Filter::All => true,
            Filter::IncomeOnly => kind == Kind::Income,
            Filter::ExpenseOnly => kind == Kind::Expense,
        }
    }
}

/// Copy the transactions that pass `filter`, most recent first.
///
/// Transactions with the same timestamp keep their relative order from
/// `transactions`.
pub(super) fn filter_and_sort(transactions: &[Transaction], filter: Filter) -> Vec<Transaction> {
    let mut filtered: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| filter.matches(transaction.kind))
        .cloned()
        .collect();

    // `sort_by` is stable, which keeps ties in store order.
    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    filtered
}
