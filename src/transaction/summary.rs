//! Totals derived from the transactions in the ledger.

use rust_decimal::Decimal;

use super::core::{Kind, Transaction};

/// The running totals of a ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// The sum of all income.
    pub total_income: Decimal,
    /// The sum of all expenses.
    pub total_expense: Decimal,
    /// Income minus expenses. Negative when more was spent than earned.
    pub net_balance: Decimal,
}

impl Summary {
    /// Total the amounts of `transactions` by kind.
    ///
    /// Totals saturate at the largest value a [Decimal] can hold.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let total_of = |kind: Kind| -> Decimal {
            transactions
                .iter()
                .filter(|transaction| transaction.kind == kind)
                .fold(Decimal::ZERO, |total, transaction| {
                    total.saturating_add(transaction.amount)
                })
        };

        let total_income = total_of(Kind::Income);
        let total_expense = total_of(Kind::Expense);

        Self {
            total_income,
            total_expense,
            net_balance: total_income.saturating_sub(total_expense),
        }
    }
}
