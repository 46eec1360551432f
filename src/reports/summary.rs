//! Income / expense totals

use serde::Serialize;

use crate::models::{Money, Transaction, TransactionType};

/// Totals for a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SummaryResult {
    pub total_income: Money,
    pub total_expense: Money,
    /// `total_income - total_expense`; negative when spending exceeds income
    pub balance: Money,
    pub income_count: usize,
    pub expense_count: usize,
}

impl SummaryResult {
    /// Number of transactions that went into the totals
    pub fn transaction_count(&self) -> usize {
        self.income_count + self.expense_count
    }
}

/// Sum income and expense separately
pub fn summarize(records: &[Transaction]) -> SummaryResult {
    let mut summary = SummaryResult::default();

    for txn in records {
        match txn.kind {
            TransactionType::Income => {
                summary.total_income += txn.amount;
                summary.income_count += 1;
            }
            TransactionType::Expense => {
                summary.total_expense += txn.amount;
                summary.expense_count += 1;
            }
        }
    }

    summary.balance = summary.total_income - summary.total_expense;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionId, TransactionRecord};
    use chrono::NaiveDate;

    fn txn(id: u64, kind: TransactionType, category: &str, cents: i64, day: u32) -> Transaction {
        Transaction::from_record(
            TransactionId::new(id),
            TransactionRecord::new(
                kind,
                category,
                Money::from_cents(cents),
                NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            ),
        )
    }

    #[test]
    fn test_empty_set_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_income, Money::zero());
        assert_eq!(summary.total_expense, Money::zero());
        assert_eq!(summary.balance, Money::zero());
        assert_eq!(summary.transaction_count(), 0);
    }

    #[test]
    fn test_example_totals() {
        let records = vec![
            txn(1, TransactionType::Income, "Salary", 100000, 5),
            txn(2, TransactionType::Expense, "Food", 4550, 6),
            txn(3, TransactionType::Expense, "Food", 1000, 7),
        ];
        let summary = summarize(&records);

        assert_eq!(summary.total_income, Money::from_cents(100000));
        assert_eq!(summary.total_expense, Money::from_cents(5550));
        assert_eq!(summary.balance, Money::from_cents(94450));
        assert_eq!(summary.income_count, 1);
        assert_eq!(summary.expense_count, 2);
    }

    #[test]
    fn test_negative_balance() {
        let records = vec![
            txn(1, TransactionType::Income, "Salary", 1000, 1),
            txn(2, TransactionType::Expense, "Housing", 2500, 2),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.balance, Money::from_cents(-1500));
        assert_eq!(summary.balance, summary.total_income - summary.total_expense);
    }

    #[test]
    fn test_cent_sums_are_exact() {
        let records: Vec<_> = (1..=10)
            .map(|i| txn(i, TransactionType::Expense, "Food", 10, 1))
            .collect();
        assert_eq!(summarize(&records).total_expense, Money::from_cents(100));
    }
}
