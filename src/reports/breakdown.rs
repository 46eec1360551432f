//! Per-category totals for one transaction type

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Money, Transaction, TransactionType};

/// Sum and count for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
}

/// Category totals, largest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CategoryBreakdown {
    /// No transactions of the requested type
    Empty,
    /// Sorted by total descending, then category name ascending
    Totals(Vec<CategoryTotal>),
}

impl CategoryBreakdown {
    pub fn entries(&self) -> &[CategoryTotal] {
        match self {
            Self::Empty => &[],
            Self::Totals(entries) => entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Sum over all categories
    pub fn total(&self) -> Money {
        self.entries().iter().map(|e| e.total).sum()
    }

    /// Number of transactions across all categories
    pub fn transaction_count(&self) -> usize {
        self.entries().iter().map(|e| e.count).sum()
    }
}

/// Group transactions of `kind` by category
pub fn breakdown_by_category(records: &[Transaction], kind: TransactionType) -> CategoryBreakdown {
    let mut groups: BTreeMap<&str, (Money, usize)> = BTreeMap::new();

    for txn in records.iter().filter(|t| t.kind == kind) {
        let entry = groups
            .entry(txn.category.as_str())
            .or_insert((Money::zero(), 0));
        entry.0 += txn.amount;
        entry.1 += 1;
    }

    if groups.is_empty() {
        return CategoryBreakdown::Empty;
    }

    let mut totals: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            count,
        })
        .collect();
    totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

    CategoryBreakdown::Totals(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionId, TransactionRecord};
    use crate::reports::summary::summarize;
    use chrono::NaiveDate;

    fn txn(id: u64, kind: TransactionType, category: &str, cents: i64) -> Transaction {
        Transaction::from_record(
            TransactionId::new(id),
            TransactionRecord::new(
                kind,
                category,
                Money::from_cents(cents),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ),
        )
    }

    #[test]
    fn test_example_expense_breakdown() {
        let records = vec![
            txn(1, TransactionType::Income, "Salary", 100000),
            txn(2, TransactionType::Expense, "Food", 4550),
            txn(3, TransactionType::Expense, "Food", 1000),
        ];

        let breakdown = breakdown_by_category(&records, TransactionType::Expense);
        assert_eq!(
            breakdown,
            CategoryBreakdown::Totals(vec![CategoryTotal {
                category: "Food".into(),
                total: Money::from_cents(5550),
                count: 2,
            }])
        );
    }

    #[test]
    fn test_no_records_of_type_is_empty_variant() {
        let records = vec![txn(1, TransactionType::Expense, "Food", 100)];
        let breakdown = breakdown_by_category(&records, TransactionType::Income);
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.total(), Money::zero());
        assert!(breakdown_by_category(&[], TransactionType::Expense).is_empty());
    }

    #[test]
    fn test_ordering_with_tie_break() {
        let records = vec![
            txn(1, TransactionType::Expense, "Travel", 500),
            txn(2, TransactionType::Expense, "Books", 2000),
            txn(3, TransactionType::Expense, "Food", 2000),
            txn(4, TransactionType::Expense, "Rent", 90000),
            txn(5, TransactionType::Expense, "Travel", 100),
        ];

        let breakdown = breakdown_by_category(&records, TransactionType::Expense);
        let order: Vec<_> = breakdown
            .entries()
            .iter()
            .map(|e| (e.category.as_str(), e.total.cents()))
            .collect();
        assert_eq!(
            order,
            vec![("Rent", 90000), ("Books", 2000), ("Food", 2000), ("Travel", 600)]
        );
    }

    #[test]
    fn test_group_totals_match_summary() {
        let records = vec![
            txn(1, TransactionType::Income, "Salary", 250000),
            txn(2, TransactionType::Income, "Freelance", 12345),
            txn(3, TransactionType::Expense, "Food", 999),
            txn(4, TransactionType::Expense, "Utilities", 4501),
            txn(5, TransactionType::Income, "Salary", 1),
        ];
        let summary = summarize(&records);

        let income = breakdown_by_category(&records, TransactionType::Income);
        let expense = breakdown_by_category(&records, TransactionType::Expense);
        assert_eq!(income.total(), summary.total_income);
        assert_eq!(expense.total(), summary.total_expense);
        assert_eq!(income.transaction_count(), summary.income_count);
    }
}
