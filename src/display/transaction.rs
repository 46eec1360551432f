//! Transaction display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::date::format_date;
use crate::models::{Money, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Format transactions as a table, in the order given
pub fn format_transaction_table(transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.value(),
        date: format_date(txn.date),
        kind: txn.kind.to_string(),
        category: txn.category.clone(),
        amount: txn.amount.format_with_symbol(currency),
        description: truncate(txn.description_text(), 40),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));

    let total: Money = transactions.iter().map(|t| t.signed_amount()).sum();
    format!(
        "{}\n\n{} transaction(s), net {}",
        table,
        transactions.len(),
        total.format_with_symbol(currency)
    )
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: #{}\n", txn.id));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Date:        {}\n", format_date(txn.date)));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(currency)
    ));
    if let Some(description) = &txn.description {
        output.push_str(&format!("Description: {}\n", description));
    }
    output.push_str(&format!(
        "Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if txn.updated_at != txn.created_at {
        output.push_str(&format!(
            "Updated:     {}\n",
            txn.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output
}

/// Truncate to `max_len` characters, marking the cut with "..."
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionId, TransactionRecord, TransactionType};
    use chrono::NaiveDate;

    fn sample(id: u64, kind: TransactionType, category: &str, cents: i64) -> Transaction {
        Transaction::from_record(
            TransactionId::new(id),
            TransactionRecord::new(
                kind,
                category,
                Money::from_cents(cents),
                NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
            )
            .with_description("Weekly shop"),
        )
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_transaction_table(&[], "$"), "No transactions found.");
    }

    #[test]
    fn test_table_contents() {
        let txns = vec![
            sample(1, TransactionType::Income, "Salary", 100000),
            sample(2, TransactionType::Expense, "Food", 4550),
        ];
        let table = format_transaction_table(&txns, "$");

        assert!(table.contains("Category"));
        assert!(table.contains("Salary"));
        assert!(table.contains("$45.50"));
        assert!(table.contains("2 transaction(s), net $954.50"));
    }

    #[test]
    fn test_details() {
        let txn = sample(7, TransactionType::Expense, "Food", 1000);
        let details = format_transaction_details(&txn, "€");
        assert!(details.contains("Transaction: #7"));
        assert!(details.contains("Amount:      €10.00"));
        assert!(details.contains("Description: Weekly shop"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a rather long description", 10), "a rathe...");
    }
}
