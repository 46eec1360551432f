//! Flat export rows

use serde::Serialize;

use crate::models::date::format_date;
use crate::models::Transaction;

/// Column names, in order
pub const EXPORT_HEADER: [&str; 5] = ["Type", "Category", "Amount", "Description", "Date"];

/// One transaction as a row of text cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Category")]
    pub category: String,
    /// Two fractional digits, no currency symbol
    #[serde(rename = "Amount")]
    pub amount: String,
    /// Empty when the transaction has no description
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Date")]
    pub date: String,
}

impl From<&Transaction> for ExportRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            kind: txn.kind.as_str().to_string(),
            category: txn.category.clone(),
            amount: txn.amount.to_decimal_string(),
            description: txn.description_text().to_string(),
            date: format_date(txn.date),
        }
    }
}

/// Map transactions to rows, keeping their order
pub fn to_rows(records: &[Transaction]) -> Vec<ExportRow> {
    records.iter().map(ExportRow::from).collect()
}
