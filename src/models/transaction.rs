//! Transaction model
//!
//! A transaction is a single dated money movement, typed income or expense,
//! filed under a category of the same type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::date::format_date;
use super::ids::TransactionId;
use super::money::Money;

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Both types, income first
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    /// Lowercase name as stored and exported
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// The opposite type
    pub fn other(&self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction type '{}'. Use 'income' or 'expense'",
                other
            )),
        }
    }
}

/// The user-editable fields of a transaction, already parsed and typed
///
/// This is what gets handed to the store on insert and update; the store
/// owns the identifier and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Income or expense
    pub kind: TransactionType,

    /// Category name, canonical casing as registered
    pub category: String,

    /// Always positive; direction comes from `kind`
    pub amount: Money,

    /// Optional free text
    pub description: Option<String>,

    /// Calendar date, no time component
    pub date: NaiveDate,
}

impl TransactionRecord {
    /// Create a record without a description
    pub fn new(
        kind: TransactionType,
        category: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            category: category.into(),
            amount,
            description: None,
            date,
        }
    }

    /// Attach a description; blank text is treated as no description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_description(Some(description.into()));
        self
    }
}

/// A stored transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier, immutable after creation
    pub id: TransactionId,

    /// Income or expense
    pub kind: TransactionType,

    /// Category name
    pub category: String,

    /// Positive amount
    pub amount: Money,

    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Transaction date
    pub date: NaiveDate,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Materialize a record under a freshly assigned id
    pub fn from_record(id: TransactionId, record: TransactionRecord) -> Self {
        let now = Utc::now();
        Self {
            id,
            kind: record.kind,
            category: record.category,
            amount: record.amount,
            description: record.description,
            date: record.date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field in place, keeping id and creation time
    pub fn apply(&mut self, record: TransactionRecord) {
        self.kind = record.kind;
        self.category = record.category;
        self.amount = record.amount;
        self.description = record.description;
        self.date = record.date;
        self.updated_at = Utc::now();
    }

    /// Description text, empty when absent
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Signed amount: positive for income, negative for expense
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} ({})",
            self.id,
            format_date(self.date),
            self.kind,
            self.category,
            self.amount
        )
    }
}

/// Trim a description, mapping blank text to `None`
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()
    }

    #[test]
    fn test_type_parse() {
        assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!(" Expense ".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert!("transfer".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_type_serialization() {
        let json = serde_json::to_string(&TransactionType::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
    }

    #[test]
    fn test_from_record_round_trip() {
        let record = TransactionRecord::new(
            TransactionType::Expense,
            "Food",
            Money::from_cents(4550),
            test_date(),
        )
        .with_description("Groceries");

        let txn = Transaction::from_record(TransactionId::new(2), record.clone());
        assert_eq!(txn.id, TransactionId::new(2));
        assert_eq!(txn.kind, TransactionType::Expense);
        assert_eq!(txn.category, "Food");
        assert_eq!(txn.amount, record.amount);
        assert_eq!(txn.description.as_deref(), Some("Groceries"));
        assert_eq!(txn.signed_amount(), Money::from_cents(-4550));
    }

    #[test]
    fn test_apply_keeps_identity() {
        let record =
            TransactionRecord::new(TransactionType::Income, "Salary", Money::from_cents(100), test_date());
        let mut txn = Transaction::from_record(TransactionId::new(1), record);
        let created = txn.created_at;

        let replacement =
            TransactionRecord::new(TransactionType::Expense, "Food", Money::from_cents(250), test_date());
        txn.apply(replacement.clone());

        assert_eq!(txn.id, TransactionId::new(1));
        assert_eq!(txn.created_at, created);
        assert_eq!(txn.kind, replacement.kind);
        assert_eq!(txn.category, replacement.category);
        assert_eq!(txn.amount, replacement.amount);
    }

    #[test]
    fn test_blank_description_is_none() {
        let record =
            TransactionRecord::new(TransactionType::Income, "Salary", Money::from_cents(100), test_date())
                .with_description("   ");
        assert_eq!(record.description, None);
    }

    #[test]
    fn test_display() {
        let record =
            TransactionRecord::new(TransactionType::Expense, "Food", Money::from_cents(1000), test_date());
        let txn = Transaction::from_record(TransactionId::new(3), record);
        assert_eq!(txn.to_string(), "#3 2024-01-06 expense Food ($10.00)");
    }
}
