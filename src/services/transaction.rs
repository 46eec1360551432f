//! Transaction service
//!
//! Parses raw user input into typed records, validates them against the
//! category registry and hands them to the store. Nothing is written unless
//! every field is valid.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::error::{TallyError, TallyResult};
use crate::models::date::{format_date, parse_date};
use crate::models::transaction::normalize_description;
use crate::models::{Money, Transaction, TransactionId, TransactionRecord, TransactionType};
use crate::query::{self, FilterSpec};
use crate::storage::{CategoryStore, TransactionStore};

use super::category::CategoryRegistry;

/// Raw transaction fields as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionInput {
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub description: Option<String>,
    /// `None` means today; a present value must be a valid date
    pub date: Option<String>,
}

impl TransactionInput {
    pub fn new(
        kind: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            category: category.into(),
            amount: amount.into(),
            description: None,
            date: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// The current fields of a stored transaction, as text
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            amount: txn.amount.to_decimal_string(),
            description: txn.description.clone(),
            date: Some(format_date(txn.date)),
        }
    }

    /// Parse every field except the category lookup
    ///
    /// The returned record carries the category name as typed; `validate`
    /// replaces it with the registered name.
    pub fn parse(&self) -> TallyResult<TransactionRecord> {
        let kind: TransactionType = self
            .kind
            .parse()
            .map_err(TallyError::InvalidInput)?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err(TallyError::InvalidInput("Category is required".into()));
        }

        let amount = parse_amount(&self.amount)?;

        let date = match &self.date {
            None => Local::now().date_naive(),
            Some(raw) => parse_date("date", raw.trim())?,
        };

        Ok(TransactionRecord {
            kind,
            category: category.to_string(),
            amount,
            description: normalize_description(self.description.clone()),
            date,
        })
    }
}

/// Field-by-field changes for an edit; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionEdit {
    pub kind: Option<String>,
    pub category: Option<String>,
    pub amount: Option<String>,
    /// `Some("")` clears the description
    pub description: Option<String>,
    pub date: Option<String>,
}

impl TransactionEdit {
    /// Whether the edit changes nothing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn merge_into(self, mut input: TransactionInput) -> TransactionInput {
        if let Some(kind) = self.kind {
            input.kind = kind;
        }
        if let Some(category) = self.category {
            input.category = category;
        }
        if let Some(amount) = self.amount {
            input.amount = amount;
        }
        if let Some(description) = self.description {
            input.description = Some(description);
        }
        if let Some(date) = self.date {
            input.date = Some(date);
        }
        input
    }
}

/// Largest accepted amount: 100 billion in whole units
///
/// Keeps report totals far from the `i64` cents limit.
pub const MAX_AMOUNT: Money = Money::from_cents(10_000_000_000_000);

/// Parse a positive amount with at most two fractional digits
pub fn parse_amount(raw: &str) -> TallyResult<Money> {
    let amount = Money::parse(raw)
        .map_err(|e| TallyError::InvalidInput(format!("Invalid amount '{}': {}", raw.trim(), e)))?;
    if !amount.is_positive() {
        return Err(TallyError::InvalidInput(format!(
            "Amount must be greater than zero, got {}",
            raw.trim()
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(TallyError::InvalidInput(format!(
            "Amount {} exceeds the maximum of {}",
            raw.trim(),
            MAX_AMOUNT
        )));
    }
    Ok(amount)
}

/// Service for transaction management
pub struct TransactionService<'a, S>
where
    S: TransactionStore + CategoryStore + ?Sized,
{
    store: &'a S,
    categories: CategoryRegistry<'a, S>,
}

impl<'a, S> TransactionService<'a, S>
where
    S: TransactionStore + CategoryStore + ?Sized,
{
    /// Create a new transaction service
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            categories: CategoryRegistry::new(store),
        }
    }

    /// Fully validate input into a record ready for the store
    pub fn validate(&self, input: &TransactionInput) -> TallyResult<TransactionRecord> {
        let mut record = input.parse()?;
        let category = self.categories.require(&record.category, record.kind)?;
        record.category = category.name;
        Ok(record)
    }

    /// Create a transaction
    pub fn add(&self, input: TransactionInput) -> TallyResult<Transaction> {
        let record = self.validate(&input)?;
        debug!(?record, "adding transaction");

        let id = self.store.insert(record)?;
        self.get(id)
    }

    /// Get a transaction, failing when it does not exist
    pub fn get(&self, id: TransactionId) -> TallyResult<Transaction> {
        self.store
            .get_by_id(id)?
            .ok_or_else(|| TallyError::transaction_not_found(id.to_string()))
    }

    /// Apply an edit, re-validating every field of the result
    pub fn update(&self, id: TransactionId, edit: TransactionEdit) -> TallyResult<Transaction> {
        let current = self.get(id)?;
        let input = edit.merge_into(TransactionInput::from_transaction(&current));
        let record = self.validate(&input)?;

        if !self.store.update(id, record)? {
            return Err(TallyError::transaction_not_found(id.to_string()));
        }
        self.get(id)
    }

    /// Delete a transaction, returning what was removed
    pub fn delete(&self, id: TransactionId) -> TallyResult<Transaction> {
        let existing = self.get(id)?;
        if !self.store.delete(id)? {
            return Err(TallyError::transaction_not_found(id.to_string()));
        }
        Ok(existing)
    }

    /// Filtered transactions, newest first
    pub fn list(&self, spec: &FilterSpec) -> TallyResult<Vec<Transaction>> {
        query::run(self.store, spec)
    }
}
