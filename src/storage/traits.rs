//! Store interface
//!
//! The engine, services and reports only talk to persistence through these
//! traits. Callers hand the store typed records and structured predicates;
//! the store assigns identifiers.

use crate::error::TallyResult;
use crate::models::{Category, Transaction, TransactionId, TransactionRecord, TransactionType};
use crate::query::ParsedFilter;

/// Create/read/update/delete of transaction records
pub trait TransactionStore {
    /// Persist a new record and return its freshly assigned id
    fn insert(&self, record: TransactionRecord) -> TallyResult<TransactionId>;

    /// Fetch one transaction
    fn get_by_id(&self, id: TransactionId) -> TallyResult<Option<Transaction>>;

    /// Replace the editable fields of a transaction
    ///
    /// Returns `false` when no transaction has that id.
    fn update(&self, id: TransactionId, record: TransactionRecord) -> TallyResult<bool>;

    /// Remove a transaction
    ///
    /// Returns `false` when no transaction has that id.
    fn delete(&self, id: TransactionId) -> TallyResult<bool>;

    /// Transactions matching the filter, in insertion order
    fn query(&self, filter: &ParsedFilter) -> TallyResult<Vec<Transaction>>;
}

/// Append-only category storage
pub trait CategoryStore {
    /// Persist a new category; uniqueness is checked by the caller
    fn insert_category(&self, name: &str, kind: TransactionType) -> TallyResult<Category>;

    /// Every stored category, in insertion order
    fn categories(&self) -> TallyResult<Vec<Category>>;
}
