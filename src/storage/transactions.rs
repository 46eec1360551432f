//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{TallyError, TallyResult};
use crate::models::{Transaction, TransactionId, TransactionRecord};
use crate::query::ParsedFilter;

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of transactions.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct TransactionData {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

struct Inner {
    next_id: TransactionId,
    records: BTreeMap<TransactionId, Transaction>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            next_id: TransactionId::new(1),
            records: BTreeMap::new(),
        }
    }
}

/// Repository for transaction persistence
///
/// Ids increase monotonically, so iterating the map yields insertion order.
pub struct TransactionRepository {
    path: PathBuf,
    inner: RwLock<Inner>,
}

impl TransactionRepository {
    /// Create a repository backed by `path`; nothing is read until `load`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> TallyResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;
        let mut inner = self.write()?;

        inner.records = file_data
            .transactions
            .into_iter()
            .map(|txn| (txn.id, txn))
            .collect();

        // Never hand out an id at or below one already on disk
        let after_max = inner
            .records
            .keys()
            .next_back()
            .map(|id| id.next().value())
            .unwrap_or(1);
        inner.next_id = TransactionId::new(file_data.next_id.max(after_max).max(1));

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> TallyResult<()> {
        let inner = self.read()?;
        let file_data = TransactionData {
            next_id: inner.next_id.value(),
            transactions: inner.records.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by id
    pub fn get(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    /// All transactions in insertion order
    pub fn get_all(&self) -> TallyResult<Vec<Transaction>> {
        Ok(self.read()?.records.values().cloned().collect())
    }

    /// Transactions matching a filter, in insertion order
    pub fn query(&self, filter: &ParsedFilter) -> TallyResult<Vec<Transaction>> {
        Ok(self
            .read()?
            .records
            .values()
            .filter(|txn| filter.matches(txn))
            .cloned()
            .collect())
    }

    /// Assign the next id to `record` and store it
    pub fn insert(&self, record: TransactionRecord) -> TallyResult<Transaction> {
        let mut inner = self.write()?;
        let id = inner.next_id;
        inner.next_id = id.next();

        let txn = Transaction::from_record(id, record);
        inner.records.insert(id, txn.clone());
        Ok(txn)
    }

    /// Replace a transaction's fields, returning (before, after) when it exists
    pub fn update(
        &self,
        id: TransactionId,
        record: TransactionRecord,
    ) -> TallyResult<Option<(Transaction, Transaction)>> {
        let mut inner = self.write()?;
        Ok(inner.records.get_mut(&id).map(|txn| {
            let before = txn.clone();
            txn.apply(record);
            (before, txn.clone())
        }))
    }

    /// Remove a transaction, returning it when it existed
    pub fn delete(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        Ok(self.write()?.records.remove(&id))
    }

    /// Put a transaction back exactly as given, id and timestamps included
    pub(crate) fn restore(&self, txn: Transaction) -> TallyResult<()> {
        self.write()?.records.insert(txn.id, txn);
        Ok(())
    }

    /// Count transactions
    pub fn count(&self) -> TallyResult<usize> {
        Ok(self.read()?.records.len())
    }

    fn read(&self) -> TallyResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> TallyResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn record(category: &str, cents: i64, day: u32) -> TransactionRecord {
        TransactionRecord::new(
            TransactionType::Expense,
            category,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
    }

    #[test]
    fn test_empty_repository() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let (_temp_dir, repo) = create_test_repo();
        let first = repo.insert(record("Food", 100, 5)).unwrap();
        let second = repo.insert(record("Food", 200, 6)).unwrap();

        assert_eq!(first.id, TransactionId::new(1));
        assert_eq!(second.id, TransactionId::new(2));
    }

    #[test]
    fn test_ids_not_reused_after_delete_and_reload() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(record("Food", 100, 5)).unwrap();
        let second = repo.insert(record("Food", 200, 6)).unwrap();
        repo.delete(second.id).unwrap();
        repo.save().unwrap();

        repo.load().unwrap();
        let third = repo.insert(record("Travel", 300, 7)).unwrap();
        assert_eq!(third.id, TransactionId::new(3));
    }

    #[test]
    fn test_save_and_load_keeps_insertion_order() {
        let (temp_dir, repo) = create_test_repo();
        repo.insert(record("Food", 100, 9)).unwrap();
        repo.insert(record("Travel", 200, 2)).unwrap();
        repo.save().unwrap();

        let reloaded = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        reloaded.load().unwrap();
        let categories: Vec<_> = reloaded
            .get_all()
            .unwrap()
            .into_iter()
            .map(|t| t.category)
            .collect();
        assert_eq!(categories, vec!["Food", "Travel"]);
    }

    #[test]
    fn test_update_and_delete_missing() {
        let (_temp_dir, repo) = create_test_repo();
        let missing = TransactionId::new(99);
        assert!(repo.update(missing, record("Food", 1, 1)).unwrap().is_none());
        assert!(repo.delete(missing).unwrap().is_none());
    }

    #[test]
    fn test_update_returns_before_and_after() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = repo.insert(record("Food", 100, 5)).unwrap();

        let (before, after) = repo.update(txn.id, record("Food", 250, 5)).unwrap().unwrap();
        assert_eq!(before.amount, Money::from_cents(100));
        assert_eq!(after.amount, Money::from_cents(250));
        assert_eq!(after.id, txn.id);
    }

    #[test]
    fn test_query_filters_by_type() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(record("Food", 100, 5)).unwrap();
        repo.insert(TransactionRecord::new(
            TransactionType::Income,
            "Salary",
            Money::from_cents(5000),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        ))
        .unwrap();

        let filter = ParsedFilter::for_type(TransactionType::Income, None, None);
        let found = repo.query(&filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, "Salary");
    }
}
