//! In-process store
//!
//! Keeps everything in memory and writes nothing. Used by tests and by
//! callers that want the engine without the JSON backend.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{TallyError, TallyResult};
use crate::models::{
    Category, CategoryId, Transaction, TransactionId, TransactionRecord, TransactionType,
};
use crate::query::ParsedFilter;

use super::traits::{CategoryStore, TransactionStore};

struct State {
    next_transaction: TransactionId,
    transactions: BTreeMap<TransactionId, Transaction>,
    next_category: CategoryId,
    categories: Vec<Category>,
}

/// Non-persistent implementation of both store traits
pub struct MemoryStore {
    state: RwLock<State>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                next_transaction: TransactionId::new(1),
                transactions: BTreeMap::new(),
                next_category: CategoryId::new(1),
                categories: Vec::new(),
            }),
        }
    }

    fn read(&self) -> TallyResult<std::sync::RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> TallyResult<std::sync::RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

impl TransactionStore for MemoryStore {
    fn insert(&self, record: TransactionRecord) -> TallyResult<TransactionId> {
        let mut state = self.write()?;
        let id = state.next_transaction;
        state.next_transaction = id.next();
        state
            .transactions
            .insert(id, Transaction::from_record(id, record));
        Ok(id)
    }

    fn get_by_id(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        Ok(self.read()?.transactions.get(&id).cloned())
    }

    fn update(&self, id: TransactionId, record: TransactionRecord) -> TallyResult<bool> {
        let mut state = self.write()?;
        Ok(match state.transactions.get_mut(&id) {
            Some(txn) => {
                txn.apply(record);
                true
            }
            None => false,
        })
    }

    fn delete(&self, id: TransactionId) -> TallyResult<bool> {
        Ok(self.write()?.transactions.remove(&id).is_some())
    }

    fn query(&self, filter: &ParsedFilter) -> TallyResult<Vec<Transaction>> {
        Ok(self
            .read()?
            .transactions
            .values()
            .filter(|txn| filter.matches(txn))
            .cloned()
            .collect())
    }
}

impl CategoryStore for MemoryStore {
    fn insert_category(&self, name: &str, kind: TransactionType) -> TallyResult<Category> {
        let name = name.trim();
        let mut state = self.write()?;
        if state.categories.iter().any(|c| c.matches(name, kind)) {
            return Err(TallyError::DuplicateCategory {
                name: name.to_string(),
                kind,
            });
        }

        let id = state.next_category;
        state.next_category = id.next();
        let category = Category::new(id, name, kind);
        state.categories.push(category.clone());
        Ok(category)
    }

    fn categories(&self) -> TallyResult<Vec<Category>> {
        Ok(self.read()?.categories.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn record(kind: TransactionType, category: &str, cents: i64) -> TransactionRecord {
        TransactionRecord::new(
            kind,
            category,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn test_crud_cycle() {
        let store = MemoryStore::new();
        let id = store.insert(record(TransactionType::Expense, "Food", 100)).unwrap();

        assert!(store.update(id, record(TransactionType::Expense, "Food", 200)).unwrap());
        assert_eq!(
            store.get_by_id(id).unwrap().unwrap().amount,
            Money::from_cents(200)
        );

        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
        assert!(!store.update(id, record(TransactionType::Expense, "Food", 1)).unwrap());
        assert!(store.get_by_id(id).unwrap().is_none());
    }

    #[test]
    fn test_ids_never_reused() {
        let store = MemoryStore::new();
        let first = store.insert(record(TransactionType::Income, "Salary", 1)).unwrap();
        store.delete(first).unwrap();
        let second = store.insert(record(TransactionType::Income, "Salary", 1)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_query_in_insertion_order() {
        let store = MemoryStore::new();
        store.insert(record(TransactionType::Expense, "Food", 1)).unwrap();
        store.insert(record(TransactionType::Income, "Salary", 2)).unwrap();
        store.insert(record(TransactionType::Expense, "Travel", 3)).unwrap();

        let all = store.query(&ParsedFilter::all()).unwrap();
        let cats: Vec<_> = all.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(cats, vec!["Food", "Salary", "Travel"]);
    }

    #[test]
    fn test_category_pairs() {
        let store = MemoryStore::new();
        store.insert_category("Food", TransactionType::Expense).unwrap();
        store.insert_category("Food", TransactionType::Income).unwrap();
        assert!(store.insert_category("FOOD", TransactionType::Expense).is_err());
        assert_eq!(store.categories().unwrap().len(), 2);
    }
}
