//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{TallyError, TallyResult};
use crate::models::{Category, CategoryId, TransactionType};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of categories.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct CategoryData {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub categories: Vec<Category>,
}

struct Inner {
    next_id: u64,
    categories: BTreeMap<CategoryId, Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    inner: RwLock<Inner>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            inner: RwLock::new(Inner {
                next_id: 1,
                categories: BTreeMap::new(),
            }),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> TallyResult<()> {
        let file_data: CategoryData = read_json(&self.path)?;
        let mut inner = self.write()?;

        inner.categories = file_data
            .categories
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let after_max = inner
            .categories
            .keys()
            .next_back()
            .map(|id| id.value() + 1)
            .unwrap_or(1);
        inner.next_id = file_data.next_id.max(after_max);

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> TallyResult<()> {
        let inner = self.read()?;
        let file_data = CategoryData {
            next_id: inner.next_id,
            categories: inner.categories.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All categories in insertion order
    pub fn get_all(&self) -> TallyResult<Vec<Category>> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    /// Case-insensitive lookup of a (name, type) pair
    pub fn find(&self, name: &str, kind: TransactionType) -> TallyResult<Option<Category>> {
        Ok(self
            .read()?
            .categories
            .values()
            .find(|c| c.matches(name, kind))
            .cloned())
    }

    /// Store a new category under the next id
    ///
    /// The (name, type) pair is checked again under the write lock so the
    /// file can never hold two entries for the same pair.
    pub fn insert(&self, name: &str, kind: TransactionType) -> TallyResult<Category> {
        let name = name.trim();
        let mut inner = self.write()?;

        if inner.categories.values().any(|c| c.matches(name, kind)) {
            return Err(TallyError::DuplicateCategory {
                name: name.to_string(),
                kind,
            });
        }

        let id = CategoryId::new(inner.next_id);
        inner.next_id += 1;

        let category = Category::new(id, name, kind);
        inner.categories.insert(id, category.clone());
        Ok(category)
    }

    /// Drop a category that failed to persist
    pub(crate) fn remove(&self, id: CategoryId) -> TallyResult<Option<Category>> {
        Ok(self.write()?.categories.remove(&id))
    }

    /// Count categories
    pub fn count(&self) -> TallyResult<usize> {
        Ok(self.read()?.categories.len())
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
