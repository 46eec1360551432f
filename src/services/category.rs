//! Category registry
//!
//! Owns the set of valid (name, type) pairs: seeding the defaults, adding
//! user categories, listing them per type and resolving the category named
//! on a transaction.

use std::sync::RwLock;

use tracing::{debug, info};

use crate::error::{TallyError, TallyResult};
use crate::models::category::{default_categories, validate_name};
use crate::models::{Category, TransactionType};
use crate::storage::CategoryStore;

/// Category registry over any category store
///
/// The category list is cached after the first read and dropped whenever
/// this registry adds a category.
pub struct CategoryRegistry<'a, S: CategoryStore + ?Sized> {
    store: &'a S,
    cache: RwLock<Option<Vec<Category>>>,
}

impl<'a, S: CategoryStore + ?Sized> CategoryRegistry<'a, S> {
    /// Create a new registry
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            cache: RwLock::new(None),
        }
    }

    /// Make sure every default category exists
    ///
    /// Pairs that are already present are skipped. Returns how many
    /// categories were inserted.
    pub fn seed_defaults(&self) -> TallyResult<usize> {
        let existing = self.all()?;
        let mut inserted = 0;

        for (name, kind) in default_categories() {
            if existing.iter().any(|c| c.matches(name, kind)) {
                continue;
            }
            self.store.insert_category(name, kind)?;
            inserted += 1;
        }

        if inserted > 0 {
            self.invalidate()?;
            info!(inserted, "seeded default categories");
        }
        Ok(inserted)
    }

    /// Add a user category
    pub fn add_category(&self, name: &str, kind: TransactionType) -> TallyResult<Category> {
        let name = name.trim();
        validate_name(name).map_err(|e| TallyError::InvalidInput(e.to_string()))?;

        if self.find(name, kind)?.is_some() {
            return Err(TallyError::DuplicateCategory {
                name: name.to_string(),
                kind,
            });
        }

        let category = self.store.insert_category(name, kind)?;
        self.invalidate()?;
        Ok(category)
    }

    /// Categories of one type, by name
    ///
    /// Ordered case-insensitively, then by exact name so the order is total.
    pub fn list_categories(&self, kind: TransactionType) -> TallyResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .all()?
            .into_iter()
            .filter(|c| c.kind == kind)
            .collect();
        categories.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(categories)
    }

    /// Case-insensitive lookup of a (name, type) pair
    pub fn find(&self, name: &str, kind: TransactionType) -> TallyResult<Option<Category>> {
        Ok(self.all()?.into_iter().find(|c| c.matches(name, kind)))
    }

    /// Resolve the category a transaction of `kind` is filed under
    ///
    /// Distinguishes a name registered only under the other type from a name
    /// that does not exist at all.
    pub fn require(&self, name: &str, kind: TransactionType) -> TallyResult<Category> {
        if let Some(category) = self.find(name, kind)? {
            return Ok(category);
        }

        match self.find(name, kind.other())? {
            Some(other) => Err(TallyError::CategoryTypeMismatch {
                category: other.name,
                expected: kind,
                actual: kind.other(),
            }),
            None => Err(TallyError::category_not_found(format!(
                "{} ({})",
                name.trim(),
                kind
            ))),
        }
    }

    fn all(&self) -> TallyResult<Vec<Category>> {
        {
            let cache = self
                .cache
                .read()
                .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;
            if let Some(categories) = cache.as_ref() {
                return Ok(categories.clone());
            }
        }

        let categories = self.store.categories()?;
        debug!(count = categories.len(), "category cache filled");
        *self
            .cache
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))? =
            Some(categories.clone());
        Ok(categories)
    }

    fn invalidate(&self) -> TallyResult<()> {
        *self
            .cache
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))? =
            None;
        Ok(())
    }
}
