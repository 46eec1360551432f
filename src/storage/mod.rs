//! Storage layer for Tally
//!
//! JSON file storage with atomic writes behind the `TransactionStore` and
//! `CategoryStore` traits. `Storage` saves the touched file after every
//! mutation and appends an audit entry; `MemoryStore` keeps everything in
//! process.

pub mod categories;
pub mod file_io;
pub mod init;
pub mod memory;
pub mod traits;
pub mod transactions;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, InitReport};
pub use memory::MemoryStore;
pub use traits::{CategoryStore, TransactionStore};
pub use transactions::TransactionRepository;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TallyPaths;
use crate::error::TallyResult;
use crate::models::{Category, Transaction, TransactionId, TransactionRecord, TransactionType};
use crate::query::ParsedFilter;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TallyPaths,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: TallyPaths) -> TallyResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            audit: Some(AuditLogger::new(paths.audit_log())),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    /// Turn audit logging on or off
    pub fn set_audit_enabled(&mut self, enabled: bool) {
        self.audit = enabled.then(|| AuditLogger::new(self.paths.audit_log()));
    }

    /// The audit logger, when auditing is enabled
    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> TallyResult<()> {
        self.transactions.load()?;
        self.categories.load()?;
        debug!(
            transactions = self.transactions.count()?,
            categories = self.categories.count()?,
            "loaded data files"
        );
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> TallyResult<()> {
        self.transactions.save()?;
        self.categories.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> TallyResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::create(entity_type, entity_id, entity_name, entity)),
            None => Ok(()),
        }
    }

    /// Record an update, with a field diff, in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> TallyResult<()> {
        let Some(logger) = &self.audit else {
            return Ok(());
        };

        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        logger.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> TallyResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity)),
            None => Ok(()),
        }
    }
}

/// Log a failed audit write; the mutation it describes is already saved
fn audit_best_effort(result: TallyResult<()>) {
    if let Err(e) = result {
        warn!(error = %e, "failed to write audit entry");
    }
}

fn audit_label(txn: &Transaction) -> Option<String> {
    Some(format!("{} {} {}", txn.kind, txn.category, txn.amount))
}

// Each mutation is saved before it is reported as done. A failed save rolls
// the in-memory change back so memory and disk agree.
impl TransactionStore for Storage {
    fn insert(&self, record: TransactionRecord) -> TallyResult<TransactionId> {
        let txn = self.transactions.insert(record)?;
        if let Err(e) = self.transactions.save() {
            warn!(id = %txn.id, error = %e, "save failed, dropping new transaction");
            self.transactions.delete(txn.id)?;
            return Err(e);
        }

        audit_best_effort(self.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            audit_label(&txn),
            &txn,
        ));
        info!(id = %txn.id, kind = %txn.kind, category = %txn.category, "transaction created");
        Ok(txn.id)
    }

    fn get_by_id(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        self.transactions.get(id)
    }

    fn update(&self, id: TransactionId, record: TransactionRecord) -> TallyResult<bool> {
        let Some((before, after)) = self.transactions.update(id, record)? else {
            return Ok(false);
        };
        if let Err(e) = self.transactions.save() {
            warn!(%id, error = %e, "save failed, restoring previous transaction");
            self.transactions.restore(before)?;
            return Err(e);
        }

        audit_best_effort(self.log_update(
            EntityType::Transaction,
            id.to_string(),
            audit_label(&after),
            &before,
            &after,
        ));
        info!(%id, "transaction updated");
        Ok(true)
    }

    fn delete(&self, id: TransactionId) -> TallyResult<bool> {
        let Some(removed) = self.transactions.delete(id)? else {
            return Ok(false);
        };
        if let Err(e) = self.transactions.save() {
            warn!(%id, error = %e, "save failed, restoring deleted transaction");
            self.transactions.restore(removed)?;
            return Err(e);
        }

        audit_best_effort(self.log_delete(
            EntityType::Transaction,
            id.to_string(),
            audit_label(&removed),
            &removed,
        ));
        info!(%id, "transaction deleted");
        Ok(true)
    }

    fn query(&self, filter: &ParsedFilter) -> TallyResult<Vec<Transaction>> {
        self.transactions.query(filter)
    }
}

impl CategoryStore for Storage {
    fn insert_category(&self, name: &str, kind: TransactionType) -> TallyResult<Category> {
        let category = self.categories.insert(name, kind)?;
        if let Err(e) = self.categories.save() {
            warn!(name = %category.name, error = %e, "save failed, dropping new category");
            self.categories.remove(category.id)?;
            return Err(e);
        }

        audit_best_effort(self.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.to_string()),
            &category,
        ));
        info!(name = %category.name, %kind, "category created");
        Ok(category)
    }

    fn categories(&self) -> TallyResult<Vec<Category>> {
        self.categories.get_all()
    }
}
