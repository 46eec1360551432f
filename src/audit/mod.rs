//! Audit logging
//!
//! Every create, update and delete performed through the JSON store is
//! appended to `audit.log` as one JSON object per line, with before/after
//! snapshots and a short diff for edits.
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(EntityType::Transaction, "7", Some("Food".into()), &txn);
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
