//! Tally - terminal income and expense tracker
//!
//! This library records income and expense transactions against categories,
//! filters them by type and date range, and aggregates them into summary and
//! per-category reports that can be displayed or exported as CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, money)
//! - `storage`: Store traits, JSON file storage and an in-memory store
//! - `query`: Filter validation and the filter engine
//! - `services`: Category registry and transaction validation
//! - `reports`: Summary and per-category aggregation
//! - `export`: Flat export rows and CSV writing
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `tally` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::query::FilterSpec;
//! use tally::services::{CategoryRegistry, TransactionInput, TransactionService};
//! use tally::storage::MemoryStore;
//!
//! let store = MemoryStore::new();
//! CategoryRegistry::new(&store).seed_defaults()?;
//!
//! let service = TransactionService::new(&store);
//! service.add(TransactionInput::new("expense", "Food", "45.50").date("2024-01-06"))?;
//! let expenses = service.list(&FilterSpec::new().from("2024-01-01"))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod query;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
