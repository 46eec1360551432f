//! Core data models for Tally
//!
//! This module contains the data structures that represent the domain:
//! transactions, categories, money amounts and their identifiers.

pub mod category;
pub mod date;
pub mod ids;
pub mod money;
pub mod transaction;

pub use category::{Category, CategoryValidationError};
pub use date::{format_date, parse_date, parse_optional_date};
pub use ids::{CategoryId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionRecord, TransactionType};
