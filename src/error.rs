//! Custom error types for Tally
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::TransactionType;

/// The main error type for Tally operations
#[derive(Error, Debug)]
pub enum TallyError {
    /// A date bound or transaction date is not a strict YYYY-MM-DD calendar date
    #[error("Invalid date format for {field}: '{value}'. Use YYYY-MM-DD")]
    InvalidDateFormat { field: &'static str, value: String },

    /// Empty or blank required field, malformed or non-positive amount
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A category with the same (name, type) pair already exists
    #[error("Category already exists: {name} ({kind})")]
    DuplicateCategory { name: String, kind: TransactionType },

    /// The transaction's category is registered under the other type
    #[error("Category '{category}' is an {actual} category, not {expected}")]
    CategoryTypeMismatch {
        category: String,
        expected: TransactionType,
        actual: TransactionType,
    },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl TallyError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create an invalid date error for the named field
    pub fn invalid_date(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidDateFormat {
            field,
            value: value.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error was raised by input validation (nothing was written)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDateFormat { .. }
                | Self::InvalidInput(_)
                | Self::DuplicateCategory { .. }
                | Self::CategoryTypeMismatch { .. }
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for TallyError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for Tally operations
pub type TallyResult<T> = Result<T, TallyError>;
