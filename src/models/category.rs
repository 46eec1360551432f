//! Category model
//!
//! A category is a named bucket scoping transactions of one type. The same
//! name may exist once for income and once for expense.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// Longest accepted category name
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// Income categories created on first initialization
pub const DEFAULT_INCOME_CATEGORIES: [&str; 4] = ["Salary", "Freelance", "Investments", "Other"];

/// Expense categories created on first initialization
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 13] = [
    "Food",
    "Transport",
    "Housing",
    "Utilities",
    "Entertainment",
    "Healthcare",
    "Education",
    "Shopping",
    "Gifts",
    "Insurance",
    "Personal Care",
    "Travel",
    "Other",
];

/// The full seed set as (name, type) pairs
pub fn default_categories() -> impl Iterator<Item = (&'static str, TransactionType)> {
    DEFAULT_INCOME_CATEGORIES
        .iter()
        .map(|name| (*name, TransactionType::Income))
        .chain(
            DEFAULT_EXPENSE_CATEGORIES
                .iter()
                .map(|name| (*name, TransactionType::Expense)),
        )
}

/// A transaction category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Which transaction type this category scopes
    pub kind: TransactionType,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(id: CategoryId, name: impl Into<String>, kind: TransactionType) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive name comparison used for uniqueness and lookup
    pub fn matches(&self, name: &str, kind: TransactionType) -> bool {
        self.kind == kind && names_equal(&self.name, name)
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Compare two category names ignoring case and surrounding whitespace
pub fn names_equal(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Check a (trimmed) category name
pub fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }

    let len = name.chars().count();
    if len > MAX_CATEGORY_NAME_LEN {
        return Err(CategoryValidationError::NameTooLong(len));
    }

    Ok(())
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} characters, max {})",
                len, MAX_CATEGORY_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_set_shape() {
        let seeds: Vec<_> = default_categories().collect();
        assert_eq!(seeds.len(), 17);
        assert_eq!(
            seeds.iter().filter(|(_, k)| *k == TransactionType::Income).count(),
            4
        );
        assert!(seeds.contains(&("Other", TransactionType::Income)));
        assert!(seeds.contains(&("Other", TransactionType::Expense)));
    }

    #[test]
    fn test_matches_is_case_insensitive_and_typed() {
        let cat = Category::new(CategoryId::new(1), "Food", TransactionType::Expense);
        assert!(cat.matches("food", TransactionType::Expense));
        assert!(cat.matches(" FOOD ", TransactionType::Expense));
        assert!(!cat.matches("Food", TransactionType::Income));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("   "), Err(CategoryValidationError::EmptyName));
        assert!(validate_name("Rent").is_ok());
        let long = "x".repeat(MAX_CATEGORY_NAME_LEN + 1);
        assert_eq!(
            validate_name(&long),
            Err(CategoryValidationError::NameTooLong(MAX_CATEGORY_NAME_LEN + 1))
        );
    }

    #[test]
    fn test_display() {
        let cat = Category::new(CategoryId::new(1), "Salary", TransactionType::Income);
        assert_eq!(cat.to_string(), "Salary (income)");
    }
}
