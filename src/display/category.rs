//! Category display formatting

use crate::models::{Category, TransactionType};

/// Format categories of one type as a bulleted list
pub fn format_category_list(kind: TransactionType, categories: &[Category]) -> String {
    let heading = match kind {
        TransactionType::Income => "Income categories",
        TransactionType::Expense => "Expense categories",
    };

    if categories.is_empty() {
        return format!("{}: none\n", heading);
    }

    let mut output = format!("{} ({}):\n", heading, categories.len());
    for (i, category) in categories.iter().enumerate() {
        let prefix = if i + 1 == categories.len() { "└── " } else { "├── " };
        output.push_str(&format!("  {}{}\n", prefix, category.name));
    }
    output
}
