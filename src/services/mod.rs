//! Service layer for Tally
//!
//! Business rules on top of the store traits: input parsing, validation
//! against the category registry, and the operations the CLI exposes.

pub mod category;
pub mod transaction;

pub use category::CategoryRegistry;
pub use transaction::{parse_amount, MAX_AMOUNT, TransactionEdit, TransactionInput, TransactionService};
