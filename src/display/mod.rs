//! Display formatting for terminal output

pub mod category;
pub mod transaction;

pub use category::format_category_list;
pub use transaction::{format_transaction_details, format_transaction_table};
