//! Export formatter
//!
//! Maps transactions to flat rows with the fixed column order
//! Type, Category, Amount, Description, Date and writes them as CSV.

pub mod csv;
pub mod rows;

pub use self::csv::{export_transactions_csv, write_csv};
pub use rows::{to_rows, ExportRow, EXPORT_HEADER};
