//! Query builder and filter engine
//!
//! Turns user filter criteria into a validated predicate and retrieves
//! matching transactions in a deterministic order.

pub mod filter;

pub use filter::{apply, fetch, order_newest_first, run, validate_filter, FilterSpec, ParsedFilter, TypeSelector};
