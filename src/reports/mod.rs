//! Aggregation engine
//!
//! Summary totals, per-category breakdowns, and the report wrapper that
//! computes them over a date range.

pub mod breakdown;
pub mod service;
pub mod summary;

pub use breakdown::{breakdown_by_category, CategoryBreakdown, CategoryTotal};
pub use service::{Report, ReportKind, ReportResult, ReportService};
pub use summary::{summarize, SummaryResult};
