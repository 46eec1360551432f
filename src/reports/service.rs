//! Report generation over a store
//!
//! Runs the filter engine for a date range and turns the result into one of
//! the three report types, ready for the terminal or a CSV file.

use std::fmt;
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::TallyResult;
use crate::models::date::format_date;
use crate::models::{Money, TransactionType};
use crate::query::{self, FilterSpec, TypeSelector};
use crate::storage::TransactionStore;

use super::breakdown::{breakdown_by_category, CategoryBreakdown};
use super::summary::{summarize, SummaryResult};

/// Which report to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Summary,
    IncomeByCategory,
    ExpenseByCategory,
}

impl ReportKind {
    /// The per-category report for a transaction type
    pub fn by_category(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Income => Self::IncomeByCategory,
            TransactionType::Expense => Self::ExpenseByCategory,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Summary => "Financial Summary",
            Self::IncomeByCategory => "Income by Category",
            Self::ExpenseByCategory => "Expenses by Category",
        }
    }

    fn selector(&self) -> TypeSelector {
        match self {
            Self::Summary => TypeSelector::All,
            Self::IncomeByCategory => TypeSelector::Only(TransactionType::Income),
            Self::ExpenseByCategory => TypeSelector::Only(TransactionType::Expense),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.title())
    }
}

/// Computed report data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReportResult {
    Summary(SummaryResult),
    Breakdown(CategoryBreakdown),
}

/// A generated report with the range it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub kind: ReportKind,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub result: ReportResult,
}

impl Report {
    /// Human description of the date range
    pub fn range_label(&self) -> String {
        match (self.from, self.to) {
            (None, None) => "All dates".to_string(),
            (Some(from), None) => format!("From {}", format_date(from)),
            (None, Some(to)) => format!("Up to {}", format_date(to)),
            (Some(from), Some(to)) => format!("{} to {}", format_date(from), format_date(to)),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency);
        let mut output = String::new();

        output.push_str(&format!("{}: {}\n", self.kind, self.range_label()));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        match &self.result {
            ReportResult::Summary(summary) => {
                output.push_str(&format!(
                    "{:<20} {:>16} {:>8}\n",
                    "Total Income",
                    money(summary.total_income),
                    summary.income_count
                ));
                output.push_str(&format!(
                    "{:<20} {:>16} {:>8}\n",
                    "Total Expenses",
                    money(summary.total_expense),
                    summary.expense_count
                ));
                output.push_str(&"-".repeat(60));
                output.push('\n');
                output.push_str(&format!("{:<20} {:>16}\n", "Balance", money(summary.balance)));
            }
            ReportResult::Breakdown(CategoryBreakdown::Empty) => {
                output.push_str("No transactions in this period.\n");
            }
            ReportResult::Breakdown(breakdown) => {
                let total = breakdown.total();
                output.push_str(&format!(
                    "{:<30} {:>14} {:>6} {:>7}\n",
                    "Category", "Amount", "Count", "%"
                ));
                output.push_str(&"-".repeat(60));
                output.push('\n');
                for entry in breakdown.entries() {
                    output.push_str(&format!(
                        "{:<30} {:>14} {:>6} {:>6.1}%\n",
                        entry.category,
                        money(entry.total),
                        entry.count,
                        entry.total.percentage_of(total)
                    ));
                }
                output.push_str(&"-".repeat(60));
                output.push('\n');
                output.push_str(&format!(
                    "{:<30} {:>14} {:>6}\n",
                    "TOTAL",
                    money(total),
                    breakdown.transaction_count()
                ));
            }
        }

        output
    }

    /// Write the report as CSV; amounts carry two decimals and no symbol
    pub fn export_csv<W: Write>(&self, writer: W) -> TallyResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        match &self.result {
            ReportResult::Summary(summary) => {
                wtr.write_record(["Metric", "Amount", "Count"])?;
                wtr.write_record([
                    "Total Income",
                    summary.total_income.to_decimal_string().as_str(),
                    summary.income_count.to_string().as_str(),
                ])?;
                wtr.write_record([
                    "Total Expenses",
                    summary.total_expense.to_decimal_string().as_str(),
                    summary.expense_count.to_string().as_str(),
                ])?;
                wtr.write_record(["Balance", summary.balance.to_decimal_string().as_str(), ""])?;
            }
            ReportResult::Breakdown(breakdown) => {
                let total = breakdown.total();
                wtr.write_record(["Category", "Amount", "Count", "Percentage"])?;
                for entry in breakdown.entries() {
                    wtr.write_record([
                        entry.category.as_str(),
                        entry.total.to_decimal_string().as_str(),
                        entry.count.to_string().as_str(),
                        format!("{:.2}", entry.total.percentage_of(total)).as_str(),
                    ])?;
                }
            }
        }

        wtr.flush()?;
        Ok(())
    }
}

/// Produces reports from a transaction store
pub struct ReportService<'a, S: TransactionStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: TransactionStore + ?Sized> ReportService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Generate a report over an optional inclusive date range
    ///
    /// Bounds are validated exactly like list filters.
    pub fn generate(
        &self,
        kind: ReportKind,
        from: Option<&str>,
        to: Option<&str>,
    ) -> TallyResult<Report> {
        let spec = FilterSpec::new()
            .selector(kind.selector())
            .range(from.map(str::to_string), to.map(str::to_string));
        let filter = query::validate_filter(&spec)?;
        let records = query::fetch(self.store, &filter)?;
        debug!(report = %kind, records = records.len(), "generating report");

        let result = match kind {
            ReportKind::Summary => ReportResult::Summary(summarize(&records)),
            ReportKind::IncomeByCategory => {
                ReportResult::Breakdown(breakdown_by_category(&records, TransactionType::Income))
            }
            ReportKind::ExpenseByCategory => {
                ReportResult::Breakdown(breakdown_by_category(&records, TransactionType::Expense))
            }
        };

        Ok(Report {
            kind,
            from: filter.from,
            to: filter.to,
            result,
        })
    }
}
