//! Filter specification and filter engine
//!
//! A `FilterSpec` carries what the user typed. `validate_filter` turns it into
//! a `ParsedFilter`, the structured predicate handed to the store, and `apply`
//! selects and orders matching transactions.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::TallyResult;
use crate::models::date::parse_optional_date;
use crate::models::{Transaction, TransactionType};
use crate::storage::TransactionStore;

/// Which transaction types a filter lets through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeSelector {
    #[default]
    All,
    Only(TransactionType),
}

impl TypeSelector {
    /// Check whether a transaction type passes this selector
    pub fn accepts(&self, kind: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => *selected == kind,
        }
    }
}

impl From<TransactionType> for TypeSelector {
    fn from(kind: TransactionType) -> Self {
        Self::Only(kind)
    }
}

impl From<Option<TransactionType>> for TypeSelector {
    fn from(kind: Option<TransactionType>) -> Self {
        kind.map_or(Self::All, Self::Only)
    }
}

impl FromStr for TypeSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<TransactionType>()
            .map(Self::Only)
            .map_err(|_| format!("Unknown type selector '{}'. Use all, income or expense", s.trim()))
    }
}

impl fmt::Display for TypeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.pad("all"),
            Self::Only(kind) => f.pad(kind.as_str()),
        }
    }
}

/// Raw filter criteria as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Type selector
    pub selector: TypeSelector,
    /// Inclusive lower date bound, unparsed
    pub from: Option<String>,
    /// Inclusive upper date bound, unparsed
    pub to: Option<String>,
}

impl FilterSpec {
    /// Create a filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a type
    pub fn selector(mut self, selector: impl Into<TypeSelector>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Set the lower bound
    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set the upper bound
    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Set both bounds from optional user input
    pub fn range(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.from = from;
        self.to = to;
        self
    }
}

/// A validated filter: typed selector and parsed inclusive bounds
///
/// A range with `from > to` is accepted and simply matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedFilter {
    pub selector: TypeSelector,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ParsedFilter {
    /// A filter that matches every transaction
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter for one type with optional bounds
    pub fn for_type(
        kind: TransactionType,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Self {
        Self {
            selector: TypeSelector::Only(kind),
            from,
            to,
        }
    }

    /// AND-combination of all active conditions
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.selector.accepts(txn.kind)
            && self.from.map_or(true, |from| txn.date >= from)
            && self.to.map_or(true, |to| txn.date <= to)
    }

    /// Check whether the bounds describe an empty range
    pub fn is_inverted(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }
}

/// Validate a filter specification
///
/// Each non-blank bound must be a strict `YYYY-MM-DD` date; a bad bound
/// rejects the whole filter.
pub fn validate_filter(spec: &FilterSpec) -> TallyResult<ParsedFilter> {
    let from = parse_optional_date("from", spec.from.as_deref())?;
    let to = parse_optional_date("to", spec.to.as_deref())?;

    Ok(ParsedFilter {
        selector: spec.selector,
        from,
        to,
    })
}

/// Select matching transactions, newest first
///
/// Records sharing a date keep their input order, so the result is
/// deterministic and re-applying the same filter returns the same sequence.
pub fn apply(filter: &ParsedFilter, transactions: &[Transaction]) -> Vec<Transaction> {
    let mut selected: Vec<Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();
    order_newest_first(&mut selected);
    selected
}

/// Stable sort by date descending
pub fn order_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Validate a spec, query the store and order the result
pub fn run<S>(store: &S, spec: &FilterSpec) -> TallyResult<Vec<Transaction>>
where
    S: TransactionStore + ?Sized,
{
    let filter = validate_filter(spec)?;
    fetch(store, &filter)
}

/// Query the store with an already validated filter, newest first
pub fn fetch<S>(store: &S, filter: &ParsedFilter) -> TallyResult<Vec<Transaction>>
where
    S: TransactionStore + ?Sized,
{
    if filter.is_inverted() {
        debug!(?filter, "date range is inverted; no transactions can match");
    }

    let mut transactions = store.query(filter)?;
    order_newest_first(&mut transactions);
    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TallyError;
    use crate::models::{Money, TransactionId, TransactionRecord};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn txn(id: u64, kind: TransactionType, category: &str, cents: i64, day: &str) -> Transaction {
        Transaction::from_record(
            TransactionId::new(id),
            TransactionRecord::new(kind, category, Money::from_cents(cents), date(day)),
        )
    }

    fn example_set() -> Vec<Transaction> {
        vec![
            txn(1, TransactionType::Income, "Salary", 100000, "2024-01-05"),
            txn(2, TransactionType::Expense, "Food", 4550, "2024-01-06"),
            txn(3, TransactionType::Expense, "Food", 1000, "2024-01-07"),
        ]
    }

    fn ids(transactions: &[Transaction]) -> Vec<u64> {
        transactions.iter().map(|t| t.id.value()).collect()
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!("all".parse::<TypeSelector>().unwrap(), TypeSelector::All);
        assert_eq!(
            "Income".parse::<TypeSelector>().unwrap(),
            TypeSelector::Only(TransactionType::Income)
        );
        assert!("both".parse::<TypeSelector>().is_err());
    }

    #[test]
    fn test_validate_accepts_blank_bounds() {
        let spec = FilterSpec::new().from("").to("  ");
        let filter = validate_filter(&spec).unwrap();
        assert_eq!(filter, ParsedFilter::all());
    }

    #[test]
    fn test_validate_rejects_bad_bound() {
        let spec = FilterSpec::new().from("2024-01-01").to("2024-13-40");
        let err = validate_filter(&spec).unwrap_err();
        assert!(matches!(err, TallyError::InvalidDateFormat { field: "to", .. }));

        let spec = FilterSpec::new().from("not-a-date");
        let err = validate_filter(&spec).unwrap_err();
        assert!(matches!(err, TallyError::InvalidDateFormat { field: "from", .. }));
    }

    #[test]
    fn test_apply_all_orders_newest_first() {
        let result = apply(&ParsedFilter::all(), &example_set());
        assert_eq!(ids(&result), vec![3, 2, 1]);
    }

    #[test]
    fn test_apply_single_day_range() {
        let spec = FilterSpec::new().from("2024-01-06").to("2024-01-06");
        let filter = validate_filter(&spec).unwrap();
        let result = apply(&filter, &example_set());
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn test_apply_type_and_bounds_are_anded() {
        let spec = FilterSpec::new()
            .selector(TransactionType::Expense)
            .from("2024-01-05");
        let filter = validate_filter(&spec).unwrap();
        let result = apply(&filter, &example_set());
        assert_eq!(ids(&result), vec![3, 2]);

        let spec = FilterSpec::new()
            .selector(TransactionType::Income)
            .from("2024-01-06");
        let filter = validate_filter(&spec).unwrap();
        assert!(apply(&filter, &example_set()).is_empty());
    }

    #[test]
    fn test_inverted_range_yields_nothing() {
        let spec = FilterSpec::new().from("2024-01-07").to("2024-01-05");
        let filter = validate_filter(&spec).unwrap();
        assert!(filter.is_inverted());
        assert!(apply(&filter, &example_set()).is_empty());
    }

    #[test]
    fn test_same_date_keeps_input_order() {
        let records = vec![
            txn(1, TransactionType::Expense, "Food", 100, "2024-02-01"),
            txn(2, TransactionType::Expense, "Travel", 200, "2024-02-03"),
            txn(3, TransactionType::Income, "Salary", 300, "2024-02-01"),
            txn(4, TransactionType::Expense, "Food", 400, "2024-02-01"),
        ];
        let result = apply(&ParsedFilter::all(), &records);
        assert_eq!(ids(&result), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let filter = ParsedFilter::for_type(TransactionType::Expense, None, None);
        let once = apply(&filter, &example_set());
        let twice = apply(&filter, &once);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_fetch_matches_run() {
        let store = crate::storage::MemoryStore::new();
        for t in example_set() {
            store
                .insert(TransactionRecord::new(t.kind, t.category, t.amount, t.date))
                .unwrap();
        }

        let spec = FilterSpec::new()
            .selector(TransactionType::Expense)
            .from("2024-01-06");
        let filter = validate_filter(&spec).unwrap();
        let fetched = fetch(&store, &filter).unwrap();

        assert_eq!(ids(&fetched), ids(&run(&store, &spec).unwrap()));
        assert_eq!(fetched.len(), 2);
        assert!(fetched[0].date > fetched[1].date);
    }
}
