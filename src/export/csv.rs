//! CSV export of transactions

use std::io::Write;

use tracing::info;

use crate::error::TallyResult;
use crate::query::{self, FilterSpec};
use crate::storage::TransactionStore;

use super::rows::{to_rows, ExportRow, EXPORT_HEADER};

/// Write the header and one record per row
///
/// The header is written even when there are no rows.
pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> TallyResult<()> {
    let mut wtr = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(EXPORT_HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export all or filtered transactions, newest first
///
/// Returns the number of rows written.
pub fn export_transactions_csv<S, W>(store: &S, spec: &FilterSpec, writer: W) -> TallyResult<usize>
where
    S: TransactionStore + ?Sized,
    W: Write,
{
    let records = query::run(store, spec)?;
    let rows = to_rows(&records);
    write_csv(&rows, writer)?;

    info!(rows = rows.len(), "exported transactions");
    Ok(rows.len())
}
