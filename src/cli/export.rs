//! CSV export command

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use crate::error::{TallyError, TallyResult};
use crate::export::export_transactions_csv;
use crate::query::{self, FilterSpec, TypeSelector};
use crate::storage::Storage;

/// Arguments for `tally export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path
    pub output: PathBuf,
    /// Type filter: all, income or expense
    #[arg(short = 't', long = "type", default_value = "all")]
    pub selector: TypeSelector,
    /// Earliest date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Latest date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

/// Export transactions to a CSV file
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> TallyResult<()> {
    let spec = FilterSpec::new()
        .selector(args.selector)
        .range(args.from, args.to);

    // Reject bad dates before the output file is created
    query::validate_filter(&spec)?;

    let file = File::create(&args.output).map_err(|e| {
        TallyError::Export(format!(
            "Failed to create file {}: {}",
            args.output.display(),
            e
        ))
    })?;
    let count = export_transactions_csv(storage, &spec, BufWriter::new(file))?;

    println!(
        "Exported {} transaction(s) to: {}",
        count,
        args.output.display()
    );
    Ok(())
}
