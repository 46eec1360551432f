//! Report CLI commands

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{TallyError, TallyResult};
use crate::models::TransactionType;
use crate::reports::{Report, ReportKind, ReportService};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expense and balance totals
    Summary {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Write CSV to this file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Totals per category for one transaction type
    Categories {
        /// Category type (income or expense)
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: TransactionType,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Write CSV to this file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TallyResult<()> {
    let service = ReportService::new(storage);

    let (report, output) = match cmd {
        ReportCommands::Summary { from, to, output } => {
            let report = service.generate(ReportKind::Summary, from.as_deref(), to.as_deref())?;
            (report, output)
        }
        ReportCommands::Categories {
            kind,
            from,
            to,
            output,
        } => {
            let report = service.generate(
                ReportKind::by_category(kind),
                from.as_deref(),
                to.as_deref(),
            )?;
            (report, output)
        }
    };

    emit(&report, settings, output)
}

fn emit(report: &Report, settings: &Settings, output: Option<PathBuf>) -> TallyResult<()> {
    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            TallyError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        report.export_csv(&mut writer)?;
        println!("{} exported to: {}", report.kind, path.display());
    } else {
        print!("{}", report.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}
