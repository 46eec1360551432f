//! Audit history command

use clap::Args;

use crate::audit::AuditLogger;
use crate::error::TallyResult;
use crate::storage::Storage;

/// Arguments for `tally history`
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Print the most recent audit entries, oldest first
pub fn handle_history_command(storage: &Storage, args: HistoryArgs) -> TallyResult<()> {
    // Read the log even when auditing is switched off; old entries stay valid
    let entries = match storage.audit_logger() {
        Some(logger) => logger.read_recent(args.limit)?,
        None => AuditLogger::new(storage.paths().audit_log()).read_recent(args.limit)?,
    };

    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
