use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tally::cli::{
    handle_category_command, handle_export_command, handle_history_command,
    handle_report_command, handle_transaction_command, CategoryCommands, ExportArgs, HistoryArgs,
    ReportCommands, TransactionCommands,
};
use tally::config::{paths::TallyPaths, settings::Settings};
use tally::storage::file_io::json_file_valid;
use tally::storage::init::{initialize_storage, needs_initialization};
use tally::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "TALLY_LOG";

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Terminal income and expense tracker",
    long_about = "Tally records income and expense transactions against categories, \
                  filters them by type and date range, and produces summary and \
                  per-category reports with CSV export."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and default categories
    Init,

    /// Show current configuration and paths
    Config,

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Summary and per-category reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export transactions to CSV
    Export(ExportArgs),

    /// Show recent changes from the audit log
    History(HistoryArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = TallyPaths::new()?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("Tally - terminal income and expense tracker");
            println!();
            println!("Run 'tally --help' for usage information.");
            return Ok(());
        }
    };

    match command {
        Commands::Init => {
            println!("Initializing Tally at: {}", paths.base_dir().display());
            let report = initialize_storage(&paths)?;
            println!("Initialization complete!");
            if report.categories_created > 0 {
                println!();
                println!(
                    "Created {} default categories. Run 'tally category list' to see them.",
                    report.categories_created
                );
            }
            return Ok(());
        }
        Commands::Config => {
            let settings = Settings::load_or_create(&paths)?;
            print_config(&paths, &settings);
            return Ok(());
        }
        _ => {}
    }

    // First use of any data command sets everything up
    if needs_initialization(&paths) {
        let report = initialize_storage(&paths)?;
        info!(
            categories_created = report.categories_created,
            "initialized storage on first use"
        );
    }

    let settings = Settings::load_or_create(&paths)?;
    let mut storage = Storage::new(paths)?;
    storage.set_audit_enabled(settings.audit_enabled);
    storage.load_all()?;

    match command {
        Commands::Category(cmd) => handle_category_command(&storage, cmd)?,
        Commands::Transaction(cmd) => handle_transaction_command(&storage, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::Export(args) => handle_export_command(&storage, args)?,
        Commands::History(args) => handle_history_command(&storage, args)?,
        Commands::Init | Commands::Config => {}
    }

    Ok(())
}

/// Diagnostics go to stderr so command output stays clean
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_config(paths: &TallyPaths, settings: &Settings) {
    let status = |path: std::path::PathBuf| {
        let label = if !path.exists() {
            "missing"
        } else if json_file_valid(&path) {
            "ok"
        } else {
            "invalid"
        };
        format!("{} ({})", path.display(), label)
    };

    println!("Tally Configuration");
    println!("===================");
    println!("Base directory:    {}", paths.base_dir().display());
    println!("Data directory:    {}", paths.data_dir().display());
    println!("Settings file:     {}", status(paths.settings_file()));
    println!("Transactions file: {}", status(paths.transactions_file()));
    println!("Categories file:   {}", status(paths.categories_file()));
    println!("Audit log:         {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Schema version:  {}", settings.schema_version);
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Audit enabled:   {}", settings.audit_enabled);
}
