//! Transaction CLI commands
//!
//! Arguments are passed through as raw text; the service layer does all
//! parsing so the CLI reports the same errors as any other caller.

use std::io::Write;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::TallyResult;
use crate::models::TransactionId;
use crate::query::{FilterSpec, TypeSelector};
use crate::services::{TransactionEdit, TransactionInput, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Transaction type (income or expense)
        kind: String,
        /// Category name
        category: String,
        /// Amount (e.g., "45.50")
        amount: String,
        /// Free-text description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Type filter: all, income or expense
        #[arg(short = 't', long = "type", default_value = "all")]
        selector: TypeSelector,
        /// Earliest date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Latest date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        id: TransactionId,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: TransactionId,
        /// New type
        #[arg(long = "type")]
        kind: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description (empty to clear)
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: TransactionId,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TallyResult<()> {
    let service = TransactionService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            kind,
            category,
            amount,
            description,
            date,
        } => {
            let input = TransactionInput {
                kind,
                category,
                amount,
                description,
                date,
            };
            let txn = service.add(input)?;

            println!("Created transaction: #{}", txn.id);
            println!("  Date:     {}", txn.date);
            println!("  Type:     {}", txn.kind);
            println!("  Category: {}", txn.category);
            println!("  Amount:   {}", txn.amount.format_with_symbol(currency));
        }

        TransactionCommands::List { selector, from, to } => {
            let spec = FilterSpec::new().selector(selector).range(from, to);
            let transactions = service.list(&spec)?;
            println!("{}", format_transaction_table(&transactions, currency));
        }

        TransactionCommands::Show { id } => {
            let txn = service.get(id)?;
            print!("{}", format_transaction_details(&txn, currency));
        }

        TransactionCommands::Edit {
            id,
            kind,
            category,
            amount,
            description,
            date,
        } => {
            let edit = TransactionEdit {
                kind,
                category,
                amount,
                description,
                date,
            };
            if edit.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(id, edit)?;
            println!("Updated transaction: #{}", updated.id);
            print!("{}", format_transaction_details(&updated, currency));
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service.get(id)?;

            if !force {
                println!("About to delete transaction:");
                print!("{}", format_transaction_details(&txn, currency));
                println!();
                if !confirm("Delete this transaction? (yes/no): ")? {
                    println!("Aborted. Use --force to skip confirmation.");
                    return Ok(());
                }
            }

            let deleted = service.delete(txn.id)?;
            println!(
                "Deleted transaction: #{} ({} {} {})",
                deleted.id,
                deleted.date,
                deleted.category,
                deleted.amount.format_with_symbol(currency)
            );
        }
    }

    Ok(())
}

/// Ask a yes/no question on stdin; anything but "y"/"yes" declines
fn confirm(prompt: &str) -> TallyResult<bool> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
