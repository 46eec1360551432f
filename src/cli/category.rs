//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::TallyResult;
use crate::models::TransactionType;
use crate::services::CategoryRegistry;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories, both types unless --type is given
    List {
        /// Only show income or expense categories
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionType>,
    },

    /// Register a new category
    Add {
        /// Category name
        name: String,
        /// Category type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: TransactionType,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> TallyResult<()> {
    let registry = CategoryRegistry::new(storage);

    match cmd {
        CategoryCommands::List { kind } => {
            let kinds: Vec<TransactionType> = match kind {
                Some(kind) => vec![kind],
                None => TransactionType::ALL.to_vec(),
            };

            for (i, kind) in kinds.into_iter().enumerate() {
                if i > 0 {
                    println!();
                }
                let categories = registry.list_categories(kind)?;
                print!("{}", format_category_list(kind, &categories));
            }
        }

        CategoryCommands::Add { name, kind } => {
            let category = registry.add_category(&name, kind)?;
            println!("Created {} category: {}", category.kind, category.name);
        }
    }

    Ok(())
}
