//! Transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_transaction_list, format_transaction_short};
use crate::error::FinanceResult;
use crate::services::{parse_transaction_amount, CreateTransactionInput, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Payee name
        #[arg(short, long)]
        payee: String,
        /// Amount, negative for money going out (e.g., "-25.00")
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
        /// Category name (defaults to "Uncategorized")
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Only show transactions whose payee or category contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        #[arg(long)]
        id: i64,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            payee,
            amount,
            category,
            date,
        } => {
            let txn = service.create(CreateTransactionInput {
                date: date.unwrap_or_else(|| settings.today()),
                payee,
                category: category.unwrap_or_default(),
                amount: parse_transaction_amount(&amount)?,
            })?;
            println!("Recorded transaction {}", format_transaction_short(&txn));
        }

        TransactionCommands::List { search, json } => {
            let txns = service.list(search.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&txns)?);
            } else {
                println!(
                    "{}",
                    format_transaction_list(&txns, &settings.currency_symbol)
                );
            }
        }

        TransactionCommands::Delete { id } => {
            service.delete(id)?;
            println!("Deleted transaction #{}", id);
        }
    }

    Ok(())
}
