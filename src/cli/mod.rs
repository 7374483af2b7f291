//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod import;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use import::handle_import_command;
pub use report::handle_report_command;
pub use transaction::{handle_transaction_command, TransactionCommands};
