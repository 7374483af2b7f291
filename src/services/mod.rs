//! Service layer for fintrack
//!
//! The service layer provides validation and business rules on top of the
//! storage layer. Every operation returns plain data; rendering is left to
//! the CLI and the dashboard.

pub mod budget;
pub mod import;
pub mod transaction;

pub use budget::{parse_budget_amount, BudgetSelector, BudgetService, CreateBudgetInput};
pub use import::{ImportRow, ImportService, ImportSummary, ParsedImport};
pub use transaction::{parse_transaction_amount, CreateTransactionInput, TransactionService};
