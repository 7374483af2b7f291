//! Display formatting for terminal output
//!
//! Plain-text renderings of budgets, transactions and reports for the
//! scripted commands. The dashboard draws its own widgets.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::{format_budget_details, format_budget_list};
pub use transaction::{format_transaction_list, format_transaction_short};
