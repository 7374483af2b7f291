//! Core data models for fintrack
//!
//! This module contains the data structures persisted by the storage layer:
//! money amounts, budgets and transactions.

pub mod budget;
pub mod money;
pub mod transaction;

pub use budget::{Budget, BudgetChanges, BudgetPeriod};
pub use money::{Money, MoneyParseError};
pub use transaction::{NewTransaction, Transaction, UNCATEGORIZED};
