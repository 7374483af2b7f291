//! fintrack - Terminal personal finance tracker
//!
//! This library provides the core functionality for the fintrack application:
//! budgets and transactions stored in SQLite, CSV import with optional budget
//! reconciliation, and a budget-vs-actual spending report. Both the scripted
//! CLI and the interactive dashboard are thin layers over these modules.
//!
//! # Architecture
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Money, budgets and transactions
//! - `storage`: SQLite storage gateway
//! - `services`: Validation and CSV import
//! - `reports`: Budget-vs-actual report
//! - `display`: Plain-text formatting for CLI output
//! - `cli`: Command handlers for the scripted interface
//! - `tui`: Interactive dashboard
//!
//! # Example
//!
//! ```rust
//! use fintrack::models::Money;
//! use fintrack::reports::BudgetReport;
//! use fintrack::services::{BudgetService, CreateBudgetInput};
//! use fintrack::storage::Storage;
//!
//! let storage = Storage::open_in_memory()?;
//! BudgetService::new(&storage).create(CreateBudgetInput {
//!     category: "Food".into(),
//!     amount: Money::from_cents(10000),
//!     period: Default::default(),
//!     start_date: None,
//! })?;
//! let report = BudgetReport::generate(&storage)?;
//! assert_eq!(report.rows.len(), 1);
//! # Ok::<(), fintrack::FinanceError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{FinanceError, FinanceResult};
