//! Reports module for fintrack
//!
//! Reports are computed from the store and returned as plain data; the CLI
//! and the dashboard decide how to show them.

pub mod budget_report;

pub use budget_report::{BudgetReport, BudgetReportRow, ReportStatus};
