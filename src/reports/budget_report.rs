//! Budget vs. actual report
//!
//! One row per budget with the signed sum of every transaction filed under
//! the same category. Transactions whose category has no budget are not
//! represented.

use serde::Serialize;

use crate::display::report::{format_bar, format_percentage};
use crate::error::FinanceResult;
use crate::models::Money;
use crate::storage::{BudgetSpending, Storage};

/// Width of the usage bar in the terminal rendering
const BAR_WIDTH: usize = 30;

/// How far through its limit a budget is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    OnTrack,
    /// More than 80% used
    Warning,
    /// More than 100% used
    Over,
}

impl ReportStatus {
    pub fn from_percent(percent: f64) -> Self {
        if percent > 100.0 {
            Self::Over
        } else if percent > 80.0 {
            Self::Warning
        } else {
            Self::OnTrack
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTrack => "on track",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

/// A row in the budget report for a single category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReportRow {
    pub category: String,
    pub limit: Money,
    /// Signed sum of matching transactions
    pub spent: Money,
    /// |spent| / limit × 100, or 0 when the limit is not positive
    pub percent_used: f64,
    pub status: ReportStatus,
}

impl BudgetReportRow {
    fn from_spending(spending: BudgetSpending) -> Self {
        let percent_used = spending.spent.abs().percent_of(spending.limit);
        Self {
            category: spending.category,
            limit: spending.limit,
            spent: spending.spent,
            percent_used,
            status: ReportStatus::from_percent(percent_used),
        }
    }

    /// Remaining headroom under the limit, negative once overspent
    pub fn remaining(&self) -> Money {
        self.limit - self.spent.abs()
    }
}

/// Budget vs. actual report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    /// Ordered by spent amount descending
    pub rows: Vec<BudgetReportRow>,
    pub total_limit: Money,
    /// Sum of |spent| across rows
    pub total_spent: Money,
}

impl BudgetReport {
    /// Build the report from the current store contents
    pub fn generate(storage: &Storage) -> FinanceResult<Self> {
        let rows: Vec<BudgetReportRow> = storage
            .spending_by_budget()?
            .into_iter()
            .map(BudgetReportRow::from_spending)
            .collect();

        let total_limit = rows.iter().map(|r| r.limit).sum();
        let total_spent = rows.iter().map(|r| r.spent.abs()).sum();

        Ok(Self {
            rows,
            total_limit,
            total_spent,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Overall usage across every budget
    pub fn total_percent(&self) -> f64 {
        self.total_spent.percent_of(self.total_limit)
    }

    pub fn over_budget_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.status == ReportStatus::Over)
            .count()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Budget Report\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No budgets defined.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>7}  {}\n",
            "Category", "Limit", "Spent", "Used", "Progress"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in &self.rows {
            let marker = match row.status {
                ReportStatus::Over => " *",
                _ => "",
            };
            output.push_str(&format!(
                "{:<20} {:>12} {:>12} {:>7}  {}{}\n",
                row.category,
                row.limit,
                row.spent.abs(),
                format_percentage(row.percent_used),
                format_bar(row.percent_used, 100.0, BAR_WIDTH),
                marker
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>7}\n",
            "TOTAL",
            self.total_limit,
            self.total_spent,
            format_percentage(self.total_percent())
        ));

        if self.over_budget_count() > 0 {
            output.push_str("\n* = Over budget\n");
        }

        output
    }
}
