//! Budget model
//!
//! A budget is a named spending ceiling for one category over a period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Length of a budget period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Weekly,
    Yearly,
}

impl BudgetPeriod {
    /// Parse a budget period from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "weekly" | "week" | "w" => Some(Self::Weekly),
            "yearly" | "year" | "annual" | "y" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// The value stored in the `period` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A spending limit for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier assigned by the database
    pub id: i64,

    /// Category name, unique across budgets (case-sensitive)
    pub category: String,

    /// Limit for the period; remaining balance when imports run in
    /// reconcile mode
    pub amount: Money,

    /// Budget period
    #[serde(default)]
    pub period: BudgetPeriod,

    /// First day the budget applies to; absent for rows created before the
    /// column existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.category, self.amount, self.period)
    }
}

/// Changes applied by a budget update; at least one field must be set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetChanges {
    pub category: Option<String>,
    pub amount: Option<Money>,
}

impl BudgetChanges {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.amount.is_none()
    }
}
