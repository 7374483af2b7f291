//! Transaction model
//!
//! A single dated money movement. Transactions are created individually or
//! by CSV import and deleted by id; they are never edited in place.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Category assigned to transactions entered without one
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,

    /// Transaction date as entered (normally `YYYY-MM-DD`)
    pub date: String,

    pub payee: String,

    /// Soft reference to `Budget::category`
    pub category: String,

    /// Negative for money going out
    pub amount: Money,
}

/// A transaction that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub date: String,
    pub payee: String,
    pub category: String,
    pub amount: Money,
}

impl NewTransaction {
    /// Build a new transaction, defaulting a blank category to "Uncategorized"
    pub fn new(
        date: impl Into<String>,
        payee: impl Into<String>,
        category: &str,
        amount: Money,
    ) -> Self {
        Self {
            date: date.into(),
            payee: payee.into(),
            category: Transaction::category_or_default(category),
            amount,
        }
    }
}

impl Transaction {
    /// Check if this transaction is money going out
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }

    /// Normalize a category entered by the user
    pub fn category_or_default(category: &str) -> String {
        let trimmed = category.trim();
        if trimmed.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_default() {
        assert_eq!(Transaction::category_or_default(""), UNCATEGORIZED);
        assert_eq!(Transaction::category_or_default("   "), UNCATEGORIZED);
        assert_eq!(Transaction::category_or_default(" Food "), "Food");
    }

    #[test]
    fn test_outflow() {
        let txn = Transaction {
            id: 1,
            date: "2025-01-01".into(),
            payee: "Store".into(),
            category: "Food".into(),
            amount: Money::from_cents(-2500),
        };
        assert!(txn.is_outflow());
    }
}
