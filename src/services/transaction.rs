//! Transaction service
//!
//! Thin layer over the transaction repository that fills in defaults for
//! user-entered transactions.

use chrono::Local;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, NewTransaction, Transaction};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Blank means today (`YYYY-MM-DD`)
    pub date: String,
    pub payee: String,
    /// Blank means "Uncategorized"
    pub category: String,
    pub amount: Money,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a transaction and return it as stored
    pub fn create(&self, input: CreateTransactionInput) -> FinanceResult<Transaction> {
        let date = match input.date.trim() {
            "" => Local::now().date_naive().format("%Y-%m-%d").to_string(),
            date => date.to_string(),
        };
        let new = NewTransaction::new(date, input.payee.trim(), &input.category, input.amount);

        let id = self.storage.transactions().add(&new)?;
        log::info!("Recorded transaction {} for {}", id, new.amount);

        Ok(Transaction {
            id,
            date: new.date,
            payee: new.payee,
            category: new.category,
            amount: new.amount,
        })
    }

    /// Transactions newest first, optionally filtered by payee/category
    pub fn list(&self, search: Option<&str>) -> FinanceResult<Vec<Transaction>> {
        self.storage.transactions().list(search)
    }

    pub fn delete(&self, id: i64) -> FinanceResult<()> {
        self.storage.transactions().delete(id)?;
        log::info!("Deleted transaction {}", id);
        Ok(())
    }
}

/// Parse a transaction amount typed by the user; any sign is allowed
pub fn parse_transaction_amount(input: &str) -> FinanceResult<Money> {
    Money::parse(input)
        .map_err(|_| FinanceError::Validation(format!("Invalid amount: '{}'", input.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNCATEGORIZED;

    fn input(date: &str, payee: &str, category: &str, cents: i64) -> CreateTransactionInput {
        CreateTransactionInput {
            date: date.into(),
            payee: payee.into(),
            category: category.into(),
            amount: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_create_fills_defaults() {
        let storage = Storage::open_in_memory().unwrap();
        let service = TransactionService::new(&storage);

        let txn = service.create(input("", " Kiosk ", "", -350)).unwrap();

        assert_eq!(txn.payee, "Kiosk");
        assert_eq!(txn.category, UNCATEGORIZED);
        assert_eq!(txn.date.len(), 10);
        assert_eq!(service.list(None).unwrap(), vec![txn]);
    }

    #[test]
    fn test_create_keeps_free_form_date() {
        let storage = Storage::open_in_memory().unwrap();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(input("last tuesday", "Cafe", "Food", -420))
            .unwrap();
        assert_eq!(txn.date, "last tuesday");
    }

    #[test]
    fn test_list_search_and_delete() {
        let storage = Storage::open_in_memory().unwrap();
        let service = TransactionService::new(&storage);
        let cafe = service.create(input("2025-01-01", "Cafe", "Food", -420)).unwrap();
        service
            .create(input("2025-01-02", "Payroll", "Salary", 200000))
            .unwrap();

        let found = service.list(Some("CAFE")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, cafe.id);

        service.delete(cafe.id).unwrap();
        assert!(service.delete(cafe.id).unwrap_err().is_not_found());
        assert_eq!(service.list(None).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_transaction_amount() {
        assert_eq!(parse_transaction_amount("-25").unwrap(), Money::from_cents(-2500));
        assert!(parse_transaction_amount("lots").unwrap_err().is_validation());
    }
}
