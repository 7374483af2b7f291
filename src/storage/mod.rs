//! Storage layer for fintrack
//!
//! A single SQLite connection opened once per process. Repositories borrow
//! the connection and issue one parameterized statement per operation; the
//! only multi-statement unit is [`TransactionRepository::add_many`].

pub mod budgets;
pub mod schema;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use transactions::TransactionRepository;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;

/// Spending aggregated against one budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetSpending {
    pub category: String,
    pub limit: Money,
    /// Signed sum of matching transaction amounts
    pub spent: Money,
}

/// Main storage coordinator that owns the database connection
pub struct Storage {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Storage {
    /// Open (creating if needed) the database at `path` and initialize the schema
    pub fn open(path: impl AsRef<Path>) -> FinanceResult<Self> {
        let path = path.as_ref();
        log::debug!("Opening database at {}", path.display());

        let conn = Connection::open(path).map_err(|e| {
            FinanceError::Connection(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let storage = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        storage.initialize()?;
        Ok(storage)
    }

    /// Open a private in-memory database (used by tests)
    pub fn open_in_memory() -> FinanceResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| FinanceError::Connection(e.to_string()))?;

        let storage = Self { conn, path: None };
        storage.initialize()?;
        Ok(storage)
    }

    /// Verify the connection and create any missing tables
    fn initialize(&self) -> FinanceResult<()> {
        self.conn
            .query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|e| FinanceError::Connection(e.to_string()))?;

        schema::create_schema(&self.conn).map_err(|e| FinanceError::Schema(e.to_string()))
    }

    /// Database file path, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn budgets(&self) -> BudgetRepository<'_> {
        BudgetRepository::new(&self.conn)
    }

    pub fn transactions(&self) -> TransactionRepository<'_> {
        TransactionRepository::new(&self.conn)
    }

    /// Per-budget spending, ordered by spent amount descending
    ///
    /// Transactions whose category matches no budget are left out.
    pub fn spending_by_budget(&self) -> FinanceResult<Vec<BudgetSpending>> {
        let mut stmt = self.conn.prepare(
            "SELECT b.category, b.amount, COALESCE(SUM(t.amount), 0) AS spent
             FROM budgets b
             LEFT JOIN transactions t ON b.category = t.category
             GROUP BY b.id
             ORDER BY spent DESC, b.id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(BudgetSpending {
                category: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                limit: Money::from_f64(row.get::<_, Option<f64>>(1)?.unwrap_or(0.0)),
                spent: Money::from_f64(row.get::<_, f64>(2)?),
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, NewTransaction};
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_database_file() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("finance.db");

        let storage = Storage::open(&db_path).unwrap();

        assert!(db_path.exists());
        assert_eq!(storage.path(), Some(db_path.as_path()));
    }

    #[test]
    fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("finance.db");

        {
            let storage = Storage::open(&db_path).unwrap();
            storage
                .budgets()
                .add("Food", Money::from_cents(10000), BudgetPeriod::Monthly, None)
                .unwrap();
        }

        let storage = Storage::open(&db_path).unwrap();
        let budgets = storage.budgets().list().unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].category, "Food");
    }

    #[test]
    fn test_open_in_missing_directory_is_connection_error() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("does-not-exist").join("finance.db");

        let err = Storage::open(&db_path).err().unwrap();
        assert!(matches!(err, FinanceError::Connection(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_spending_by_budget() {
        let storage = Storage::open_in_memory().unwrap();
        let budgets = storage.budgets();
        budgets
            .add("Food", Money::from_cents(20000), BudgetPeriod::Monthly, None)
            .unwrap();
        budgets
            .add("Fun", Money::from_cents(5000), BudgetPeriod::Monthly, None)
            .unwrap();

        let txns = storage.transactions();
        txns.add(&NewTransaction::new("2025-01-01", "Store", "Food", Money::from_cents(-4000)))
            .unwrap();
        txns.add(&NewTransaction::new("2025-01-02", "Market", "Food", Money::from_cents(-1000)))
            .unwrap();
        txns.add(&NewTransaction::new("2025-01-03", "Boss", "Salary", Money::from_cents(300000)))
            .unwrap();

        let rows = storage.spending_by_budget().unwrap();
        assert_eq!(rows.len(), 2);
        // Fun has no spending (0) which sorts above Food (-50)
        assert_eq!(rows[0].category, "Fun");
        assert_eq!(rows[0].spent, Money::zero());
        assert_eq!(rows[1].category, "Food");
        assert_eq!(rows[1].spent, Money::from_cents(-5000));
        assert_eq!(rows[1].limit, Money::from_cents(20000));
    }
}
