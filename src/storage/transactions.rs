//! Transaction repository
//!
//! Transactions are append-only apart from deletion by id.

use rusqlite::{params, Connection, Row};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, NewTransaction, Transaction};

const INSERT_TRANSACTION: &str =
    "INSERT INTO transactions (date, payee, category, amount) VALUES (?1, ?2, ?3, ?4)";

/// Repository for transaction persistence
pub struct TransactionRepository<'a> {
    conn: &'a Connection,
}

impl<'a> TransactionRepository<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a transaction and return its id
    ///
    /// No validation happens here; the date is stored as given.
    pub fn add(&self, txn: &NewTransaction) -> FinanceResult<i64> {
        self.conn.execute(
            INSERT_TRANSACTION,
            params![txn.date, txn.payee, txn.category, txn.amount.to_f64()],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!("Added transaction {} ({} {})", id, txn.payee, txn.amount);
        Ok(id)
    }

    /// Insert all transactions in a single database transaction
    ///
    /// Either every row is stored or, on the first failure, none are.
    pub fn add_many(&self, txns: &[NewTransaction]) -> FinanceResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(INSERT_TRANSACTION)?;
            for txn in txns {
                stmt.execute(params![txn.date, txn.payee, txn.category, txn.amount.to_f64()])?;
            }
        }
        tx.commit()?;
        log::debug!("Inserted {} transactions", txns.len());
        Ok(txns.len())
    }

    /// Delete the transaction with `id`
    pub fn delete(&self, id: i64) -> FinanceResult<()> {
        let affected = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(FinanceError::transaction_not_found(id.to_string()));
        }
        log::debug!("Deleted transaction {}", id);
        Ok(())
    }

    /// List transactions, newest id first
    ///
    /// With a non-blank `search`, only transactions whose payee or category
    /// contains it (ASCII case-insensitive) are returned.
    pub fn list(&self, search: Option<&str>) -> FinanceResult<Vec<Transaction>> {
        let term = search.map(str::trim).filter(|s| !s.is_empty());

        let txns = match term {
            Some(term) => {
                let pattern = format!("%{}%", escape_like(term));
                let mut stmt = self.conn.prepare(
                    "SELECT id, date, payee, category, amount FROM transactions
                     WHERE payee LIKE ?1 ESCAPE '\\' OR category LIKE ?1 ESCAPE '\\'
                     ORDER BY id DESC",
                )?;
                let rows = stmt.query_map(params![pattern], transaction_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, date, payee, category, amount FROM transactions ORDER BY id DESC",
                )?;
                let rows = stmt.query_map([], transaction_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(txns)
    }

    pub fn count(&self) -> FinanceResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        date: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        payee: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        category: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        amount: Money::from_f64(row.get::<_, Option<f64>>(4)?.unwrap_or(0.0)),
    })
}

/// Escape LIKE wildcards so the search term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
