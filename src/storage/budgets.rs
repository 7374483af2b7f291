//! Budget repository
//!
//! CRUD over the `budgets` table. Category uniqueness is enforced by the
//! table's UNIQUE constraint and surfaced as `DuplicateCategory`.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Budget, BudgetChanges, BudgetPeriod, Money};

const DATE_FORMAT: &str = "%Y-%m-%d";
const SELECT_BUDGET: &str = "SELECT id, category, amount, period, start_date FROM budgets";

/// Repository for budget persistence
pub struct BudgetRepository<'a> {
    conn: &'a Connection,
}

impl<'a> BudgetRepository<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a budget and return its id
    pub fn add(
        &self,
        category: &str,
        amount: Money,
        period: BudgetPeriod,
        start_date: Option<NaiveDate>,
    ) -> FinanceResult<i64> {
        self.conn
            .execute(
                "INSERT INTO budgets (category, amount, period, start_date) VALUES (?1, ?2, ?3, ?4)",
                params![
                    category,
                    amount.to_f64(),
                    period.as_str(),
                    start_date.map(|d| d.format(DATE_FORMAT).to_string()),
                ],
            )
            .map_err(|e| map_constraint_error(e, category))?;

        let id = self.conn.last_insert_rowid();
        log::debug!("Added budget {} '{}' ({})", id, category, amount);
        Ok(id)
    }

    /// Apply changes to the budget with `id`
    pub fn update(&self, id: i64, changes: &BudgetChanges) -> FinanceResult<()> {
        let affected = match (&changes.category, changes.amount) {
            (Some(category), Some(amount)) => self
                .conn
                .execute(
                    "UPDATE budgets SET category = ?1, amount = ?2 WHERE id = ?3",
                    params![category, amount.to_f64(), id],
                )
                .map_err(|e| map_constraint_error(e, category))?,
            (Some(category), None) => self
                .conn
                .execute(
                    "UPDATE budgets SET category = ?1 WHERE id = ?2",
                    params![category, id],
                )
                .map_err(|e| map_constraint_error(e, category))?,
            (None, Some(amount)) => self.conn.execute(
                "UPDATE budgets SET amount = ?1 WHERE id = ?2",
                params![amount.to_f64(), id],
            )?,
            (None, None) => {
                return Err(FinanceError::Validation(
                    "At least one of category or amount must change".into(),
                ))
            }
        };

        if affected == 0 {
            return Err(FinanceError::budget_not_found(id.to_string()));
        }
        log::debug!("Updated budget {}: {:?}", id, changes);
        Ok(())
    }

    /// Delete the budget with `id`
    pub fn delete(&self, id: i64) -> FinanceResult<()> {
        let affected = self
            .conn
            .execute("DELETE FROM budgets WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(FinanceError::budget_not_found(id.to_string()));
        }
        log::debug!("Deleted budget {}", id);
        Ok(())
    }

    /// Delete the budget for `category` (exact match)
    pub fn delete_by_category(&self, category: &str) -> FinanceResult<()> {
        let affected = self
            .conn
            .execute("DELETE FROM budgets WHERE category = ?1", params![category])?;
        if affected == 0 {
            return Err(FinanceError::budget_not_found(category));
        }
        log::debug!("Deleted budget '{}'", category);
        Ok(())
    }

    /// All budgets ordered by category (byte-wise, case-sensitive)
    pub fn list(&self) -> FinanceResult<Vec<Budget>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY category ASC", SELECT_BUDGET))?;
        let budgets = stmt
            .query_map([], budget_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(budgets)
    }

    pub fn get(&self, id: i64) -> FinanceResult<Option<Budget>> {
        let budget = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_BUDGET),
                params![id],
                budget_from_row,
            )
            .optional()?;
        Ok(budget)
    }

    /// Find a budget by exact category name
    pub fn find_by_category(&self, category: &str) -> FinanceResult<Option<Budget>> {
        let budget = self
            .conn
            .query_row(
                &format!("{} WHERE category = ?1", SELECT_BUDGET),
                params![category],
                budget_from_row,
            )
            .optional()?;
        Ok(budget)
    }

    /// Subtract `amount` from the budget's remaining balance
    pub fn decrement(&self, category: &str, amount: Money) -> FinanceResult<()> {
        let affected = self.conn.execute(
            "UPDATE budgets SET amount = amount - ?1 WHERE category = ?2",
            params![amount.to_f64(), category],
        )?;
        if affected == 0 {
            return Err(FinanceError::budget_not_found(category));
        }
        Ok(())
    }

    pub fn count(&self) -> FinanceResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM budgets", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn budget_from_row(row: &Row<'_>) -> rusqlite::Result<Budget> {
    let period: Option<String> = row.get(3)?;
    let start_date: Option<String> = row.get(4)?;

    Ok(Budget {
        id: row.get(0)?,
        category: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        amount: Money::from_f64(row.get::<_, Option<f64>>(2)?.unwrap_or(0.0)),
        period: period
            .as_deref()
            .and_then(BudgetPeriod::parse)
            .unwrap_or_default(),
        start_date: start_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok()),
    })
}

fn map_constraint_error(err: rusqlite::Error, category: &str) -> FinanceError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            FinanceError::DuplicateCategory(category.to_string())
        }
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::FinanceError;
    use crate::models::{BudgetChanges, BudgetPeriod, Money};
    use crate::storage::Storage;
    use chrono::NaiveDate;

    fn money(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    #[test]
    fn test_add_and_list_sorted_by_category() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.budgets();

        repo.add("Rent", money(120000), BudgetPeriod::Monthly, None).unwrap();
        repo.add("Food", money(40000), BudgetPeriod::Weekly, None).unwrap();
        repo.add("fun", money(5000), BudgetPeriod::Monthly, None).unwrap();

        let budgets = repo.list().unwrap();
        let names: Vec<_> = budgets.iter().map(|b| b.category.as_str()).collect();
        // Uppercase sorts before lowercase
        assert_eq!(names, vec!["Food", "Rent", "fun"]);
        assert_eq!(budgets[0].amount, money(40000));
        assert_eq!(budgets[0].period, BudgetPeriod::Weekly);
    }

    #[test]
    fn test_start_date_round_trip() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.budgets();
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let id = repo
            .add("Food", money(10000), BudgetPeriod::Yearly, Some(start))
            .unwrap();

        let budget = repo.get(id).unwrap().unwrap();
        assert_eq!(budget.start_date, Some(start));
        assert_eq!(budget.period, BudgetPeriod::Yearly);
    }

    #[test]
    fn test_duplicate_category_leaves_original() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.budgets();

        repo.add("Food", money(10000), BudgetPeriod::Monthly, None).unwrap();
        let err = repo
            .add("Food", money(99900), BudgetPeriod::Monthly, None)
            .unwrap_err();

        assert!(matches!(err, FinanceError::DuplicateCategory(ref c) if c == "Food"));
        let budgets = repo.list().unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].amount, money(10000));
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.budgets();
        repo.add("Food", money(10000), BudgetPeriod::Monthly, None).unwrap();
        let before = repo.list().unwrap();

        let changes = BudgetChanges {
            amount: Some(money(500)),
            ..Default::default()
        };
        let err = repo.update(999, &changes).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(repo.list().unwrap(), before);
    }

    #[test]
    fn test_update_requires_a_change() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.budgets();
        let id = repo.add("Food", money(10000), BudgetPeriod::Monthly, None).unwrap();

        let err = repo.update(id, &BudgetChanges::default()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_rename_onto_existing_category_is_duplicate() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.budgets();
        repo.add("Food", money(10000), BudgetPeriod::Monthly, None).unwrap();
        let id = repo.add("Fun", money(5000), BudgetPeriod::Monthly, None).unwrap();

        let changes = BudgetChanges {
            category: Some("Food".into()),
            amount: None,
        };
        assert!(repo.update(id, &changes).unwrap_err().is_duplicate());
    }

    #[test]
    fn test_delete_twice_fails_second_time() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.budgets();
        let id = repo.add("Food", money(10000), BudgetPeriod::Monthly, None).unwrap();
        repo.add("Rent", money(90000), BudgetPeriod::Monthly, None).unwrap();

        repo.delete(id).unwrap();
        assert_eq!(repo.count().unwrap(), 1);

        assert!(repo.delete(id).unwrap_err().is_not_found());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_by_category() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.budgets();
        repo.add("Food", money(10000), BudgetPeriod::Monthly, None).unwrap();

        assert!(repo.delete_by_category("food").unwrap_err().is_not_found());
        repo.delete_by_category("Food").unwrap();
        assert!(repo.find_by_category("Food").unwrap().is_none());
    }

    #[test]
    fn test_decrement() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.budgets();
        repo.add("Food", money(10000), BudgetPeriod::Monthly, None).unwrap();

        repo.decrement("Food", money(2550)).unwrap();

        let food = repo.find_by_category("Food").unwrap().unwrap();
        assert_eq!(food.amount, money(7450));
        assert!(repo.decrement("Travel", money(100)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_round_trip_add_update_delete() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.budgets();

        let id = repo.add("Food", money(10000), BudgetPeriod::Monthly, None).unwrap();
        let listed = repo.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!((listed[0].category.as_str(), listed[0].amount), ("Food", money(10000)));

        repo.update(
            id,
            &BudgetChanges {
                category: Some("Groceries".into()),
                amount: Some(money(15000)),
            },
        )
        .unwrap();
        let listed = repo.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(
            (listed[0].category.as_str(), listed[0].amount),
            ("Groceries", money(15000))
        );

        repo.delete(id).unwrap();
        assert!(repo.list().unwrap().is_empty());
    }
}
