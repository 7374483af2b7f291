//! Database schema creation and migration

use rusqlite::Connection;

const CREATE_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS budgets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category TEXT UNIQUE,
        amount REAL,
        period TEXT NOT NULL DEFAULT 'monthly',
        start_date TEXT
    );
    CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT,
        payee TEXT,
        category TEXT,
        amount REAL
    );
";

/// Columns added to `budgets` after the first release, with their definitions
const BUDGET_COLUMNS: &[(&str, &str)] = &[
    ("period", "TEXT NOT NULL DEFAULT 'monthly'"),
    ("start_date", "TEXT"),
];

/// Create both tables if absent and add columns missing from older databases
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_TABLES)?;

    let existing = table_columns(conn, "budgets")?;
    for (column, definition) in BUDGET_COLUMNS {
        if !existing.iter().any(|c| c == column) {
            log::info!("Migrating budgets table: adding column '{}'", column);
            conn.execute(
                &format!("ALTER TABLE budgets ADD COLUMN {} {}", column, definition),
                [],
            )?;
        }
    }

    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        create_schema(&conn).unwrap();

        let columns = table_columns(&conn, "budgets").unwrap();
        assert_eq!(columns, vec!["id", "category", "amount", "period", "start_date"]);
    }

    #[test]
    fn test_migrates_legacy_budgets_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE budgets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT UNIQUE,
                amount REAL
            );
            INSERT INTO budgets (category, amount) VALUES ('Rent', 1200.0);",
        )
        .unwrap();

        create_schema(&conn).unwrap();

        let columns = table_columns(&conn, "budgets").unwrap();
        assert!(columns.contains(&"period".to_string()));
        assert!(columns.contains(&"start_date".to_string()));

        let period: String = conn
            .query_row("SELECT period FROM budgets WHERE category = 'Rent'", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(period, "monthly");
    }
}
