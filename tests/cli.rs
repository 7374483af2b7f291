//! End-to-end tests for the fintrack binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn add_budget(data_dir: &TempDir, category: &str, amount: &str) {
    fintrack(data_dir)
        .args(["budget", "add", "--category", category, "--amount", amount])
        .assert()
        .success();
}

#[test]
fn no_command_prints_usage_hint() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("fintrack --help"));
}

#[test]
fn init_creates_database_and_settings() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized fintrack"));

    assert!(dir.path().join("finance.db").exists());
    assert!(dir.path().join("config.json").exists());

    fintrack(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Import mode:     insert"));
}

#[test]
fn budget_lifecycle() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["budget", "add", "--category", "Groceries", "--amount", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget:   Groceries (#1)"))
        .stdout(predicate::str::contains("$400.00"));

    fintrack(&dir)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("monthly"));

    fintrack(&dir)
        .args([
            "budget",
            "update",
            "--category",
            "Groceries",
            "--new-category",
            "Food",
            "--amount",
            "450.50",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget:   Food (#1)"))
        .stdout(predicate::str::contains("$450.50"));

    fintrack(&dir)
        .args(["budget", "delete", "--id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted budget #1"));

    fintrack(&dir)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No budgets found."));
}

#[test]
fn duplicate_budget_fails() {
    let dir = TempDir::new().unwrap();
    add_budget(&dir, "Rent", "1200");

    fintrack(&dir)
        .args(["budget", "add", "--category", "Rent", "--amount", "900"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn budget_rejects_bad_input() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["budget", "add", "--category", "Rent", "--amount", "lots"])
        .assert()
        .failure();

    fintrack(&dir)
        .args(["budget", "add", "--category", "Rent", "--amount", "0"])
        .assert()
        .failure();

    fintrack(&dir)
        .args(["budget", "update", "--id", "1"])
        .assert()
        .failure();

    fintrack(&dir)
        .args(["budget", "delete", "--category", "Nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn transaction_add_list_and_search() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args([
            "transaction", "add", "--payee", "Corner Market", "--amount", "-45.50",
            "--category", "Groceries", "--date", "2025-01-03",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Corner Market"));

    fintrack(&dir)
        .args([
            "txn", "add", "--payee", "Landlord", "--amount", "-1200", "--category", "Rent",
            "--date", "2025-01-01",
        ])
        .assert()
        .success();

    fintrack(&dir)
        .args(["transaction", "list", "--search", "GROC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Corner Market"))
        .stdout(predicate::str::contains("Landlord").not());

    fintrack(&dir)
        .args(["transaction", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"payee\": \"Landlord\""));

    fintrack(&dir)
        .args(["transaction", "delete", "--id", "1"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["transaction", "delete", "--id", "1"])
        .assert()
        .failure();
}

#[test]
fn import_insert_mode() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("bank.csv");
    std::fs::write(
        &csv,
        "date,payee,category,amount\n\
         2025-01-02,\"Cafe, Downtown\",Food,-4.50\n\
         2025-01-03,Employer,,2500\n",
    )
    .unwrap();

    fintrack(&dir)
        .args(["import", csv.to_str().unwrap(), "--mode", "insert"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported:          2"))
        .stdout(predicate::str::contains("Unreadable rows:   1"));

    fintrack(&dir)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cafe, Downtown"))
        .stdout(predicate::str::contains("Uncategorized"));
}

#[test]
fn import_reconcile_mode_decrements_budgets() {
    let dir = TempDir::new().unwrap();
    add_budget(&dir, "Food", "100");

    let csv = dir.path().join("bank.csv");
    std::fs::write(
        &csv,
        "2025-01-02,Cafe,Food,-4.50\n\
         2025-01-03,Market,Food,-31.00\n\
         2025-01-04,Bar,Drinks,-12.00\n",
    )
    .unwrap();

    fintrack(&dir)
        .args(["import", csv.to_str().unwrap(), "--mode", "reconcile", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"processed\": 2"))
        .stdout(predicate::str::contains("\"Drinks\""));

    fintrack(&dir)
        .args(["budget", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount\": 64.5"));

    fintrack(&dir)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn import_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["import", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File error"));
}

#[test]
fn import_rejects_unknown_mode() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("bank.csv");
    std::fs::write(&csv, "2025-01-02,Cafe,Food,-4.50\n").unwrap();

    fintrack(&dir)
        .args(["import", csv.to_str().unwrap(), "--mode", "merge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid import mode"));
}

#[test]
fn report_shows_spending_against_budgets() {
    let dir = TempDir::new().unwrap();
    add_budget(&dir, "Food", "100");
    add_budget(&dir, "Rent", "1000");

    fintrack(&dir)
        .args([
            "transaction", "add", "--payee", "Market", "--amount", "-90", "--category", "Food",
        ])
        .assert()
        .success();

    fintrack(&dir)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget Report"))
        .stdout(predicate::str::contains("TOTAL"));

    fintrack(&dir)
        .args(["report", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"category\": \"Food\""))
        .stdout(predicate::str::contains("\"percent_used\": 90.0"))
        .stdout(predicate::str::contains("\"status\": \"warning\""));
}

#[test]
fn report_with_no_budgets() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("No budgets defined."));
}
