//! CLI command handler for CSV import

use std::path::Path;

use crate::config::{ImportMode, Settings};
use crate::error::{FinanceError, FinanceResult};
use crate::services::{ImportService, ImportSummary};
use crate::storage::Storage;

/// Handle the import command
///
/// `mode` overrides the `import_mode` setting when given.
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    file: &Path,
    mode: Option<&str>,
    json: bool,
) -> FinanceResult<ImportSummary> {
    let mode = match mode {
        Some(m) => ImportMode::parse(m).ok_or_else(|| {
            FinanceError::Validation(format!(
                "Invalid import mode: '{}'. Valid modes: insert, reconcile",
                m
            ))
        })?,
        None => settings.import_mode,
    };

    let summary = ImportService::new(storage).import(file, mode)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary, &settings.currency_symbol));
    }

    Ok(summary)
}

fn format_summary(summary: &ImportSummary, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Import complete ({} mode)\n", summary.mode));
    output.push_str(&"=".repeat(40));
    output.push('\n');

    match summary.mode {
        ImportMode::Insert => {
            output.push_str(&format!("  Imported:          {}\n", summary.processed));
        }
        ImportMode::Reconcile => {
            output.push_str(&format!("  Rows applied:      {}\n", summary.processed));
            for (category, amount) in &summary.updated {
                output.push_str(&format!(
                    "    {:<20} -{}\n",
                    category,
                    amount.format_with_symbol(symbol)
                ));
            }
            if !summary.skipped_categories.is_empty() {
                output.push_str(&format!(
                    "  No budget for:     {}\n",
                    summary.skipped_categories.join(", ")
                ));
            }
        }
    }

    if summary.unparsed_rows > 0 {
        output.push_str(&format!("  Unreadable rows:   {}\n", summary.unparsed_rows));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, Money};
    use tempfile::TempDir;

    #[test]
    fn test_mode_override_and_setting_fallback() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bank.csv");
        std::fs::write(&path, "2025-01-01,Store,Food,-25\n").unwrap();

        let storage = Storage::open_in_memory().unwrap();
        storage
            .budgets()
            .add("Food", Money::from_cents(10000), BudgetPeriod::Monthly, None)
            .unwrap();

        let settings = Settings {
            import_mode: ImportMode::Reconcile,
            ..Settings::default()
        };

        let summary = handle_import_command(&storage, &settings, &path, None, false).unwrap();
        assert_eq!(summary.mode, ImportMode::Reconcile);

        let summary =
            handle_import_command(&storage, &settings, &path, Some("insert"), false).unwrap();
        assert_eq!(summary.mode, ImportMode::Insert);
        assert_eq!(storage.transactions().count().unwrap(), 1);
    }

    #[test]
    fn test_invalid_mode() {
        let storage = Storage::open_in_memory().unwrap();
        let err = handle_import_command(
            &storage,
            &Settings::default(),
            Path::new("unused.csv"),
            Some("merge"),
            false,
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_format_reconcile_summary() {
        let mut summary = ImportSummary {
            mode: ImportMode::Reconcile,
            processed: 1,
            updated: Default::default(),
            skipped_categories: vec!["Unknown".into()],
            unparsed_rows: 0,
        };
        summary
            .updated
            .insert("Food".into(), Money::from_cents(2500));

        let output = format_summary(&summary, "$");
        assert!(output.contains("Rows applied:      1"));
        assert!(output.contains("-$25.00"));
        assert!(output.contains("No budget for:     Unknown"));
        assert!(!output.contains("Unreadable"));
    }
}
