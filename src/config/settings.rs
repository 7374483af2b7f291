//! User settings for fintrack
//!
//! Manages user preferences including the CSV import policy, the default
//! budget period and display formatting.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

use super::paths::FinancePaths;
use crate::error::FinanceError;
use crate::models::BudgetPeriod;

/// How CSV imports are applied to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Append every valid row as a new transaction (atomic)
    #[default]
    Insert,
    /// Spend each row against the matching budget's remaining amount
    Reconcile,
}

impl ImportMode {
    /// Parse an import mode from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "insert" | "append" => Some(Self::Insert),
            "reconcile" | "match" => Some(Self::Reconcile),
            _ => None,
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Self::Insert => Self::Reconcile,
            Self::Reconcile => Self::Insert,
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => write!(f, "insert"),
            Self::Reconcile => write!(f, "reconcile"),
        }
    }
}

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Import policy used when none is given on the command line
    #[serde(default)]
    pub import_mode: ImportMode,

    /// Period assigned to new budgets when none is given
    #[serde(default)]
    pub default_period: BudgetPeriod,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            import_mode: ImportMode::default(),
            default_period: BudgetPeriod::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values that would fail later at display time
    pub fn validate(&self) -> Result<(), FinanceError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(FinanceError::Config(format!(
                "Invalid date_format '{}' in settings file",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Today's date in the configured format, `YYYY-MM-DD` if the format is unusable
    pub fn today(&self) -> String {
        let today = chrono::Local::now().date_naive();
        let mut formatted = String::new();
        match write!(formatted, "{}", today.format(&self.date_format)) {
            Ok(()) => formatted,
            Err(_) => {
                log::warn!("Invalid date_format '{}', using %Y-%m-%d", self.date_format);
                today.format(&default_date_format()).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.import_mode, ImportMode::Insert);
        assert_eq!(settings.default_period, BudgetPeriod::Monthly);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.import_mode = ImportMode::Reconcile;
        settings.default_period = BudgetPeriod::Weekly;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.import_mode, ImportMode::Reconcile);
        assert_eq!(loaded.default_period, BudgetPeriod::Weekly);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"import_mode":"reconcile"}"#).unwrap();
        assert_eq!(loaded.import_mode, ImportMode::Reconcile);
        assert_eq!(loaded.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_invalid_date_format_does_not_panic() {
        let settings = Settings {
            date_format: "%Q".into(),
            ..Settings::default()
        };
        let expected = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(settings.today(), expected);
        assert!(matches!(settings.validate(), Err(FinanceError::Config(_))));
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_load_rejects_invalid_date_format() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format":"%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FinanceError::Config(_)));
    }

    #[test]
    fn test_import_mode_parse() {
        assert_eq!(ImportMode::parse("Reconcile"), Some(ImportMode::Reconcile));
        assert_eq!(ImportMode::parse("insert"), Some(ImportMode::Insert));
        assert_eq!(ImportMode::parse("merge"), None);
        assert_eq!(ImportMode::Insert.toggled(), ImportMode::Reconcile);
    }
}
