//! CSV import service
//!
//! Imports `date,payee,category,amount` rows in one of two modes:
//!
//! - [`ImportMode::Insert`] appends every valid row as a transaction inside a
//!   single database transaction, so a failure leaves nothing behind.
//! - [`ImportMode::Reconcile`] spends each row against the budget with the
//!   same category, decrementing its remaining amount one statement at a
//!   time. Rows already applied stay applied if a later row fails.
//!
//! No row is treated as a header by position. A header line fails amount
//! parsing like any other malformed row and is counted in `unparsed_rows`.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

use crate::config::ImportMode;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, NewTransaction, Transaction};
use crate::storage::Storage;

/// Accepted date layouts; the first one is also the stored layout
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%Y/%m/%d", "%d.%m.%Y", "%m-%d-%Y",
];

/// A CSV row that parsed cleanly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// Normalized to `YYYY-MM-DD`
    pub date: String,
    pub payee: String,
    pub category: String,
    pub amount: Money,
}

/// Result of reading an import file, before anything is stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedImport {
    pub rows: Vec<ImportRow>,
    /// Rows with four or more fields whose amount or date did not parse
    pub unparsed_rows: usize,
}

/// Outcome of an import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub mode: ImportMode,
    /// Rows inserted (insert mode) or applied to a budget (reconcile mode)
    pub processed: usize,
    /// Total spent per budget category (reconcile mode only)
    pub updated: BTreeMap<String, Money>,
    /// Categories with no matching budget, first occurrence order
    pub skipped_categories: Vec<String>,
    pub unparsed_rows: usize,
}

impl ImportSummary {
    fn new(mode: ImportMode, unparsed_rows: usize) -> Self {
        Self {
            mode,
            processed: 0,
            updated: BTreeMap::new(),
            skipped_categories: Vec::new(),
            unparsed_rows,
        }
    }

    /// Sum of all budget decrements
    pub fn total_updated(&self) -> Money {
        self.updated.values().copied().sum()
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            ImportMode::Insert => write!(f, "Imported {} transactions", self.processed)?,
            ImportMode::Reconcile => write!(
                f,
                "Reconciled {} rows against {} budgets ({} total)",
                self.processed,
                self.updated.len(),
                self.total_updated()
            )?,
        }
        if !self.skipped_categories.is_empty() {
            write!(f, "; no budget for: {}", self.skipped_categories.join(", "))?;
        }
        if self.unparsed_rows > 0 {
            write!(f, "; {} unreadable rows skipped", self.unparsed_rows)?;
        }
        Ok(())
    }
}

/// Service for importing transactions from CSV files
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import the CSV file at `path` using `mode`
    pub fn import(&self, path: impl AsRef<Path>, mode: ImportMode) -> FinanceResult<ImportSummary> {
        let path = path.as_ref();
        let parsed = parse_file(path)?;
        log::info!(
            "Importing {} rows from {} ({} mode)",
            parsed.rows.len(),
            path.display(),
            mode
        );

        let summary = self.apply(parsed, mode)?;
        log::info!("{}", summary);
        Ok(summary)
    }

    /// Store already-parsed rows using `mode`
    pub fn apply(&self, parsed: ParsedImport, mode: ImportMode) -> FinanceResult<ImportSummary> {
        match mode {
            ImportMode::Insert => self.insert(parsed),
            ImportMode::Reconcile => self.reconcile(parsed),
        }
    }

    fn insert(&self, parsed: ParsedImport) -> FinanceResult<ImportSummary> {
        let mut summary = ImportSummary::new(ImportMode::Insert, parsed.unparsed_rows);
        let txns: Vec<NewTransaction> = parsed
            .rows
            .into_iter()
            .map(|row| NewTransaction::new(row.date, row.payee, &row.category, row.amount))
            .collect();

        summary.processed = self.storage.transactions().add_many(&txns)?;
        Ok(summary)
    }

    fn reconcile(&self, parsed: ParsedImport) -> FinanceResult<ImportSummary> {
        let mut summary = ImportSummary::new(ImportMode::Reconcile, parsed.unparsed_rows);
        let budgets = self.storage.budgets();

        for row in parsed.rows {
            let category = Transaction::category_or_default(&row.category);
            let spend = row.amount.abs();

            if budgets.find_by_category(&category)?.is_none() {
                if !summary.skipped_categories.contains(&category) {
                    log::warn!("No budget for category '{}', skipping", category);
                    summary.skipped_categories.push(category);
                }
                continue;
            }

            budgets.decrement(&category, spend)?;
            *summary.updated.entry(category).or_insert_with(Money::zero) += spend;
            summary.processed += 1;
        }

        Ok(summary)
    }
}

/// Read and parse the CSV file at `path`
pub fn parse_file(path: &Path) -> FinanceResult<ParsedImport> {
    let file = std::fs::File::open(path)
        .map_err(|e| FinanceError::File(format!("Cannot open {}: {}", path.display(), e)))?;
    parse_reader(file)
        .map_err(|e| FinanceError::File(format!("Cannot read {}: {}", path.display(), e)))
}

/// Parse CSV data from any reader
pub fn parse_reader<R: Read>(reader: R) -> Result<ParsedImport, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut parsed = ParsedImport::default();
    for record in reader.records() {
        let record = record?;
        match parse_record(&record) {
            None => {}
            Some(Ok(row)) => parsed.rows.push(row),
            Some(Err(reason)) => {
                log::debug!("Skipping CSV row {:?}: {}", record, reason);
                parsed.unparsed_rows += 1;
            }
        }
    }
    Ok(parsed)
}

/// `None` for rows too short to consider, otherwise the parsed row or the
/// reason it could not be parsed
fn parse_record(record: &StringRecord) -> Option<FinanceResult<ImportRow>> {
    if record.len() < 4 {
        return None;
    }

    let (date, payee, category, amount) = (&record[0], &record[1], &record[2], &record[3]);
    Some(
        Money::parse(amount)
            .map_err(|e| FinanceError::Parse(e.to_string()))
            .and_then(|amount| {
                let date = parse_date(date)?;
                Ok(ImportRow {
                    date: date.format(DATE_FORMATS[0]).to_string(),
                    payee: payee.to_string(),
                    category: category.to_string(),
                    amount,
                })
            }),
    )
}

fn parse_date(s: &str) -> FinanceResult<NaiveDate> {
    DATE_FORMATS
        .iter()
        .filter_map(|format| NaiveDate::parse_from_str(s, format).ok())
        // %Y also matches "25", which would land in year 25
        .find(|date| date.year() >= 1000)
        .ok_or_else(|| FinanceError::Parse(format!("Could not parse date: '{}'", s)))
}
