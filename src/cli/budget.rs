//! Budget CLI commands
//!
//! Implements CLI commands for budget management.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::budget::{format_budget_details, format_budget_list};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{BudgetChanges, BudgetPeriod};
use crate::services::{parse_budget_amount, BudgetSelector, BudgetService, CreateBudgetInput};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget for a category
    Add {
        /// Category name (must be unique)
        #[arg(short, long)]
        category: String,
        /// Spending limit (e.g., "400" or "400.00")
        #[arg(short, long)]
        amount: String,
        /// Budget period (monthly, weekly, yearly)
        #[arg(short, long)]
        period: Option<String>,
        /// First day of the budget (YYYY-MM-DD), defaults to the start of this month
        #[arg(short, long)]
        start: Option<String>,
    },
    /// List all budgets
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Rename a budget and/or change its amount
    Update {
        /// Budget ID
        #[arg(long, required_unless_present = "category", conflicts_with = "category")]
        id: Option<i64>,
        /// Current category name
        #[arg(short, long)]
        category: Option<String>,
        /// New category name
        #[arg(short, long)]
        new_category: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
    },
    /// Delete a budget
    Delete {
        /// Budget ID
        #[arg(long, required_unless_present = "category", conflicts_with = "category")]
        id: Option<i64>,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FinanceResult<()> {
    let service = BudgetService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Add {
            category,
            amount,
            period,
            start,
        } => {
            let period = match period {
                Some(p) => BudgetPeriod::parse(&p).ok_or_else(|| {
                    FinanceError::Validation(format!(
                        "Invalid period: '{}'. Valid periods: monthly, weekly, yearly",
                        p
                    ))
                })?,
                None => settings.default_period,
            };
            let start_date = start.as_deref().map(parse_start_date).transpose()?;

            let budget = service.create(CreateBudgetInput {
                category,
                amount: parse_budget_amount(&amount)?,
                period,
                start_date,
            })?;

            println!("Created budget:");
            print!("{}", format_budget_details(&budget, symbol));
        }

        BudgetCommands::List { json } => {
            let budgets = service.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&budgets)?);
            } else {
                println!("{}", format_budget_list(&budgets, symbol));
            }
        }

        BudgetCommands::Update {
            id,
            category,
            new_category,
            amount,
        } => {
            let selector = selector(id, category)?;
            let changes = BudgetChanges {
                category: new_category,
                amount: amount.as_deref().map(parse_budget_amount).transpose()?,
            };

            let budget = service.update(&selector, changes)?;
            println!("Updated budget:");
            print!("{}", format_budget_details(&budget, symbol));
        }

        BudgetCommands::Delete { id, category } => {
            let selector = selector(id, category)?;
            service.delete(&selector)?;
            println!("Deleted budget {}", selector);
        }
    }

    Ok(())
}

fn selector(id: Option<i64>, category: Option<String>) -> FinanceResult<BudgetSelector> {
    match (id, category) {
        (Some(id), _) => Ok(BudgetSelector::Id(id)),
        (None, Some(category)) => Ok(BudgetSelector::Category(category)),
        (None, None) => Err(FinanceError::Validation(
            "Specify the budget with --id or --category".into(),
        )),
    }
}

fn parse_start_date(s: &str) -> FinanceResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        FinanceError::Validation(format!("Invalid start date: '{}'. Use YYYY-MM-DD", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_prefers_id() {
        assert_eq!(
            selector(Some(3), Some("Food".into())).unwrap(),
            BudgetSelector::Id(3)
        );
        assert_eq!(
            selector(None, Some("Food".into())).unwrap(),
            BudgetSelector::Category("Food".into())
        );
        assert!(selector(None, None).unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_start_date() {
        assert_eq!(
            parse_start_date("2025-02-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
        );
        assert!(parse_start_date("02/01/2025").unwrap_err().is_validation());
    }

    #[test]
    fn test_add_and_delete_commands() {
        let storage = Storage::open_in_memory().unwrap();
        let settings = Settings::default();

        handle_budget_command(
            &storage,
            &settings,
            BudgetCommands::Add {
                category: "Food".into(),
                amount: "400".into(),
                period: Some("weekly".into()),
                start: None,
            },
        )
        .unwrap();

        let budgets = storage.budgets().list().unwrap();
        assert_eq!(budgets[0].period, BudgetPeriod::Weekly);

        handle_budget_command(
            &storage,
            &settings,
            BudgetCommands::Delete {
                id: None,
                category: Some("Food".into()),
            },
        )
        .unwrap();
        assert_eq!(storage.budgets().count().unwrap(), 0);
    }

    #[test]
    fn test_add_rejects_bad_period() {
        let storage = Storage::open_in_memory().unwrap();

        let err = handle_budget_command(
            &storage,
            &Settings::default(),
            BudgetCommands::Add {
                category: "Food".into(),
                amount: "400".into(),
                period: Some("daily".into()),
                start: None,
            },
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}
