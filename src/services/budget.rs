//! Budget service
//!
//! Validates user input before it reaches the budget repository: a budget
//! needs a non-empty category and a positive amount, and an update must
//! change something.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Budget, BudgetChanges, BudgetPeriod, Money};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new budget
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    pub category: String,
    pub amount: Money,
    pub period: BudgetPeriod,
    /// Defaults to the first day of the current month
    pub start_date: Option<NaiveDate>,
}

/// How a command refers to an existing budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetSelector {
    Id(i64),
    Category(String),
}

impl fmt::Display for BudgetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{}", id),
            Self::Category(category) => write!(f, "'{}'", category),
        }
    }
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a budget and return it as stored
    pub fn create(&self, input: CreateBudgetInput) -> FinanceResult<Budget> {
        let category = validate_category(&input.category)?;
        validate_amount(input.amount)?;

        let start_date = input.start_date.unwrap_or_else(first_of_current_month);
        let id = self
            .storage
            .budgets()
            .add(&category, input.amount, input.period, Some(start_date))?;

        log::info!("Created budget '{}' with limit {}", category, input.amount);
        self.get(id)
    }

    /// Apply changes to the selected budget and return the updated budget
    pub fn update(&self, selector: &BudgetSelector, changes: BudgetChanges) -> FinanceResult<Budget> {
        if changes.is_empty() {
            return Err(FinanceError::Validation(
                "Nothing to update: give a new category or a new amount".into(),
            ));
        }

        let changes = BudgetChanges {
            category: changes
                .category
                .as_deref()
                .map(validate_category)
                .transpose()?,
            amount: changes.amount.map(validate_amount).transpose()?,
        };

        let budget = self.resolve(selector)?;
        self.storage.budgets().update(budget.id, &changes)?;

        log::info!("Updated budget {}", selector);
        self.get(budget.id)
    }

    /// Delete the selected budget
    pub fn delete(&self, selector: &BudgetSelector) -> FinanceResult<()> {
        match selector {
            BudgetSelector::Id(id) => self.storage.budgets().delete(*id)?,
            BudgetSelector::Category(category) => {
                self.storage.budgets().delete_by_category(category)?
            }
        }
        log::info!("Deleted budget {}", selector);
        Ok(())
    }

    /// All budgets ordered by category
    pub fn list(&self) -> FinanceResult<Vec<Budget>> {
        self.storage.budgets().list()
    }

    /// Look up the selected budget, failing with `NotFound` if it is absent
    pub fn resolve(&self, selector: &BudgetSelector) -> FinanceResult<Budget> {
        let found = match selector {
            BudgetSelector::Id(id) => self.storage.budgets().get(*id)?,
            BudgetSelector::Category(category) => {
                self.storage.budgets().find_by_category(category)?
            }
        };
        found.ok_or_else(|| match selector {
            BudgetSelector::Id(id) => FinanceError::budget_not_found(id.to_string()),
            BudgetSelector::Category(category) => FinanceError::budget_not_found(category.as_str()),
        })
    }

    fn get(&self, id: i64) -> FinanceResult<Budget> {
        self.storage
            .budgets()
            .get(id)?
            .ok_or_else(|| FinanceError::budget_not_found(id.to_string()))
    }
}

/// Parse a budget amount typed by the user; it must be positive
pub fn parse_budget_amount(input: &str) -> FinanceResult<Money> {
    let amount = Money::parse(input)
        .map_err(|_| FinanceError::Validation(format!("Invalid amount: '{}'", input.trim())))?;
    validate_amount(amount)
}

fn validate_category(category: &str) -> FinanceResult<String> {
    let category = category.trim();
    if category.is_empty() {
        return Err(FinanceError::Validation("Category cannot be empty".into()));
    }
    Ok(category.to_string())
}

fn validate_amount(amount: Money) -> FinanceResult<Money> {
    if !amount.is_positive() {
        return Err(FinanceError::Validation(format!(
            "Budget amount must be positive, got {}",
            amount
        )));
    }
    Ok(amount)
}

fn first_of_current_month() -> NaiveDate {
    let today = Local::now().date_naive();
    today.with_day(1).unwrap_or(today)
}
