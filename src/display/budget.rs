//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Budget;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Start")]
    start: String,
}

/// Format budgets as a table
pub fn format_budget_list(budgets: &[Budget], currency_symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows = budgets.iter().map(|b| BudgetRow {
        id: b.id,
        category: b.category.clone(),
        amount: b.amount.format_with_symbol(currency_symbol),
        period: b.period.to_string(),
        start: b
            .start_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format budget details for display
pub fn format_budget_details(budget: &Budget, currency_symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Budget:   {} (#{})\n", budget.category, budget.id));
    output.push_str(&format!(
        "Amount:   {}\n",
        budget.amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("Period:   {}\n", budget.period));
    if let Some(start) = budget.start_date {
        output.push_str(&format!("Starts:   {}\n", start.format("%Y-%m-%d")));
    }
    output
}
