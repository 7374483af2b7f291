//! CLI command handler for the budget report

use crate::error::FinanceResult;
use crate::reports::BudgetReport;
use crate::storage::Storage;

/// Print the budget vs. actual report
pub fn handle_report_command(storage: &Storage, json: bool) -> FinanceResult<()> {
    let report = BudgetReport::generate(storage)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.format_terminal());
    }

    Ok(())
}
