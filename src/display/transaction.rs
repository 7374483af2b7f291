//! Transaction display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Payee")]
    payee: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format transactions as a table, newest first as given
pub fn format_transaction_list(transactions: &[Transaction], currency_symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow {
        id: t.id,
        date: t.date.clone(),
        payee: truncate(&t.payee, 30),
        category: t.category.clone(),
        amount: t.amount.format_with_symbol(currency_symbol),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    let total: crate::models::Money = transactions.iter().map(|t| t.amount).sum();
    output.push_str(&format!(
        "\n{} transactions, net {}",
        transactions.len(),
        total.format_with_symbol(currency_symbol)
    ));
    output
}

/// One-line summary of a transaction
pub fn format_transaction_short(txn: &Transaction) -> String {
    format!(
        "#{} {} {} [{}] {}",
        txn.id,
        txn.date,
        truncate(&txn.payee, 20),
        txn.category,
        txn.amount
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn txn(id: i64, payee: &str, cents: i64) -> Transaction {
        Transaction {
            id,
            date: "2025-01-01".into(),
            payee: payee.into(),
            category: "Food".into(),
            amount: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_format_transaction_list() {
        let output = format_transaction_list(&[txn(2, "Cafe", -450), txn(1, "Pay", 10000)], "$");

        assert!(output.contains("Payee"));
        assert!(output.contains("Cafe"));
        assert!(output.contains("-$4.50"));
        assert!(output.contains("2 transactions, net $95.50"));
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_transaction_list(&[], "$"), "No transactions found.");
    }

    #[test]
    fn test_format_transaction_short() {
        assert_eq!(
            format_transaction_short(&txn(7, "Cafe", -450)),
            "#7 2025-01-01 Cafe [Food] -$4.50"
        );
    }
}
