//! Transactions view
//!
//! Search bar above a table of transactions, newest first

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::report::truncate;
use crate::tui::app::{App, InputMode};
use crate::tui::layout::TransactionsLayout;

/// Render the transactions view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = TransactionsLayout::new(area);
    render_search(frame, app, layout.search);
    render_table(frame, app, layout.table);
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let searching = app.input_mode == InputMode::Search;
    let border_color = if searching { Color::Yellow } else { Color::Gray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut search = app.search.clone();
    search.focused = searching;
    frame.render_widget(&search, inner);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = app.settings.currency_symbol.as_str();
    let title = if app.search.value().is_empty() {
        format!(" Transactions ({}) ", app.transactions.len())
    } else {
        format!(
            " Transactions ({} matching '{}') ",
            app.transactions.len(),
            app.search.value()
        )
    };
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.transactions.is_empty() {
        let text = if app.search.value().is_empty() {
            "No transactions yet. Press 'a' to add one or 'i' to import."
        } else {
            "No transactions match the search."
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Payee"),
        Cell::from("Category"),
        Cell::from("Amount"),
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .map(|txn| {
            let amount_style = if txn.amount.is_negative() {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            Row::new(vec![
                Cell::from(txn.date.clone()),
                Cell::from(truncate(&txn.payee, 30)),
                Cell::from(truncate(&txn.category, 20)),
                Cell::from(txn.amount.format_with_symbol(symbol)).style(amount_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(20),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_transaction_index));

    frame.render_stateful_widget(table, area, &mut state);
}
