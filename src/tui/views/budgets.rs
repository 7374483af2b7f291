//! Budgets view
//!
//! Table of budgets with their limit, period and start date

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::tui::app::App;

/// Render the budgets view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = app.settings.currency_symbol.as_str();
    let block = Block::default()
        .title(format!(" Budgets ({}) ", app.budgets.len()))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.budgets.is_empty() {
        let empty = Paragraph::new("No budgets yet. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Category"),
        Cell::from("Limit"),
        Cell::from("Period"),
        Cell::from("Starts"),
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let rows: Vec<Row> = app
        .budgets
        .iter()
        .map(|budget| {
            let amount_color = if budget.amount.is_positive() {
                Color::Green
            } else {
                Color::Red
            };
            Row::new(vec![
                Cell::from(budget.category.clone()),
                Cell::from(budget.amount.format_with_symbol(symbol))
                    .style(Style::default().fg(amount_color)),
                Cell::from(budget.period.as_str()),
                Cell::from(
                    budget
                        .start_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(12),
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
    state.select(Some(app.selected_budget_index));

    frame.render_stateful_widget(table, area, &mut state);
}
