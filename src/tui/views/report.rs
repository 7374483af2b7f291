//! Report view
//!
//! Budget vs. actual usage with a coloured bar per category

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::display::report::{format_bar, format_percentage};
use crate::reports::ReportStatus;
use crate::tui::app::App;

const BAR_WIDTH: usize = 20;

fn status_color(status: ReportStatus) -> Color {
    match status {
        ReportStatus::OnTrack => Color::Green,
        ReportStatus::Warning => Color::Yellow,
        ReportStatus::Over => Color::Red,
    }
}

/// Render the report view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = app.settings.currency_symbol.as_str();
    let block = Block::default()
        .title(" Budget vs. Actual ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let report = match &app.report {
        Some(report) if !report.is_empty() => report,
        _ => {
            let empty = Paragraph::new("No budgets defined.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }
    };

    let header = Row::new(vec![
        Cell::from("Category"),
        Cell::from("Spent"),
        Cell::from("Limit"),
        Cell::from("Left"),
        Cell::from("Used"),
        Cell::from(""),
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let mut rows: Vec<Row> = report
        .rows
        .iter()
        .map(|row| {
            let color = status_color(row.status);
            let remaining = row.remaining();
            let remaining_style = if remaining.is_negative() {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(row.category.clone()),
                Cell::from(row.spent.abs().format_with_symbol(symbol)),
                Cell::from(row.limit.format_with_symbol(symbol)),
                Cell::from(remaining.format_with_symbol(symbol)).style(remaining_style),
                Cell::from(format_percentage(row.percent_used)).style(Style::default().fg(color)),
                Cell::from(Line::from(Span::styled(
                    format_bar(row.percent_used, 100.0, BAR_WIDTH),
                    Style::default().fg(color),
                ))),
            ])
        })
        .collect();

    let total_color = if report.over_budget_count() > 0 {
        Color::Red
    } else {
        Color::White
    };
    rows.push(
        Row::new(vec![
            Cell::from("TOTAL"),
            Cell::from(report.total_spent.format_with_symbol(symbol)),
            Cell::from(report.total_limit.format_with_symbol(symbol)),
            Cell::from((report.total_limit - report.total_spent).format_with_symbol(symbol)),
            Cell::from(format_percentage(report.total_percent())),
            Cell::from(format!("{} over budget", report.over_budget_count())),
        ])
        .style(Style::default().fg(total_color).add_modifier(Modifier::BOLD))
        .top_margin(1),
    );

    let widths = [
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(7),
        Constraint::Length(BAR_WIDTH as u16 + 2),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
