//! Status bar view
//!
//! Shows budget and transaction counts, the latest status message and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{ActiveView, App, InputMode};

/// Key hints for the current context
pub fn hints(app: &App) -> &'static str {
    if app.input_mode == InputMode::Search {
        return " Enter:Keep  Esc:Clear ";
    }
    match app.active_view {
        ActiveView::Budgets => " a:Add  e:Edit  d:Delete  i:Import  q:Quit ",
        ActiveView::Transactions => " a:Add  d:Delete  /:Search  i:Import  q:Quit ",
        ActiveView::Report => " Tab:Switch  i:Import  q:Quit ",
    }
}

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} budgets", app.budgets.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!("{} transactions", app.transactions.len()),
            Style::default().fg(Color::Cyan),
        ),
    ];

    if let Some(ref message) = app.status_message {
        let color = if message.starts_with("Error") {
            Color::Red
        } else {
            Color::Yellow
        };
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(message.as_str(), Style::default().fg(color)));
    }

    let hints = hints(app);
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
