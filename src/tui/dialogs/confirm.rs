//! Confirmation dialog
//!
//! Simple yes/no confirmation before deleting a record

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::error::FinanceResult;
use crate::services::{BudgetSelector, BudgetService, TransactionService};
use crate::tui::app::{ActiveDialog, App, DeleteTarget};
use crate::tui::layout::centered_rect_fixed;

/// Render a confirmation dialog
pub fn render(frame: &mut Frame, message: &str) {
    let area = centered_rect_fixed(50, 7, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(Color::Green)),
            Span::raw(" Yes  "),
            Span::styled("[N]", Style::default().fg(Color::Red)),
            Span::raw(" No  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Handle key input for the confirmation dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            let ActiveDialog::Confirm(target) = app.active_dialog.clone() else {
                return false;
            };
            app.close_dialog();
            match delete(app, &target) {
                Ok(()) => app.set_status(match &target {
                    DeleteTarget::Budget { category, .. } => format!("Deleted budget '{}'", category),
                    DeleteTarget::Transaction { id, .. } => format!("Deleted transaction #{}", id),
                }),
                Err(e) => app.report_error(&e),
            }
            app.refresh();
            true
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.close_dialog();
            app.set_status("Cancelled");
            true
        }
        _ => false,
    }
}

fn delete(app: &App, target: &DeleteTarget) -> FinanceResult<()> {
    match target {
        DeleteTarget::Budget { id, .. } => {
            BudgetService::new(app.storage).delete(&BudgetSelector::Id(*id))
        }
        DeleteTarget::Transaction { id, .. } => TransactionService::new(app.storage).delete(*id),
    }
}
