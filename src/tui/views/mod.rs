//! TUI Views module
//!
//! The budgets, transactions and report views, plus the status bar.

pub mod budgets;
pub mod report;
pub mod status_bar;
pub mod transactions;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, app, layout.tabs);

    match app.active_view {
        ActiveView::Budgets => budgets::render(frame, app, layout.main),
        ActiveView::Transactions => transactions::render(frame, app, layout.main),
        ActiveView::Report => report::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = ActiveView::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", i + 1, view.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" fintrack ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .select(app.active_view.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );

    frame.render_widget(tabs, area);
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match &app.active_dialog {
        ActiveDialog::AddBudget | ActiveDialog::EditBudget(_) => {
            dialogs::budget::render(frame, app);
        }
        ActiveDialog::AddTransaction => {
            dialogs::transaction::render(frame, app);
        }
        ActiveDialog::Import => {
            dialogs::import::render(frame, app);
        }
        ActiveDialog::Confirm(target) => {
            dialogs::confirm::render(frame, &target.prompt());
        }
        ActiveDialog::None => {}
    }
}
