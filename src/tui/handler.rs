//! Event handler for the TUI
//!
//! Routes keyboard events to the active dialog, the search bar or the
//! current view.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App, DeleteTarget, InputMode};
use super::dialogs;
use super::event::Event;

const HELP: &str = "Tab/1-3 views · j/k move · a add · e edit · d delete · / search · i import · r refresh · q quit";

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick | Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return Ok(());
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => handle_search_key(app, key),
    }
    Ok(())
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog {
        ActiveDialog::AddBudget | ActiveDialog::EditBudget(_) => {
            dialogs::budget::handle_key(app, key);
        }
        ActiveDialog::AddTransaction => {
            dialogs::transaction::handle_key(app, key);
        }
        ActiveDialog::Import => {
            dialogs::import::handle_key(app, key);
        }
        ActiveDialog::Confirm(_) => {
            dialogs::confirm::handle_key(app, key);
        }
        ActiveDialog::None => {}
    }
}

/// Typing into the transaction search bar; the list filters as you type
fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            app.search.focused = false;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search.focused = false;
            app.search.clear();
            app.refresh_transactions();
        }
        KeyCode::Backspace => {
            app.search.backspace();
            app.refresh_transactions();
        }
        KeyCode::Delete => {
            app.search.delete();
            app.refresh_transactions();
        }
        KeyCode::Left => app.search.move_left(),
        KeyCode::Right => app.search.move_right(),
        KeyCode::Char(c) => {
            app.search.insert(c);
            app.selected_transaction_index = 0;
            app.refresh_transactions();
        }
        _ => {}
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) {
    app.clear_status();

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.set_status(HELP),

        // View switching
        KeyCode::Tab => app.next_view(),
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char('1') => app.switch_view(ActiveView::Budgets),
        KeyCode::Char('2') => app.switch_view(ActiveView::Transactions),
        KeyCode::Char('3') => app.switch_view(ActiveView::Report),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),

        KeyCode::Char('a') | KeyCode::Char('n') => match app.active_view {
            ActiveView::Budgets => app.open_dialog(ActiveDialog::AddBudget),
            ActiveView::Transactions => app.open_dialog(ActiveDialog::AddTransaction),
            ActiveView::Report => {}
        },
        KeyCode::Char('e') | KeyCode::Enter => {
            if app.active_view == ActiveView::Budgets {
                if let Some(id) = app.selected_budget().map(|b| b.id) {
                    app.open_dialog(ActiveDialog::EditBudget(id));
                }
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(target) = delete_target(app) {
                app.open_dialog(ActiveDialog::Confirm(target));
            }
        }
        KeyCode::Char('/') => {
            app.switch_view(ActiveView::Transactions);
            app.input_mode = InputMode::Search;
            app.search.focused = true;
        }
        KeyCode::Char('i') => app.open_dialog(ActiveDialog::Import),
        KeyCode::Char('r') => {
            app.refresh();
            app.set_status("Refreshed");
        }
        _ => {}
    }
}

/// The record under the cursor in the current view
fn delete_target(app: &App) -> Option<DeleteTarget> {
    match app.active_view {
        ActiveView::Budgets => app.selected_budget().map(|b| DeleteTarget::Budget {
            id: b.id,
            category: b.category.clone(),
        }),
        ActiveView::Transactions => app.selected_transaction().map(|t| DeleteTarget::Transaction {
            id: t.id,
            payee: t.payee.clone(),
        }),
        ActiveView::Report => None,
    }
}
