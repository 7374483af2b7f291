//! Transaction entry dialog
//!
//! Modal form for recording a transaction with tab navigation between
//! fields. Transactions are never edited in place, so there is no edit mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::error::FinanceResult;
use crate::services::{parse_transaction_amount, CreateTransactionInput, TransactionService};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Which field is currently focused in the transaction form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionField {
    #[default]
    Date,
    Payee,
    Category,
    Amount,
}

impl TransactionField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Date => Self::Payee,
            Self::Payee => Self::Category,
            Self::Category => Self::Amount,
            Self::Amount => Self::Date,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Date => Self::Amount,
            Self::Payee => Self::Date,
            Self::Category => Self::Payee,
            Self::Amount => Self::Category,
        }
    }
}

/// State for the transaction form dialog
#[derive(Debug, Clone, Default)]
pub struct TransactionFormState {
    pub focused_field: TransactionField,
    pub date_input: TextInput,
    pub payee_input: TextInput,
    pub category_input: TextInput,
    pub amount_input: TextInput,
    pub error_message: Option<String>,
}

impl TransactionFormState {
    /// Create a new form with the date pre-filled
    pub fn new(today: &str) -> Self {
        let mut state = Self {
            date_input: TextInput::new().label("Date").content(today),
            payee_input: TextInput::new().label("Payee").placeholder("Enter payee name"),
            category_input: TextInput::new()
                .label("Category")
                .placeholder("Uncategorized"),
            amount_input: TextInput::new()
                .label("Amount")
                .placeholder("-25.00 for money out"),
            ..Self::default()
        };
        state.set_focus(TransactionField::Payee);
        state
    }

    pub fn next_field(&mut self) {
        self.set_focus(self.focused_field.next());
    }

    pub fn prev_field(&mut self) {
        self.set_focus(self.focused_field.prev());
    }

    /// Set focus to a specific field
    pub fn set_focus(&mut self, field: TransactionField) {
        self.focused_field = field;
        self.date_input.focused = field == TransactionField::Date;
        self.payee_input.focused = field == TransactionField::Payee;
        self.category_input.focused = field == TransactionField::Category;
        self.amount_input.focused = field == TransactionField::Amount;
    }

    /// Get the currently focused input
    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            TransactionField::Date => &mut self.date_input,
            TransactionField::Payee => &mut self.payee_input,
            TransactionField::Category => &mut self.category_input,
            TransactionField::Amount => &mut self.amount_input,
        }
    }

    /// Build the service input from the form
    pub fn to_input(&self) -> FinanceResult<CreateTransactionInput> {
        Ok(CreateTransactionInput {
            date: self.date_input.value().to_string(),
            payee: self.payee_input.value().to_string(),
            category: self.category_input.value().to_string(),
            amount: parse_transaction_amount(self.amount_input.value())?,
        })
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// Render the transaction dialog
pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.transaction_form;
    let area = centered_rect_fixed(60, 11, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Add Transaction ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Date
            Constraint::Length(1), // Payee
            Constraint::Length(1), // Category
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(&form.date_input, chunks[0]);
    frame.render_widget(&form.payee_input, chunks[1]);
    frame.render_widget(&form.category_input, chunks[2]);
    frame.render_widget(&form.amount_input, chunks[3]);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[5],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[Shift+Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Prev  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[6]);
}

/// Handle key input for the transaction dialog
/// Returns true if the key was handled, false otherwise
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let form = &mut app.transaction_form;

    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => form.prev_field(),
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Enter => {
            if let Err(e) = save_transaction(app) {
                app.transaction_form.set_error(e.to_string());
            }
        }
        KeyCode::Backspace => {
            form.clear_error();
            form.focused_input().backspace();
        }
        KeyCode::Delete => {
            form.clear_error();
            form.focused_input().delete();
        }
        KeyCode::Left => form.focused_input().move_left(),
        KeyCode::Right => form.focused_input().move_right(),
        KeyCode::Home => form.focused_input().move_start(),
        KeyCode::End => form.focused_input().move_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.clear_error();
            form.focused_input().insert(c);
        }
        _ => return false,
    }
    true
}

/// Save the transaction
fn save_transaction(app: &mut App) -> FinanceResult<()> {
    let input = app.transaction_form.to_input()?;
    let txn = TransactionService::new(app.storage).create(input)?;

    app.close_dialog();
    app.refresh();
    if let Some(index) = app.transactions.iter().position(|t| t.id == txn.id) {
        app.selected_transaction_index = index;
    }
    app.set_status(format!("Recorded {} to {}", txn.amount, txn.payee));
    Ok(())
}
