//! Budget add/edit dialog
//!
//! Two fields, category and amount. The same form serves both adding a new
//! budget and editing the selected one.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::error::FinanceResult;
use crate::models::{Budget, BudgetChanges};
use crate::services::{parse_budget_amount, BudgetSelector, BudgetService, CreateBudgetInput};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Which field is currently focused in the budget form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BudgetField {
    #[default]
    Category,
    Amount,
}

/// State for the budget form dialog
#[derive(Debug, Clone, Default)]
pub struct BudgetFormState {
    pub focused_field: BudgetField,
    pub category_input: TextInput,
    pub amount_input: TextInput,
    /// Id of the budget being edited, `None` when adding
    pub editing: Option<i64>,
    pub error_message: Option<String>,
}

impl BudgetFormState {
    /// Empty form for a new budget
    pub fn for_new() -> Self {
        let mut state = Self {
            category_input: TextInput::new().label("Category").placeholder("e.g. Groceries"),
            amount_input: TextInput::new().label("Amount").placeholder("e.g. 400.00"),
            ..Self::default()
        };
        state.set_focus(BudgetField::Category);
        state
    }

    /// Form pre-filled from an existing budget
    pub fn for_budget(budget: &Budget) -> Self {
        let mut state = Self {
            category_input: TextInput::new().label("Category").content(&budget.category),
            amount_input: TextInput::new()
                .label("Amount")
                .content(budget.amount.to_decimal_string()),
            editing: Some(budget.id),
            ..Self::default()
        };
        state.set_focus(BudgetField::Amount);
        state
    }

    pub fn set_focus(&mut self, field: BudgetField) {
        self.focused_field = field;
        self.category_input.focused = field == BudgetField::Category;
        self.amount_input.focused = field == BudgetField::Amount;
    }

    pub fn toggle_field(&mut self) {
        let next = match self.focused_field {
            BudgetField::Category => BudgetField::Amount,
            BudgetField::Amount => BudgetField::Category,
        };
        self.set_focus(next);
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            BudgetField::Category => &mut self.category_input,
            BudgetField::Amount => &mut self.amount_input,
        }
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// Render the budget dialog
pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.budget_form;
    let area = centered_rect_fixed(56, 9, frame.area());
    frame.render_widget(Clear, area);

    let title = if form.editing.is_some() {
        " Edit Budget "
    } else {
        " Add Budget "
    };
    let block = Block::default()
        .title(title)
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
            Constraint::Length(1), // Category
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(&form.category_input, chunks[0]);
    frame.render_widget(&form.amount_input, chunks[1]);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[3],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[4]);
}

/// Handle key input for the budget dialog
/// Returns true if the key was handled, false otherwise
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let form = &mut app.budget_form;

    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
        KeyCode::Enter => {
            if let Err(e) = save_budget(app) {
                app.budget_form.set_error(e.to_string());
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

/// Validate the form and create or update the budget
fn save_budget(app: &mut App) -> FinanceResult<()> {
    let form = &app.budget_form;
    let category = form.category_input.value().to_string();
    let amount = parse_budget_amount(form.amount_input.value())?;
    let service = BudgetService::new(app.storage);

    let budget = match form.editing {
        Some(id) => service.update(
            &BudgetSelector::Id(id),
            BudgetChanges {
                category: Some(category),
                amount: Some(amount),
            },
        )?,
        None => service.create(CreateBudgetInput {
            category,
            amount,
            period: app.settings.default_period,
            start_date: None,
        })?,
    };

    let verb = if form.editing.is_some() {
        "Updated"
    } else {
        "Added"
    };
    app.close_dialog();
    app.refresh();
    if let Some(index) = app.budgets.iter().position(|b| b.id == budget.id) {
        app.selected_budget_index = index;
    }
    app.set_status(format!("{} budget '{}' ({})", verb, budget.category, budget.amount));
    Ok(())
}
