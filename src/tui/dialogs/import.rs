//! CSV import dialog
//!
//! Asks for a file path and the import mode, then runs the import service.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::ImportMode;
use crate::error::{FinanceError, FinanceResult};
use crate::services::ImportService;
use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Which part of the import form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportField {
    #[default]
    Path,
    Mode,
}

/// State for the import dialog
#[derive(Debug, Clone)]
pub struct ImportFormState {
    pub focused_field: ImportField,
    pub path_input: TextInput,
    pub mode: ImportMode,
    pub error_message: Option<String>,
}

impl ImportFormState {
    pub fn new(mode: ImportMode) -> Self {
        let mut path_input = TextInput::new().label("File").placeholder("path/to/file.csv");
        path_input.focused = true;
        Self {
            focused_field: ImportField::Path,
            path_input,
            mode,
            error_message: None,
        }
    }

    pub fn toggle_field(&mut self) {
        self.focused_field = match self.focused_field {
            ImportField::Path => ImportField::Mode,
            ImportField::Mode => ImportField::Path,
        };
        self.path_input.focused = self.focused_field == ImportField::Path;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the import dialog
pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.import_form;
    let area = centered_rect_fixed(64, 10, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Import CSV ")
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
            Constraint::Length(1), // Path
            Constraint::Length(1), // Mode
            Constraint::Length(1), // Mode description
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(&form.path_input, chunks[0]);

    let mode_focused = form.focused_field == ImportField::Mode;
    let option = |mode: ImportMode| {
        let selected = form.mode == mode;
        let mut style = if selected {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if selected && mode_focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        Span::styled(format!(" {} ", mode), style)
    };
    let label_style = if mode_focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{:>10}: ", "Mode"), label_style),
            option(ImportMode::Insert),
            Span::raw(" "),
            option(ImportMode::Reconcile),
        ])),
        chunks[1],
    );

    let description = match form.mode {
        ImportMode::Insert => "Every row becomes a transaction",
        ImportMode::Reconcile => "Rows are spent against matching budgets",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(description, Style::default().fg(Color::DarkGray))),
        chunks[2],
    );

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[4],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Field  "),
        Span::styled("[Space]", Style::default().fg(Color::Yellow)),
        Span::raw(" Mode  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Import  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[5]);
}

/// Handle key input for the import dialog
/// Returns true if the key was handled, false otherwise
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let form = &mut app.import_form;

    match (form.focused_field, key.code) {
        (_, KeyCode::Esc) => app.close_dialog(),
        (_, KeyCode::Tab | KeyCode::BackTab) => form.toggle_field(),
        (_, KeyCode::Enter) => {
            if let Err(e) = run_import(app) {
                app.import_form.set_error(e.to_string());
            }
        }
        (ImportField::Mode, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) => {
            form.mode = form.mode.toggled();
        }
        (ImportField::Path, KeyCode::Backspace) => form.path_input.backspace(),
        (ImportField::Path, KeyCode::Delete) => form.path_input.delete(),
        (ImportField::Path, KeyCode::Left) => form.path_input.move_left(),
        (ImportField::Path, KeyCode::Right) => form.path_input.move_right(),
        (ImportField::Path, KeyCode::Home) => form.path_input.move_start(),
        (ImportField::Path, KeyCode::End) => form.path_input.move_end(),
        (ImportField::Path, KeyCode::Char(c)) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.error_message = None;
            form.path_input.insert(c);
        }
        _ => return false,
    }
    true
}

fn run_import(app: &mut App) -> FinanceResult<()> {
    let path = app.import_form.path_input.value().trim().to_string();
    if path.is_empty() {
        return Err(FinanceError::Validation("Enter a file path".into()));
    }
    let mode = app.import_form.mode;

    let summary = ImportService::new(app.storage).import(&path, mode)?;

    app.close_dialog();
    app.refresh();
    if mode == ImportMode::Reconcile {
        app.switch_view(ActiveView::Budgets);
    } else {
        app.switch_view(ActiveView::Transactions);
    }
    app.set_status(summary.to_string());
    Ok(())
}
