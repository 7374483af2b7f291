//! Application state for the TUI
//!
//! The App struct is the dashboard session: it holds the store handle, the
//! active view and dialog, selections and cached lists. Handlers and views
//! receive it explicitly.

use crate::config::Settings;
use crate::error::FinanceError;
use crate::models::{Budget, Transaction};
use crate::reports::BudgetReport;
use crate::services::{BudgetService, TransactionService};
use crate::storage::Storage;

use super::dialogs::budget::BudgetFormState;
use super::dialogs::import::ImportFormState;
use super::dialogs::transaction::TransactionFormState;
use super::widgets::TextInput;

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Budgets,
    Transactions,
    Report,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [Self::Budgets, Self::Transactions, Self::Report];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Budgets => "Budgets",
            Self::Transactions => "Transactions",
            Self::Report => "Report",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Budgets => 0,
            Self::Transactions => 1,
            Self::Report => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the transaction search bar
    Search,
}

/// Record awaiting delete confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Budget { id: i64, category: String },
    Transaction { id: i64, payee: String },
}

impl DeleteTarget {
    pub fn prompt(&self) -> String {
        match self {
            Self::Budget { category, .. } => format!("Delete budget '{}'?", category),
            Self::Transaction { id, payee } => format!("Delete transaction #{} ({})?", id, payee),
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddBudget,
    EditBudget(i64),
    AddTransaction,
    Import,
    Confirm(DeleteTarget),
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    pub active_view: ActiveView,
    pub input_mode: InputMode,
    pub active_dialog: ActiveDialog,

    /// Budgets ordered by category
    pub budgets: Vec<Budget>,
    pub selected_budget_index: usize,

    /// Transactions matching `search`, newest first
    pub transactions: Vec<Transaction>,
    pub selected_transaction_index: usize,

    /// Transaction search term
    pub search: TextInput,

    pub report: Option<BudgetReport>,

    /// Status message to display
    pub status_message: Option<String>,

    pub budget_form: BudgetFormState,
    pub transaction_form: TransactionFormState,
    pub import_form: ImportFormState,
}

impl<'a> App<'a> {
    /// Create a new App instance and load its data
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        let mut app = Self {
            storage,
            settings,
            should_quit: false,
            active_view: ActiveView::default(),
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            budgets: Vec::new(),
            selected_budget_index: 0,
            transactions: Vec::new(),
            selected_transaction_index: 0,
            search: TextInput::new().label("Search").placeholder("payee or category"),
            report: None,
            status_message: None,
            budget_form: BudgetFormState::default(),
            transaction_form: TransactionFormState::default(),
            import_form: ImportFormState::new(settings.import_mode),
        };
        app.refresh();
        app
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Show an error in the status bar
    pub fn report_error(&mut self, err: &FinanceError) {
        log::warn!("{}", err);
        self.set_status(format!("Error: {}", err));
    }

    /// Re-fetch every cached list
    pub fn refresh(&mut self) {
        self.refresh_budgets();
        self.refresh_transactions();
        self.refresh_report();
    }

    pub fn refresh_budgets(&mut self) {
        match BudgetService::new(self.storage).list() {
            Ok(budgets) => self.budgets = budgets,
            Err(e) => self.report_error(&e),
        }
        self.selected_budget_index = clamp_index(self.selected_budget_index, self.budgets.len());
    }

    pub fn refresh_transactions(&mut self) {
        let search = self.search.value().to_string();
        match TransactionService::new(self.storage).list(Some(&search)) {
            Ok(txns) => self.transactions = txns,
            Err(e) => self.report_error(&e),
        }
        self.selected_transaction_index =
            clamp_index(self.selected_transaction_index, self.transactions.len());
    }

    pub fn refresh_report(&mut self) {
        match BudgetReport::generate(self.storage) {
            Ok(report) => self.report = Some(report),
            Err(e) => self.report_error(&e),
        }
    }

    /// Switch to a different view
    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        if view == ActiveView::Report {
            self.refresh_report();
        }
    }

    pub fn next_view(&mut self) {
        self.switch_view(self.active_view.next());
    }

    pub fn prev_view(&mut self) {
        self.switch_view(self.active_view.prev());
    }

    /// Open a dialog, resetting its form
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match &dialog {
            ActiveDialog::AddBudget => {
                self.budget_form = BudgetFormState::for_new();
            }
            ActiveDialog::EditBudget(id) => {
                match self.budgets.iter().find(|b| b.id == *id) {
                    Some(budget) => self.budget_form = BudgetFormState::for_budget(budget),
                    None => return,
                }
            }
            ActiveDialog::AddTransaction => {
                self.transaction_form = TransactionFormState::new(&self.settings.today());
            }
            ActiveDialog::Import => {
                self.import_form = ImportFormState::new(self.settings.import_mode);
            }
            ActiveDialog::Confirm(_) | ActiveDialog::None => {}
        }
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    pub fn selected_budget(&self) -> Option<&Budget> {
        self.budgets.get(self.selected_budget_index)
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.selected_transaction_index)
    }

    /// Move selection up in the current view
    pub fn move_up(&mut self) {
        match self.active_view {
            ActiveView::Budgets => {
                self.selected_budget_index = self.selected_budget_index.saturating_sub(1);
            }
            ActiveView::Transactions => {
                self.selected_transaction_index =
                    self.selected_transaction_index.saturating_sub(1);
            }
            ActiveView::Report => {}
        }
    }

    /// Move selection down in the current view
    pub fn move_down(&mut self) {
        match self.active_view {
            ActiveView::Budgets => {
                if self.selected_budget_index + 1 < self.budgets.len() {
                    self.selected_budget_index += 1;
                }
            }
            ActiveView::Transactions => {
                if self.selected_transaction_index + 1 < self.transactions.len() {
                    self.selected_transaction_index += 1;
                }
            }
            ActiveView::Report => {}
        }
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, Money, NewTransaction};

    #[test]
    fn test_view_cycle() {
        assert_eq!(ActiveView::Budgets.next(), ActiveView::Transactions);
        assert_eq!(ActiveView::Report.next(), ActiveView::Budgets);
        assert_eq!(ActiveView::Budgets.prev(), ActiveView::Report);
    }

    #[test]
    fn test_new_loads_data() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .budgets()
            .add("Food", Money::from_cents(10000), BudgetPeriod::Monthly, None)
            .unwrap();
        storage
            .transactions()
            .add(&NewTransaction::new("2025-01-01", "Cafe", "Food", Money::from_cents(-500)))
            .unwrap();
        let settings = Settings::default();

        let app = App::new(&storage, &settings);

        assert_eq!(app.budgets.len(), 1);
        assert_eq!(app.transactions.len(), 1);
        assert_eq!(app.report.as_ref().map(|r| r.rows.len()), Some(1));
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_selection_is_clamped_after_refresh() {
        let storage = Storage::open_in_memory().unwrap();
        for category in ["A", "B", "C"] {
            storage
                .budgets()
                .add(category, Money::from_cents(100), BudgetPeriod::Monthly, None)
                .unwrap();
        }
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        app.move_down();
        app.move_down();
        app.move_down();
        assert_eq!(app.selected_budget_index, 2);

        storage.budgets().delete_by_category("C").unwrap();
        app.refresh_budgets();
        assert_eq!(app.selected_budget_index, 1);
    }

    #[test]
    fn test_delete_prompt() {
        let target = DeleteTarget::Transaction {
            id: 4,
            payee: "Cafe".into(),
        };
        assert_eq!(target.prompt(), "Delete transaction #4 (Cafe)?");
    }
}
