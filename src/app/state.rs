//! Application state definitions
//!
//! Contains the state types for the application: AppState, AppMode,
//! CatalogStatus and the popup contents. Navigation helpers live here so
//! they can be exercised without a terminal.

use crate::config::AppConfig;
use crate::controller::{Command, OrderController, Outcome};
use crate::types::{Category, KindFilter};

/// Where the catalog load stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    /// Background fetch still running, panels stay empty
    Loading,
    /// Catalog available in the controller
    Ready,
    /// Fetch failed; the banner replaces the dish grid
    Failed(String),
}

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Browsing the dish grid
    Menu,
    /// Blocking notification (rejection reason, save errors)
    Notification,
    /// Confirmation of an accepted order
    OrderPlaced,
}

/// Contents of the popup window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    pub config: AppConfig,
    pub catalog_status: CatalogStatus,
    /// Catalog, order state, form and derived view
    pub controller: OrderController,
    /// Category panel with keyboard focus
    pub focused: Category,
    /// Highlighted card index per category
    pub cursors: [usize; Category::COUNT],
    /// Popup shown in Notification / OrderPlaced mode
    pub popup: Option<Popup>,
    /// Status message for user feedback
    pub status_message: String,
    /// Whether help overlay is visible
    pub help_visible: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            mode: AppMode::Menu,
            config,
            catalog_status: CatalogStatus::Loading,
            controller: OrderController::default(),
            focused: Category::Soup,
            cursors: [0; Category::COUNT],
            popup: None,
            status_message: "Loading menu...".to_string(),
            help_visible: false,
        }
    }

    /// Highlighted card index of the focused category
    pub fn cursor(&self) -> usize {
        self.cursors[self.focused.index()]
    }

    pub fn focus_next(&mut self) {
        let next = (self.focused.index() + 1) % Category::COUNT;
        self.focused = Category::ALL[next];
    }

    pub fn focus_previous(&mut self) {
        let prev = (self.focused.index() + Category::COUNT - 1) % Category::COUNT;
        self.focused = Category::ALL[prev];
    }

    pub fn navigate_up(&mut self) {
        let cursor = &mut self.cursors[self.focused.index()];
        *cursor = cursor.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        let len = self.controller.view().cards(self.focused).len();
        let cursor = &mut self.cursors[self.focused.index()];
        if *cursor + 1 < len {
            *cursor += 1;
        }
    }

    /// Keep every cursor inside its (possibly shrunk) list
    pub fn clamp_cursors(&mut self) {
        for category in Category::ALL {
            let len = self.controller.view().cards(category).len();
            let cursor = &mut self.cursors[category.index()];
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
    }

    /// Dispatch a command and keep the cursors valid
    pub fn apply(&mut self, command: Command) -> Outcome {
        let outcome = self.controller.dispatch(command);
        self.clamp_cursors();
        outcome
    }

    /// Select the highlighted dish of the focused category
    pub fn select_highlighted(&mut self) -> Option<Outcome> {
        let card = self
            .controller
            .view()
            .cards(self.focused)
            .get(self.cursor())?
            .clone();
        self.status_message = format!("Added {}", card.dish.name);
        Some(self.apply(Command::SelectDish(card.dish)))
    }

    /// Toggle the n-th filter button of the focused category
    ///
    /// Button 0 is "all"; buttons 1.. follow the category's kinds.
    pub fn toggle_filter_button(&mut self, button: usize) -> Option<Outcome> {
        let kind = if button == 0 {
            KindFilter::All
        } else {
            let kinds = self.controller.view().kinds(self.focused);
            KindFilter::Kind(kinds.get(button - 1)?.clone())
        };
        let category = self.focused;
        let outcome = self.apply(Command::ToggleFilter { category, kind });
        self.status_message = format!(
            "{} filter: {}",
            category.label(),
            self.controller.filter(category)
        );
        Some(outcome)
    }

    /// Show a blocking popup
    pub fn show_popup(&mut self, mode: AppMode, title: impl Into<String>, lines: Vec<String>) {
        self.popup = Some(Popup {
            title: title.into(),
            lines,
        });
        self.mode = mode;
    }

    /// Close the popup and return to the menu
    pub fn dismiss_popup(&mut self) {
        self.popup = None;
        self.mode = AppMode::Menu;
    }
}
