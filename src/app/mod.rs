//! Application module
//!
//! Contains the main application logic, state management, and event handling.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode, CatalogStatus, Popup)
//! - Main module - App struct, catalog loader thread and event loop
//!
//! Everything runs on the event loop thread except the one-time catalog
//! fetch, which reports back through a channel polled once per tick.

mod state;

pub use state::{AppMode, AppState, CatalogStatus, Popup};

use crate::catalog::{Catalog, CatalogSource};
use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::config::AppConfig;
use crate::controller::{Command, Outcome};
use crate::error::{LunchError, Result};
use crate::form::OrderSubmission;
use crate::types::format_price;
use crate::ui::UiRenderer;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Banner text shown instead of the dish grid when the catalog fails
pub const CATALOG_ERROR_BANNER: &str = "Failed to load the menu. Please try again later.";

/// Messages sent from the catalog loader thread to the main UI thread
#[derive(Debug)]
pub enum CatalogMessage {
    /// Catalog fetched and normalized
    Loaded(Catalog),
    /// Fetch failed
    Failed(String),
}

/// Main application struct
pub struct App {
    state: AppState,
    ui_renderer: UiRenderer,
    /// Keybinding context for navigation hints and key lookup
    keybinding_context: KeybindingContext,
    /// Channel sender for catalog load results (cloned to the loader thread)
    catalog_tx: Sender<CatalogMessage>,
    /// Channel receiver for catalog load results (polled in main loop)
    catalog_rx: Receiver<CatalogMessage>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: AppConfig) -> Self {
        info!("Creating new App instance");
        let (catalog_tx, catalog_rx) = mpsc::channel();

        Self {
            state: AppState::new(config),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            catalog_tx,
            catalog_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Fetch the catalog on a background thread
    pub fn start_catalog_load(&self, source: Box<dyn CatalogSource>) {
        let tx = self.catalog_tx.clone();
        info!("Loading catalog from {}", source.describe());

        thread::spawn(move || {
            let message = match Catalog::load(source.as_ref()) {
                Ok(catalog) => CatalogMessage::Loaded(catalog),
                Err(e) => CatalogMessage::Failed(e.to_string()),
            };
            // Receiver is gone only when the app already exited
            let _ = tx.send(message);
        });
    }

    /// Apply a finished catalog load, if any
    pub fn poll_catalog(&mut self) {
        while let Ok(message) = self.catalog_rx.try_recv() {
            self.handle_catalog_message(message);
        }
    }

    fn handle_catalog_message(&mut self, message: CatalogMessage) {
        match message {
            CatalogMessage::Loaded(catalog) => {
                self.state.status_message = format!("Menu loaded: {} dishes", catalog.len());
                self.state.controller.set_catalog(catalog);
                self.state.clamp_cursors();
                self.state.catalog_status = CatalogStatus::Ready;
            }
            CatalogMessage::Failed(reason) => {
                error!("Failed to load dishes: {}", reason);
                self.state.status_message = CATALOG_ERROR_BANNER.to_string();
                self.state.catalog_status = CatalogStatus::Failed(reason);
            }
        }
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            self.poll_catalog();

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if key_event.kind == KeyEventKind::Press && self.handle_key_event(key_event)? {
                        break; // Exit requested
                    }
                }
            }

            terminal
                .draw(|f| {
                    self.ui_renderer
                        .render(f, &self.state, &self.keybinding_context)
                })
                .map_err(|e| LunchError::terminal(format!("Failed to draw frame: {}", e)))?;
        }

        info!("Main loop finished");
        Ok(())
    }

    /// Handle a key press. Returns `true` when the user asked to quit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<bool> {
        let Some(action) = self
            .keybinding_context
            .action_for(self.state.mode, key_event.code, key_event.modifiers)
        else {
            return Ok(false);
        };
        debug!("Key {:?} -> {:?} in {:?}", key_event.code, action, self.state.mode);

        if self.state.help_visible {
            if matches!(action, KeyAction::Help | KeyAction::Dismiss | KeyAction::Quit) {
                self.state.help_visible = false;
            }
            return Ok(false);
        }

        match action {
            KeyAction::Quit => return Ok(true),
            KeyAction::Help => self.state.help_visible = true,
            KeyAction::Dismiss => self.state.dismiss_popup(),
            KeyAction::NavigateUp => self.state.navigate_up(),
            KeyAction::NavigateDown => self.state.navigate_down(),
            KeyAction::NextCategory => self.state.focus_next(),
            KeyAction::PreviousCategory => self.state.focus_previous(),
            KeyAction::Select => {
                self.state.select_highlighted();
            }
            KeyAction::Filter(button) => {
                self.state.toggle_filter_button(button);
            }
            KeyAction::Reset => {
                self.state.apply(Command::Reset);
                self.state.status_message = "Order cleared".to_string();
            }
            KeyAction::Submit => self.submit(),
        }

        Ok(false)
    }

    fn submit(&mut self) {
        match self.state.apply(Command::Submit) {
            Outcome::Submitted(order) => self.order_placed(order),
            Outcome::Rejected(rejection) => {
                self.state.show_popup(
                    AppMode::Notification,
                    "Order incomplete",
                    vec![rejection.message().to_string()],
                );
            }
            Outcome::Updated => {}
        }
    }

    fn order_placed(&mut self, order: OrderSubmission) {
        let currency = self.state.config.currency.clone();
        let mut lines = order.describe(&currency);

        if let Some(path) = self.state.config.order_output.clone() {
            match order.save_to_file(&path) {
                Ok(()) => {
                    info!("Order written to {}", path.display());
                    lines.push(format!("Saved to {}", path.display()));
                }
                Err(e) => {
                    warn!("Failed to save order: {:#}", e);
                    self.state.show_popup(
                        AppMode::Notification,
                        "Order not saved",
                        vec![format!("{:#}", e)],
                    );
                    return;
                }
            }
        }

        self.state.status_message =
            format!("Order placed, total {} {}", format_price(order.total), currency);
        self.state
            .show_popup(AppMode::OrderPlaced, "Order placed", lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::types::{Category, RawDish};
    use crate::validation::Rejection;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::time::Instant;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn raw(keyword: &str, name: &str, category: &str, kind: &str, price: u32) -> RawDish {
        RawDish {
            keyword: keyword.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            kind: kind.to_string(),
            price: f64::from(price),
            count: "1".to_string(),
            image: String::new(),
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new(AppConfig::default());
        app.handle_catalog_message(CatalogMessage::Loaded(Catalog::from_raw(vec![
            raw("borscht", "Borscht", "soup", "meat", 250),
            raw("cod", "Cod", "main-course", "fish", 380),
            raw("tea", "Tea", "drink", "hot", 60),
        ])));
        app
    }

    #[test]
    fn test_catalog_failure_sets_banner_state() {
        let mut app = App::new(AppConfig::default());
        app.handle_catalog_message(CatalogMessage::Failed("HTTP error: 500".to_string()));
        assert_eq!(
            app.state().catalog_status,
            CatalogStatus::Failed("HTTP error: 500".to_string())
        );
        assert!(app.state().controller.view().cards(Category::Soup).is_empty());
    }

    #[test]
    fn test_background_load_is_polled() {
        let mut app = App::new(AppConfig::default());
        app.start_catalog_load(Box::new(StaticCatalog(vec![raw(
            "tea", "Tea", "drink", "hot", 60,
        )])));

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.state().catalog_status == CatalogStatus::Loading && Instant::now() < deadline {
            app.poll_catalog();
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(app.state().catalog_status, CatalogStatus::Ready);
        assert_eq!(app.state().controller.catalog().len(), 1);
    }

    #[test]
    fn test_submit_empty_order_shows_notification() {
        let mut app = loaded_app();
        assert!(!app.handle_key_event(key(KeyCode::Char('s'))).unwrap());
        assert_eq!(app.state().mode, AppMode::Notification);
        let popup = app.state().popup.as_ref().unwrap();
        assert_eq!(popup.lines, vec![Rejection::NothingSelected.message().to_string()]);

        app.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.state().mode, AppMode::Menu);
        assert!(app.state().popup.is_none());
    }

    #[test]
    fn test_keyboard_order_flow() {
        let mut app = loaded_app();
        // Soup panel is focused first
        app.handle_key_event(key(KeyCode::Enter)).unwrap();
        app.handle_key_event(key(KeyCode::Right)).unwrap();
        app.handle_key_event(key(KeyCode::Enter)).unwrap();
        app.handle_key_event(key(KeyCode::Right)).unwrap();
        app.handle_key_event(key(KeyCode::Right)).unwrap();
        app.handle_key_event(key(KeyCode::Enter)).unwrap();
        app.handle_key_event(key(KeyCode::Char('s'))).unwrap();

        assert_eq!(app.state().mode, AppMode::OrderPlaced);
        assert!(app.state().status_message.contains("690"));
    }

    #[test]
    fn test_order_written_to_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.json");
        let mut app = loaded_app();
        app.state.config.order_output = Some(path.clone());

        app.state.controller.select_keyword("cod").unwrap();
        app.state.controller.select_keyword("tea").unwrap();
        app.handle_key_event(key(KeyCode::Char('s'))).unwrap();

        assert_eq!(app.state().mode, AppMode::OrderPlaced);
        let saved: OrderSubmission =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.total, 440.0);
    }

    #[test]
    fn test_quit_key() {
        let mut app = loaded_app();
        assert!(app.handle_key_event(key(KeyCode::Char('q'))).unwrap());
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = loaded_app();
        app.handle_key_event(key(KeyCode::Char('?'))).unwrap();
        assert!(app.state().help_visible);
        // Quit closes help instead of leaving the app
        assert!(!app.handle_key_event(key(KeyCode::Char('q'))).unwrap());
        assert!(!app.state().help_visible);
    }
}
