//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Title, status line and navigation bar
//! - `menu` - Category panels: filter bars and dish cards
//! - `summary` - Order summary, total and form controls
//! - `dialogs` - Notification popup and catalog error banner
//!
//! Every frame redraws the whole screen from [`AppState`]; nothing is
//! cached between frames.

mod dialogs;
mod header;
mod menu;
mod summary;

use crate::app::{AppMode, AppState, CatalogStatus};
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

/// UI renderer for the application
///
/// This is the main entry point for UI rendering. It delegates to specialized
/// submodules for different parts of the UI.
pub struct UiRenderer {
    title: String,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    /// Create a new UI renderer
    pub fn new() -> Self {
        Self {
            title: "Lunch Set Order".to_string(),
        }
    }

    /// Render the complete UI based on application state
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(10),   // Main content area
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Navigation bar
            ])
            .split(f.area());

        header::render_title(f, main_chunks[0], &self.title);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
            .split(main_chunks[1]);

        match state.catalog_status {
            CatalogStatus::Failed(_) => dialogs::render_catalog_error(f, content_chunks[0]),
            CatalogStatus::Loading | CatalogStatus::Ready => {
                menu::render_category_panels(f, state, content_chunks[0])
            }
        }
        summary::render_order_panel(f, state, content_chunks[1]);

        header::render_status(f, main_chunks[2], &state.status_message);
        header::render_nav_bar(f, main_chunks[3], &keybinding_ctx.get_nav_items(state.mode));

        if matches!(state.mode, AppMode::Notification | AppMode::OrderPlaced) {
            if let Some(ref popup) = state.popup {
                dialogs::render_popup(f, popup, state.mode);
            }
        }

        // Help overlay on top of everything
        if state.help_visible {
            let area = f.area();
            HelpOverlay::new(state.mode, keybinding_ctx).render(f, area);
        }
    }
}
