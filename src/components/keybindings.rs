//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current
//! application mode. The same registry drives key dispatch, the navigation
//! bar and the help overlay, so the hints can never drift from behavior.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

/// Highest filter button reachable with a digit key
pub const MAX_FILTER_BUTTON: usize = 9;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    NextCategory,
    PreviousCategory,
    /// Add the highlighted dish to the order
    Select,
    /// Toggle a filter button of the focused category (0 = all)
    Filter(usize),
    Submit,
    Reset,
    Dismiss,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        // Letter bindings are stored lowercase; Shift+s arrives as 'S'
        let key = match key {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        // Shift is implied by the character itself for '?' and friends
        self.key == key && (self.modifiers == modifiers || modifiers == KeyModifiers::SHIFT)
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        let mut menu = vec![
            Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous dish"),
            Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next dish"),
            Keybinding::new(KeyCode::Right, KeyAction::NextCategory, "Right", "Next category"),
            Keybinding::new(KeyCode::Tab, KeyAction::NextCategory, "Tab", "Next category"),
            Keybinding::new(KeyCode::Left, KeyAction::PreviousCategory, "Left", "Previous category"),
            Keybinding::new(KeyCode::BackTab, KeyAction::PreviousCategory, "S-Tab", "Previous category"),
            Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Add dish"),
            Keybinding::new(KeyCode::Char(' '), KeyAction::Select, "Space", "Add dish"),
            Keybinding::new(KeyCode::Char('0'), KeyAction::Filter(0), "0", "Show all kinds"),
            Keybinding::new(KeyCode::Char('s'), KeyAction::Submit, "S", "Submit order"),
            Keybinding::new(KeyCode::Char('r'), KeyAction::Reset, "R", "Reset order"),
            Keybinding::new(KeyCode::Esc, KeyAction::Dismiss, "Esc", "Close"),
        ];
        for button in 1..=MAX_FILTER_BUTTON {
            let digit = char::from_digit(button as u32, 10).unwrap_or('1');
            menu.push(Keybinding::new(
                KeyCode::Char(digit),
                KeyAction::Filter(button),
                &digit.to_string(),
                &format!("Toggle kind filter {}", button),
            ));
        }
        self.mode_bindings.insert(AppMode::Menu, menu);

        let popup = vec![
            Keybinding::new(KeyCode::Enter, KeyAction::Dismiss, "Enter", "OK"),
            Keybinding::new(KeyCode::Esc, KeyAction::Dismiss, "Esc", "Close"),
        ];
        self.mode_bindings
            .insert(AppMode::Notification, popup.clone());
        self.mode_bindings.insert(AppMode::OrderPlaced, popup);
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(&mode) {
            bindings.extend(mode_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());

        bindings
    }

    /// Resolve a key press to an action in the given mode
    pub fn action_for(
        &self,
        mode: AppMode,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Option<KeyAction> {
        self.get_bindings(mode)
            .into_iter()
            .find(|b| b.matches(key, modifiers))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: AppMode) -> Vec<NavBarItem> {
        match mode {
            AppMode::Menu => vec![
                NavBarItem::new("Up/Dn", "Dish"),
                NavBarItem::new("Left/Right", "Category"),
                NavBarItem::new("Enter", "Add"),
                NavBarItem::new("0-9", "Filter"),
                NavBarItem::new("S", "Submit"),
                NavBarItem::new("R", "Reset"),
                NavBarItem::new("?", "Help"),
                NavBarItem::new("Q", "Quit"),
            ],
            AppMode::Notification | AppMode::OrderPlaced => {
                vec![NavBarItem::new("Enter", "OK"), NavBarItem::new("Esc", "Close")]
            }
        }
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: AppMode) -> Vec<HelpSection> {
        let sections: [(&str, fn(KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::NextCategory
                        | KeyAction::PreviousCategory
                )
            }),
            ("Order", |a| {
                matches!(
                    a,
                    KeyAction::Select
                        | KeyAction::Filter(_)
                        | KeyAction::Submit
                        | KeyAction::Reset
                        | KeyAction::Dismiss
                )
            }),
            ("General", |a| matches!(a, KeyAction::Help | KeyAction::Quit)),
        ];

        sections
            .iter()
            .filter_map(|(title, wanted)| {
                let items: Vec<(String, String)> = self
                    .get_bindings(mode)
                    .into_iter()
                    .filter(|b| wanted(b.action))
                    // Digit filters collapse into one help line
                    .filter(|b| !matches!(b.action, KeyAction::Filter(n) if n > 1))
                    .map(|b| match b.action {
                        KeyAction::Filter(1) => (
                            format!("1-{}", MAX_FILTER_BUTTON),
                            "Toggle kind filter".to_string(),
                        ),
                        _ => (b.display.clone(), b.description.clone()),
                    })
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

impl NavBarItem {
    fn new(key_display: &str, action_label: &str) -> Self {
        Self {
            key_display: key_display.to_string(),
            action_label: action_label.to_string(),
        }
    }
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
