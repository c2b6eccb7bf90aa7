//! Reusable UI components
//!
//! - `keybindings` - mode-aware key registry driving dispatch and hints
//! - `help_overlay` - floating help window

pub mod help_overlay;
pub mod keybindings;
