//! Terminal User Interface module.
//!
//! This module provides the TUI for the post board, including:
//! - Main event loop (`run`)
//! - Input handling for browse, search, form and overlay modes
//! - Rendering of the loading/error screens, cards and pagination
//! - Background task event processing
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - View rendering dispatch
//! - `helpers` - Task spawning and layout helpers
//! - `cards` - Post card list widget
//! - `form` - Post form overlay
//! - `status` - Status bar, search line and pagination bar
//! - `help` - Keybinding help overlay

mod cards;
mod events;
mod form;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod render;
mod status;

// Re-export the public API
pub use events::handle_app_event;
pub use helpers::spawn_bootstrap;
pub use loop_runner::{run, Action};
