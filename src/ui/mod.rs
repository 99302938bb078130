//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Layout and overlay dispatch
//! - `helpers` - Background task spawning
//! - `quote` - Quote display panel
//! - `categories` - Category selector
//! - `form` - Add-quote form and import prompt overlays
//! - `status` - Status bar widget
//! - `help` - Keybinding overlay

mod categories;
mod events;
mod form;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod quote;
mod render;
mod status;

pub use loop_runner::{run, Action};
