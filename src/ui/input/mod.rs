//! Input handling subsystem for UI interactions.
//!
//! This module translates egui input into toolkit-independent events:
//! - Keyboard shortcuts

pub mod keyboard;
