//! Input handling for the review session.
//!
//! This module contains toolkit-independent input logic:
//! - Keyboard command resolution and suppression
//! - Dispatch of key commands into the review coordinator

mod keyboard_router;

pub use keyboard_router::{resolve, Key, KeyCommand, KeyEvent, KeyboardRouter, Modifiers};
