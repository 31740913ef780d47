//! UI panel rendering subsystem
//!
//! This module contains all panel rendering for the frame review window:
//! - Header panel (batch progress, bulk actions, labels)
//! - Frame grid (rows of cards, row controls, drag rectangle)
//! - Overlays (label picker, settings dialog, video viewer)
//! - Status bar (counters and notices)
//! - Panel manager (panel orchestration and layout)
//! - Input handling (keyboard translation)

pub mod header;
pub mod grid;
pub mod overlays;
pub mod status_bar;
pub mod panel_manager;
pub mod input;
