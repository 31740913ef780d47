//! Focus, overlay and tab state.
//!
//! This module holds the view-level flags that gate input:
//! - Focused frame (target of arrow navigation)
//! - Label picker dropdown (and whether the keyboard opened it)
//! - Video viewer and settings dialog
//! - Whether the review view is the active tab
//! - Whether a text field has keyboard focus

use crate::frame::FrameId;

/// Open state of the label picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dropdown {
    #[default]
    Closed,
    Open { from_keyboard: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    focused: Option<FrameId>,
    dropdown: Dropdown,
    video_open: bool,
    settings_open: bool,
    tab_active: bool,
    text_input_focused: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            focused: None,
            dropdown: Dropdown::Closed,
            video_open: false,
            settings_open: false,
            tab_active: true,
            text_input_focused: false,
        }
    }

    /// Clears per-batch state; tab and modal flags are kept.
    pub fn reset_for_batch(&mut self) {
        self.focused = None;
        self.dropdown = Dropdown::Closed;
    }

    // ===== Focus =====

    pub fn focused(&self) -> Option<&FrameId> {
        self.focused.as_ref()
    }

    pub fn focus(&mut self, id: FrameId) {
        self.focused = Some(id);
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// Clears focus if it points at one of `ids`.
    ///
    /// # Returns
    /// `true` if focus was cleared
    pub fn clear_focus_if_in(&mut self, ids: &[FrameId]) -> bool {
        match &self.focused {
            Some(current) if ids.contains(current) => {
                self.focused = None;
                true
            }
            _ => false,
        }
    }

    // ===== Dropdown =====

    pub fn dropdown(&self) -> Dropdown {
        self.dropdown
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown != Dropdown::Closed
    }

    pub fn is_dropdown_keyboard_open(&self) -> bool {
        self.dropdown == Dropdown::Open { from_keyboard: true }
    }

    pub fn open_dropdown(&mut self, from_keyboard: bool) {
        self.dropdown = Dropdown::Open { from_keyboard };
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown = Dropdown::Closed;
    }

    // ===== Overlays =====

    pub fn is_video_open(&self) -> bool {
        self.video_open
    }

    pub fn set_video_open(&mut self, open: bool) {
        self.video_open = open;
    }

    pub fn is_settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn set_settings_open(&mut self, open: bool) {
        self.settings_open = open;
    }

    /// A modal that suppresses drag selection is showing.
    pub fn is_modal_open(&self) -> bool {
        self.video_open || self.settings_open
    }

    // ===== Tab / Text Focus =====

    pub fn is_tab_active(&self) -> bool {
        self.tab_active
    }

    /// Marks the view active or inactive. Deactivation closes the dropdown.
    pub fn set_tab_active(&mut self, active: bool) {
        self.tab_active = active;
        if !active {
            self.dropdown = Dropdown::Closed;
        }
    }

    pub fn is_text_input_focused(&self) -> bool {
        self.text_input_focused
    }

    pub fn set_text_input_focused(&mut self, focused: bool) {
        self.text_input_focused = focused;
    }
}
