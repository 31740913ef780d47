//! Keyboard command routing.
//!
//! Key handling is split in two steps:
//! - [`resolve`] maps a key event to a [`KeyCommand`] given the current view
//!   flags, with no side effects
//! - [`KeyboardRouter::handle`] resolves and dispatches to `ReviewCoordinator`
//!
//! Suppression rules:
//! - Inactive tab, settings dialog open or text input focused: every key ignored
//! - Video viewer open: only `Escape` works, and it closes the viewer
//! - Letter shortcuts need no Ctrl/Meta/Alt, except `Ctrl/Cmd+A` and `Ctrl/Cmd+D`

use crate::app::{ReviewCoordinator, ReviewState};
use crate::domain::navigation::Direction;
use crate::state::ViewState;

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { ctrl: false, meta: false, alt: false, shift: false };

    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::NONE }
    }

    pub fn meta() -> Self {
        Self { meta: true, ..Self::NONE }
    }

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    fn blocks_letters(&self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

/// A key independent of the windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Digit(u8),
    Arrow(Direction),
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Navigate(Direction),
    NextFrame,
    PreviousFrame,
    QuickLabel(usize),
    SelectAll,
    DeselectAll,
    MarkForRejection,
    RejectSelected,
    Confirm,
    OpenLabelPicker,
    Escape,
    CloseVideo,
}

/// Maps a key event to a command under the current view flags.
///
/// # Returns
/// `None` when the key is suppressed or unbound
pub fn resolve(event: &KeyEvent, view: &ViewState) -> Option<KeyCommand> {
    if !view.is_tab_active() || view.is_settings_open() || view.is_text_input_focused() {
        return None;
    }
    if view.is_video_open() {
        return (event.key == Key::Escape).then_some(KeyCommand::CloseVideo);
    }

    match event.key {
        Key::Escape => Some(KeyCommand::Escape),
        Key::Arrow(direction) => Some(KeyCommand::Navigate(direction)),
        Key::Digit(digit) if digit <= 9 => Some(KeyCommand::QuickLabel(digit as usize)),
        Key::Char(c) => {
            let c = c.to_ascii_lowercase();
            if event.modifiers.command() && !event.modifiers.alt {
                return match c {
                    'a' => Some(KeyCommand::SelectAll),
                    'd' => Some(KeyCommand::DeselectAll),
                    _ => None,
                };
            }
            if event.modifiers.blocks_letters() {
                return None;
            }
            match c {
                'n' => Some(KeyCommand::NextFrame),
                'p' => Some(KeyCommand::PreviousFrame),
                'd' => Some(KeyCommand::MarkForRejection),
                'r' => Some(KeyCommand::RejectSelected),
                'c' => Some(KeyCommand::Confirm),
                's' => Some(KeyCommand::OpenLabelPicker),
                _ => None,
            }
        }
        Key::Digit(_) | Key::Other => None,
    }
}

/// Routes key events into the review session.
pub struct KeyboardRouter;

impl KeyboardRouter {
    /// Handles one key press.
    ///
    /// # Returns
    /// The command that ran, if any
    pub fn handle(state: &mut ReviewState, event: &KeyEvent) -> Option<KeyCommand> {
        let command = resolve(event, &state.view)?;
        tracing::debug!(?command, "key command");
        Self::dispatch(state, command);
        Some(command)
    }

    fn dispatch(state: &mut ReviewState, command: KeyCommand) {
        match command {
            KeyCommand::Navigate(direction) => ReviewCoordinator::navigate(state, direction),
            KeyCommand::NextFrame => ReviewCoordinator::focus_next(state),
            KeyCommand::PreviousFrame => ReviewCoordinator::focus_previous(state),
            KeyCommand::QuickLabel(index) => ReviewCoordinator::assign_quick_label(state, index),
            KeyCommand::SelectAll => ReviewCoordinator::select_all(state),
            KeyCommand::DeselectAll => ReviewCoordinator::deselect_all(state),
            KeyCommand::MarkForRejection => ReviewCoordinator::mark_for_rejection(state),
            KeyCommand::RejectSelected => ReviewCoordinator::reject_selected(state),
            KeyCommand::Confirm => ReviewCoordinator::confirm(state),
            KeyCommand::OpenLabelPicker => ReviewCoordinator::open_label_picker(state, true),
            KeyCommand::Escape => ReviewCoordinator::escape(state),
            KeyCommand::CloseVideo => ReviewCoordinator::set_video_open(state, false),
        }
    }
}
