//! Keyboard translation from egui events.

use eframe::egui;
use rframes::domain::Direction;
use rframes::input::{Key, KeyEvent, Modifiers};

/// Converts an egui key to a review key.
fn translate_key(key: egui::Key) -> Key {
    match key {
        egui::Key::ArrowLeft => Key::Arrow(Direction::Left),
        egui::Key::ArrowRight => Key::Arrow(Direction::Right),
        egui::Key::ArrowUp => Key::Arrow(Direction::Up),
        egui::Key::ArrowDown => Key::Arrow(Direction::Down),
        egui::Key::Escape => Key::Escape,
        egui::Key::Num0 => Key::Digit(0),
        egui::Key::Num1 => Key::Digit(1),
        egui::Key::Num2 => Key::Digit(2),
        egui::Key::Num3 => Key::Digit(3),
        egui::Key::Num4 => Key::Digit(4),
        egui::Key::Num5 => Key::Digit(5),
        egui::Key::Num6 => Key::Digit(6),
        egui::Key::Num7 => Key::Digit(7),
        egui::Key::Num8 => Key::Digit(8),
        egui::Key::Num9 => Key::Digit(9),
        other => {
            let mut chars = other.name().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Key::Char(c),
                _ => Key::Other,
            }
        }
    }
}

fn translate_modifiers(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.ctrl,
        meta: modifiers.mac_cmd,
        alt: modifiers.alt,
        shift: modifiers.shift,
    }
}

/// Collects key presses from this frame's input, in order.
///
/// Repeats are included so that held arrow keys keep stepping.
pub fn collect_key_events(ctx: &egui::Context) -> Vec<KeyEvent> {
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key { key, pressed: true, modifiers, .. } => {
                    Some(KeyEvent::new(translate_key(*key), translate_modifiers(*modifiers)))
                }
                _ => None,
            })
            .filter(|event| event.key != Key::Other)
            .collect()
    })
}
