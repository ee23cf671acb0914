//! Keyboard and pointer translation from the egui event stream

use eframe::egui::{self, Key, Modifiers, Pos2};
use tracing::debug;

use super::snapshot::{FrameEvent, HeldKeys};
use crate::tracking::Position;

/// Reads held direction keys through a key-state query.
///
/// Takes a closure so it works with `egui::InputState::key_down` as well as
/// plain sets in tests.
pub fn held_keys(is_down: impl Fn(Key) -> bool, modifiers: Modifiers) -> HeldKeys {
    HeldKeys {
        left: is_down(Key::ArrowLeft),
        right: is_down(Key::ArrowRight),
        up: is_down(Key::ArrowUp),
        down: is_down(Key::ArrowDown),
        boost: modifiers.shift,
    }
}

/// Display name used for the "Last Key" panel line
pub fn key_display_name(key: Key) -> String {
    key.name().to_lowercase()
}

/// Turns raw egui events into [`FrameEvent`]s.
///
/// egui reports modifiers as state rather than key events, so shift presses
/// are detected from the edge between two calls.
#[derive(Debug, Default)]
pub struct KeyboardTranslator {
    shift_down: bool,
}

impl KeyboardTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `origin` is the top-left corner of the drawable area in window points.
    pub fn frame_events(
        &mut self,
        events: &[egui::Event],
        modifiers: Modifiers,
        close_requested: bool,
        origin: Pos2,
    ) -> Vec<FrameEvent> {
        let mut frame_events = Vec::new();

        if close_requested {
            frame_events.push(FrameEvent::Quit);
        }

        if modifiers.shift && !self.shift_down {
            frame_events.push(FrameEvent::KeyPressed("shift".to_string()));
        }
        self.shift_down = modifiers.shift;

        for event in events {
            match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    ..
                } => {
                    let name = key_display_name(*key);
                    debug!("Key pressed: {}", name);
                    frame_events.push(FrameEvent::KeyPressed(name));
                    if *key == Key::Space {
                        frame_events.push(FrameEvent::Reset);
                    }
                }
                egui::Event::PointerMoved(pos) => {
                    let local = *pos - origin;
                    frame_events.push(FrameEvent::PointerMoved(Position::new(
                        local.x.round() as i32,
                        local.y.round() as i32,
                    )));
                }
                _ => {}
            }
        }

        frame_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn key_event(key: Key, pressed: bool, repeat: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn test_held_keys_from_set() {
        let down: HashSet<Key> = [Key::ArrowLeft, Key::ArrowDown].into_iter().collect();
        let keys = held_keys(|key| down.contains(&key), Modifiers::SHIFT);

        assert!(keys.left && keys.down && keys.boost);
        assert!(!keys.right && !keys.up);
    }

    #[test]
    fn test_space_records_key_then_resets() {
        let mut translator = KeyboardTranslator::new();
        let events = translator.frame_events(
            &[key_event(Key::Space, true, false)],
            Modifiers::NONE,
            false,
            Pos2::ZERO,
        );

        assert_eq!(
            events,
            vec![FrameEvent::KeyPressed("space".to_string()), FrameEvent::Reset]
        );
    }

    #[test]
    fn test_releases_and_repeats_are_ignored() {
        let mut translator = KeyboardTranslator::new();
        let events = translator.frame_events(
            &[
                key_event(Key::A, false, false),
                key_event(Key::A, true, true),
            ],
            Modifiers::NONE,
            false,
            Pos2::ZERO,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_shift_reported_once_per_press() {
        let mut translator = KeyboardTranslator::new();
        let first = translator.frame_events(&[], Modifiers::SHIFT, false, Pos2::ZERO);
        let held = translator.frame_events(&[], Modifiers::SHIFT, false, Pos2::ZERO);
        translator.frame_events(&[], Modifiers::NONE, false, Pos2::ZERO);
        let again = translator.frame_events(&[], Modifiers::SHIFT, false, Pos2::ZERO);

        assert_eq!(first, vec![FrameEvent::KeyPressed("shift".to_string())]);
        assert!(held.is_empty());
        assert_eq!(again.len(), 1);
    }

    #[test]
    fn test_pointer_relative_to_origin() {
        let mut translator = KeyboardTranslator::new();
        let events = translator.frame_events(
            &[egui::Event::PointerMoved(Pos2::new(120.4, 80.6))],
            Modifiers::NONE,
            false,
            Pos2::new(20.0, 0.0),
        );
        assert_eq!(events, vec![FrameEvent::PointerMoved(Position::new(100, 81))]);
    }

    #[test]
    fn test_close_request_is_quit() {
        let mut translator = KeyboardTranslator::new();
        let events = translator.frame_events(&[], Modifiers::NONE, true, Pos2::ZERO);
        assert_eq!(events, vec![FrameEvent::Quit]);
    }
}
