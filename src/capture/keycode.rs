//! Keycode Backend - Key-down events with key codes and modifiers
//!
//! Normalizes crossterm `KeyEvent`s. Classification runs in priority
//! order: escape first, then recognized special keys, then decoded
//! characters. Anything left over (media keys, modifier-only events,
//! releases) is dropped without a handler invocation.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::event::{KeyInputEvent, SpecialKey};

use super::{classify_char, KeyCapture, EventHandler, RawInput, SurfaceState};

// =============================================================================
// KEYCODE CAPTURE
// =============================================================================

/// Capture surface for hosts that report key-down events.
pub struct KeyCodeCapture {
    state: SurfaceState,
}

impl KeyCodeCapture {
    pub fn new() -> Self {
        Self {
            state: SurfaceState::new(),
        }
    }

    /// Normalize one key-down event.
    ///
    /// Returns true if an event was delivered to the handler. Release
    /// events never deliver; repeats count as fresh keystrokes.
    pub fn key_down(&self, event: &KeyEvent) -> bool {
        if event.kind == KeyEventKind::Release {
            return false;
        }

        // 1. Escape takes priority over everything else
        if event.code == KeyCode::Esc {
            return self.state.emit(KeyInputEvent::Escape);
        }

        // 2. Recognized special keys
        if let Some(mapped) = map_special(event.code) {
            return self.state.emit(mapped);
        }

        // 3. Decoded character
        if let KeyCode::Char(c) = event.code {
            let c = apply_shift(c, event.modifiers);
            return self.state.emit(classify_char(c));
        }

        // 4. Everything else is dropped
        false
    }
}

impl Default for KeyCodeCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyCapture for KeyCodeCapture {
    fn bind_handler(&self, handler: EventHandler) {
        self.state.bind_handler(handler);
    }

    fn clear_handler(&self) {
        self.state.clear_handler();
    }

    fn set_active(&self, active: bool) {
        self.state.set_active(active);
    }

    fn is_active(&self) -> bool {
        self.state.is_active()
    }

    fn feed(&self, input: &RawInput<'_>) -> bool {
        match input {
            RawInput::Key(event) => self.key_down(event),
            // Not this host's shape
            RawInput::InsertText(_) | RawInput::DeleteBackward => false,
        }
    }
}

// =============================================================================
// CLASSIFICATION HELPERS
// =============================================================================

/// Map recognized non-character key codes.
///
/// Backspace and forward delete both collapse to `Backspace`; enter and
/// carriage return collapse to `Enter`. Unrecognized codes return None
/// and the event is dropped.
fn map_special(code: KeyCode) -> Option<KeyInputEvent> {
    match code {
        KeyCode::Backspace | KeyCode::Delete => Some(KeyInputEvent::Backspace),
        KeyCode::Enter => Some(KeyInputEvent::Enter),
        KeyCode::Tab => Some(KeyInputEvent::Special(SpecialKey::Tab)),
        KeyCode::Up => Some(KeyInputEvent::Special(SpecialKey::ArrowUp)),
        KeyCode::Down => Some(KeyInputEvent::Special(SpecialKey::ArrowDown)),
        KeyCode::Left => Some(KeyInputEvent::Special(SpecialKey::ArrowLeft)),
        KeyCode::Right => Some(KeyInputEvent::Special(SpecialKey::ArrowRight)),
        KeyCode::Home => Some(KeyInputEvent::Special(SpecialKey::Home)),
        KeyCode::End => Some(KeyInputEvent::Special(SpecialKey::End)),
        KeyCode::PageUp => Some(KeyInputEvent::Special(SpecialKey::PageUp)),
        KeyCode::PageDown => Some(KeyInputEvent::Special(SpecialKey::PageDown)),
        KeyCode::Insert => Some(KeyInputEvent::Special(SpecialKey::Insert)),
        KeyCode::F(n) => Some(KeyInputEvent::Special(SpecialKey::Function(n))),
        _ => None,
    }
}

/// Resolve the SHIFT flag against the decoded character.
///
/// Hosts that pre-shift the character still set the flag; when the
/// character is already uppercase the flag is redundant and discarded.
/// When the host reports the unshifted character plus the flag, the
/// character is uppercased. Shifted symbols are never remapped.
fn apply_shift(c: char, modifiers: KeyModifiers) -> char {
    if modifiers.contains(KeyModifiers::SHIFT) && !c.is_uppercase() {
        c.to_uppercase().next().unwrap_or(c)
    } else {
        c
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn press_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn active_capture() -> (KeyCodeCapture, Rc<RefCell<Vec<KeyInputEvent>>>) {
        let capture = KeyCodeCapture::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        capture.bind_handler(Rc::new(move |event| {
            events_clone.borrow_mut().push(event);
        }));
        capture.set_active(true);
        (capture, events)
    }

    #[test]
    fn test_character() {
        let (capture, events) = active_capture();
        assert!(capture.key_down(&press(KeyCode::Char('a'))));
        assert_eq!(events.borrow().as_slice(), &[KeyInputEvent::Character('a')]);
    }

    #[test]
    fn test_space_is_not_a_character() {
        let (capture, events) = active_capture();
        capture.key_down(&press(KeyCode::Char(' ')));
        assert_eq!(events.borrow().as_slice(), &[KeyInputEvent::Space]);
    }

    #[test]
    fn test_escape() {
        let (capture, events) = active_capture();
        capture.key_down(&press(KeyCode::Esc));
        assert_eq!(events.borrow().as_slice(), &[KeyInputEvent::Escape]);
    }

    #[test]
    fn test_escape_priority_over_modified_input() {
        // Escape wins even when the event carries modifiers that would
        // otherwise influence character decoding.
        let (capture, events) = active_capture();
        capture.key_down(&press_with(KeyCode::Esc, KeyModifiers::SHIFT));
        assert_eq!(events.borrow().as_slice(), &[KeyInputEvent::Escape]);
    }

    #[test]
    fn test_backspace_and_forward_delete() {
        let (capture, events) = active_capture();
        capture.key_down(&press(KeyCode::Backspace));
        capture.key_down(&press(KeyCode::Delete));
        assert_eq!(
            events.borrow().as_slice(),
            &[KeyInputEvent::Backspace, KeyInputEvent::Backspace]
        );
    }

    #[test]
    fn test_enter() {
        let (capture, events) = active_capture();
        capture.key_down(&press(KeyCode::Enter));
        assert_eq!(events.borrow().as_slice(), &[KeyInputEvent::Enter]);
    }

    #[test]
    fn test_special_keys() {
        let (capture, events) = active_capture();
        capture.key_down(&press(KeyCode::Up));
        capture.key_down(&press(KeyCode::Home));
        capture.key_down(&press(KeyCode::F(5)));
        capture.key_down(&press(KeyCode::Tab));
        assert_eq!(
            events.borrow().as_slice(),
            &[
                KeyInputEvent::Special(SpecialKey::ArrowUp),
                KeyInputEvent::Special(SpecialKey::Home),
                KeyInputEvent::Special(SpecialKey::Function(5)),
                KeyInputEvent::Special(SpecialKey::Tab),
            ]
        );
    }

    #[test]
    fn test_shift_uppercases_lowercase() {
        let (capture, events) = active_capture();
        capture.key_down(&press_with(KeyCode::Char('a'), KeyModifiers::SHIFT));
        assert_eq!(events.borrow().as_slice(), &[KeyInputEvent::Character('A')]);
    }

    #[test]
    fn test_shift_redundant_on_uppercase() {
        // Host already shifted the character; no double application.
        let (capture, events) = active_capture();
        capture.key_down(&press_with(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(events.borrow().as_slice(), &[KeyInputEvent::Character('A')]);
    }

    #[test]
    fn test_shift_does_not_remap_symbols() {
        let (capture, events) = active_capture();
        capture.key_down(&press_with(KeyCode::Char('1'), KeyModifiers::SHIFT));
        assert_eq!(events.borrow().as_slice(), &[KeyInputEvent::Character('1')]);
    }

    #[test]
    fn test_character_delivered_despite_ctrl() {
        let (capture, events) = active_capture();
        capture.key_down(&press_with(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(events.borrow().as_slice(), &[KeyInputEvent::Character('c')]);
    }

    #[test]
    fn test_unrecognized_keys_dropped() {
        let (capture, events) = active_capture();
        assert!(!capture.key_down(&press(KeyCode::CapsLock)));
        assert!(!capture.key_down(&press(KeyCode::NumLock)));
        assert!(!capture.key_down(&press(KeyCode::Null)));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_release_dropped_repeat_delivered() {
        let (capture, events) = active_capture();

        let mut release = press(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        assert!(!capture.key_down(&release));

        let mut repeat = press(KeyCode::Char('a'));
        repeat.kind = KeyEventKind::Repeat;
        assert!(capture.key_down(&repeat));

        assert_eq!(events.borrow().as_slice(), &[KeyInputEvent::Character('a')]);
    }

    #[test]
    fn test_inactive_surface_drops_input() {
        let (capture, events) = active_capture();
        capture.set_active(false);
        assert!(!capture.key_down(&press(KeyCode::Char('a'))));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_feed_ignores_insert_notifications() {
        let (capture, events) = active_capture();
        assert!(!capture.feed(&RawInput::InsertText("abc")));
        assert!(!capture.feed(&RawInput::DeleteBackward));
        assert!(capture.feed(&RawInput::Key(press(KeyCode::Char('x')))));
        assert_eq!(events.borrow().as_slice(), &[KeyInputEvent::Character('x')]);
    }

    #[test]
    fn test_one_event_per_keystroke_in_order() {
        let (capture, events) = active_capture();
        for c in ['a', 'b', 'c'] {
            capture.key_down(&press(KeyCode::Char(c)));
        }
        assert_eq!(
            events.borrow().as_slice(),
            &[
                KeyInputEvent::Character('a'),
                KeyInputEvent::Character('b'),
                KeyInputEvent::Character('c'),
            ]
        );
    }
}
