//! Insert-Text Backend - Insertion and delete-backward notifications
//!
//! Normalizes the notification shape of hosts that only surface text
//! edits: a string was inserted, or the character before the insertion
//! point was deleted. There is no representation for escape or special
//! keys on this backend, so those variants are unreachable here.

use crate::event::KeyInputEvent;

use super::{classify_char, KeyCapture, EventHandler, RawInput, SurfaceState};

// =============================================================================
// TEXT INSERT CAPTURE
// =============================================================================

/// Capture surface for hosts that report text insertions.
pub struct TextInsertCapture {
    state: SurfaceState,
}

impl TextInsertCapture {
    pub fn new() -> Self {
        Self {
            state: SurfaceState::new(),
        }
    }

    /// Normalize an insertion, one event per logical character.
    ///
    /// Line breaks become `Enter` (a CRLF pair is one line break, one
    /// event). Other control characters are dropped. Returns true if at
    /// least one event was delivered.
    pub fn insert_text(&self, text: &str) -> bool {
        let mut delivered = false;
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            let event = match c {
                '\r' => {
                    // CRLF is a single line break
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    KeyInputEvent::Enter
                }
                '\n' => KeyInputEvent::Enter,
                c if c.is_control() => continue,
                c => classify_char(c),
            };
            delivered |= self.state.emit(event);
        }
        delivered
    }

    /// Normalize a delete-backward notification.
    pub fn delete_backward(&self) -> bool {
        self.state.emit(KeyInputEvent::Backspace)
    }
}

impl Default for TextInsertCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyCapture for TextInsertCapture {
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
            RawInput::InsertText(text) => self.insert_text(text),
            RawInput::DeleteBackward => self.delete_backward(),
            // Not this host's shape
            RawInput::Key(_) => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
