//! Event Model - Normalized keyboard events
//!
//! The closed set of events a capture surface can deliver. Pure data:
//! structural equality, no behavior, no validation. The capture backends
//! are responsible for only constructing well-formed variants.
//!
//! # Invariants
//!
//! - Exactly one event per normalized keystroke.
//! - Space and line breaks are never delivered through `Character`.
//! - `Character` carries one logical character, post shift normalization.

// =============================================================================
// SPECIAL KEYS
// =============================================================================

/// Non-printable keys reported by keycode-style hosts.
///
/// Insert-text hosts have no representation for these, so the
/// [`KeyInputEvent::Special`] variant is unreachable on that backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Tab,
    /// Function key (F1 = `Function(1)`).
    Function(u8),
}

// =============================================================================
// KEY INPUT EVENT
// =============================================================================

/// A single normalized keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInputEvent {
    /// A single non-space, non-control glyph.
    Character(char),
    Space,
    Backspace,
    Enter,
    Escape,
    /// A non-printable key (arrows, function keys, etc.).
    Special(SpecialKey),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        assert_eq!(KeyInputEvent::Character('a'), KeyInputEvent::Character('a'));
        assert_ne!(KeyInputEvent::Character('a'), KeyInputEvent::Character('b'));
        assert_ne!(KeyInputEvent::Character(' '), KeyInputEvent::Space);
        assert_eq!(
            KeyInputEvent::Special(SpecialKey::Function(5)),
            KeyInputEvent::Special(SpecialKey::Function(5))
        );
        assert_ne!(
            KeyInputEvent::Special(SpecialKey::ArrowUp),
            KeyInputEvent::Special(SpecialKey::ArrowDown)
        );
    }

    #[test]
    fn test_pattern_match_is_exhaustive() {
        let events = [
            KeyInputEvent::Character('x'),
            KeyInputEvent::Space,
            KeyInputEvent::Backspace,
            KeyInputEvent::Enter,
            KeyInputEvent::Escape,
            KeyInputEvent::Special(SpecialKey::Home),
        ];

        for event in events {
            match event {
                KeyInputEvent::Character(_) => {}
                KeyInputEvent::Space => {}
                KeyInputEvent::Backspace => {}
                KeyInputEvent::Enter => {}
                KeyInputEvent::Escape => {}
                KeyInputEvent::Special(_) => {}
            }
        }
    }
}
