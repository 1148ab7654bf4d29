//! Capture Surfaces - Raw host input to normalized events
//!
//! A capture surface receives raw keystroke notifications from a host and
//! normalizes them into [`KeyInputEvent`]s, invoking its bound handler
//! exactly once per logical keystroke. Two backends cover the two host
//! shapes:
//!
//! - [`KeyCodeCapture`] - keycode/modifier key-down events (interactive
//!   terminals reporting full `KeyEvent`s)
//! - [`TextInsertCapture`] - insert-text/delete-backward notifications
//!   (paste streams, embedded hosts that forward typed text)
//!
//! The backend is chosen when the surface is created, not per event:
//! each backend only understands its own notification shape and silently
//! ignores the other's. Unrecognized input is dropped, never an error.
//!
//! # API
//!
//! - `detect_backend` - Pick a backend from host capabilities
//! - `create_surface` - Construct a surface for a backend
//! - `KeyCapture` - Surface contract (handler binding, activation, feed)

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

use crossterm::event::KeyEvent;
use crossterm::tty::IsTty;

use crate::event::KeyInputEvent;

pub mod keycode;
pub mod text_insert;

pub use keycode::KeyCodeCapture;
pub use text_insert::TextInsertCapture;

// =============================================================================
// TYPES
// =============================================================================

/// Handler invoked with each normalized event.
pub type EventHandler = Rc<dyn Fn(KeyInputEvent)>;

/// A raw keystroke notification from a host.
///
/// Hosts deliver whichever shapes they have; a surface consumes the
/// shapes its backend understands and ignores the rest.
#[derive(Clone, Debug)]
pub enum RawInput<'a> {
    /// Text was inserted (typing, paste). May span multiple characters.
    InsertText(&'a str),
    /// The character before the insertion point was deleted.
    DeleteBackward,
    /// A key-down event carrying a key code and modifiers.
    Key(KeyEvent),
}

/// Which capture backend a surface uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Insert-text/delete-backward notifications.
    TextInsert,
    /// Keycode/modifier key-down events.
    KeyCode,
}

// =============================================================================
// SURFACE CONTRACT
// =============================================================================

/// The capture surface contract.
///
/// A surface holds exactly one piece of mutable state beyond its
/// active flag: an optional event handler. It buffers nothing and
/// delivers events synchronously, in arrival order.
pub trait KeyCapture {
    /// Bind the event handler, replacing any previous one.
    fn bind_handler(&self, handler: EventHandler);

    /// Drop the bound handler. Subsequent input delivers nothing.
    fn clear_handler(&self);

    /// Request activation or relinquishment. Idempotent: a request
    /// matching the current state does nothing.
    fn set_active(&self, active: bool);

    /// Whether the surface currently holds input focus.
    fn is_active(&self) -> bool;

    /// Normalize one raw notification. Returns true if at least one
    /// event was delivered to the handler.
    fn feed(&self, input: &RawInput<'_>) -> bool;
}

// =============================================================================
// SHARED SURFACE STATE
// =============================================================================

/// Handler slot and activation gate shared by both backends.
pub(crate) struct SurfaceState {
    handler: RefCell<Option<EventHandler>>,
    active: Cell<bool>,
}

impl SurfaceState {
    pub(crate) fn new() -> Self {
        Self {
            handler: RefCell::new(None),
            active: Cell::new(false),
        }
    }

    pub(crate) fn bind_handler(&self, handler: EventHandler) {
        *self.handler.borrow_mut() = Some(handler);
    }

    pub(crate) fn clear_handler(&self) {
        *self.handler.borrow_mut() = None;
    }

    pub(crate) fn set_active(&self, active: bool) {
        // Only act on change - repeated requests are no-ops
        if self.active.get() != active {
            self.active.set(active);
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Deliver one event to the handler, if active and bound.
    ///
    /// The handler is cloned out of the slot before invocation so it may
    /// rebind or clear the surface without a borrow conflict.
    pub(crate) fn emit(&self, event: KeyInputEvent) -> bool {
        if !self.active.get() {
            return false;
        }
        let handler = self.handler.borrow().clone();
        match handler {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// CLASSIFIER
// =============================================================================

/// Classify a printable character: space is its own variant.
pub(crate) fn classify_char(c: char) -> KeyInputEvent {
    if c == ' ' {
        KeyInputEvent::Space
    } else {
        KeyInputEvent::Character(c)
    }
}

// =============================================================================
// BACKEND SELECTION
// =============================================================================

/// Detect which backend fits the current host.
///
/// Interactive terminals report full key events, so they get the keycode
/// backend. Non-tty hosts (pipes, embedded front-ends) only surface text
/// insertions and get the insert-text backend.
pub fn detect_backend() -> Backend {
    if io::stdin().is_tty() {
        Backend::KeyCode
    } else {
        Backend::TextInsert
    }
}

/// Construct a capture surface for a backend.
pub fn create_surface(backend: Backend) -> Rc<dyn KeyCapture> {
    match backend {
        Backend::TextInsert => Rc::new(TextInsertCapture::new()),
        Backend::KeyCode => Rc::new(KeyCodeCapture::new()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
