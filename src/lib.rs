//! # key-listener
//!
//! Keyboard capture for reactive terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! A capture surface receives raw keystroke notifications from a host and
//! normalizes them into one closed event enum; a listener attaches a
//! surface declaratively, keeps its focus state in sync with a reactive
//! flag, and forwards events into a callback or a bound text value.
//!
//! ## Architecture
//!
//! Data flows one way:
//! ```text
//! host notification → capture surface → KeyInputEvent → handler → (text binding)
//! ```
//!
//! Two capture backends cover the two host shapes, chosen when the
//! surface is created: keycode/modifier key-down events (interactive
//! terminals), and insert-text/delete-backward notifications (paste
//! streams, embedded hosts). Both feed the same event enum.
//!
//! Everything is single-threaded and synchronous: normalization and
//! handler invocation happen on the caller's thread, one invocation per
//! keystroke, in arrival order.
//!
//! ## Modules
//!
//! - [`event`] - The normalized event enum
//! - [`capture`] - Capture surfaces and backend selection
//! - [`binding`] - Reactive props and the focus-identity adapter
//! - [`listener`] - Declarative attachment and event routing

pub mod binding;
pub mod capture;
pub mod event;
pub mod listener;

// Re-export commonly used items
pub use event::{KeyInputEvent, SpecialKey};

pub use capture::{
    create_surface, detect_backend, Backend, EventHandler, KeyCapture, KeyCodeCapture, RawInput,
    TextInsertCapture,
};

pub use binding::{focus_binding, Cleanup, PropValue, SubmitCallback};

pub use listener::{
    disable_paste_capture, enable_paste_capture, focused_key_listener, focused_key_listener_on,
    key_listener, key_listener_on, reset_listeners, route_event, route_input, text_listener,
    text_listener_on,
};
