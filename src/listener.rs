//! Key Listener - Declarative attachment and event routing
//!
//! Attaches a capture surface, keeps its active state reconciled with a
//! reactive flag, and forwards normalized events into a callback or a
//! bound text value. Attachment contributes nothing visual: a listener
//! never enters a layout tree and has no size.
//!
//! # API
//!
//! - `key_listener(flag, on_event)` - Forward every event to a callback
//! - `text_listener(text, flag, on_submit)` - Edit a bound string
//! - `focused_key_listener(slot, identity, on_event)` - Focus-identity flag
//! - `route_input` / `route_event` - Feed host input to attached listeners
//! - `enable_paste_capture` / `disable_paste_capture` - Bracketed paste
//!
//! # Example
//!
//! ```ignore
//! use spark_signals::signal;
//! use key_listener::{text_listener, route_event};
//!
//! let text = signal(String::new());
//! let focused = signal(true);
//! let cleanup = text_listener(text.clone(), focused.clone(), None);
//!
//! // Event loop: feed host events to attached listeners
//! // route_event(&crossterm::event::read()?);
//!
//! cleanup();
//! ```

use std::cell::RefCell;
use std::io::{self, stdout};
use std::rc::Rc;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::execute;
use spark_signals::{effect, Signal};

use crate::binding::{focus_binding, Cleanup, PropValue, SubmitCallback};
use crate::capture::{create_surface, detect_backend, KeyCapture, RawInput};
use crate::event::KeyInputEvent;

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

struct ListenerRegistry {
    surfaces: Vec<(usize, Rc<dyn KeyCapture>)>,
    next_id: usize,
}

impl ListenerRegistry {
    fn new() -> Self {
        Self {
            surfaces: Vec::new(),
            next_id: 0,
        }
    }

    fn register(&mut self, surface: Rc<dyn KeyCapture>) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.surfaces.push((id, surface));
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<ListenerRegistry> = RefCell::new(ListenerRegistry::new());
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Feed one raw notification to every attached listener.
///
/// Inactive surfaces and surfaces of the other backend drop the input.
/// Returns true if any listener delivered an event.
pub fn route_input(input: &RawInput<'_>) -> bool {
    // Snapshot so handlers may attach or detach listeners mid-dispatch
    let surfaces: Vec<Rc<dyn KeyCapture>> = REGISTRY.with(|reg| {
        reg.borrow()
            .surfaces
            .iter()
            .map(|(_, surface)| surface.clone())
            .collect()
    });

    let mut delivered = false;
    for surface in surfaces {
        delivered |= surface.feed(input);
    }
    delivered
}

/// Convert a crossterm event and route it to attached listeners.
///
/// Key events feed keycode surfaces; paste events feed insert-text
/// surfaces. Other event kinds are not keystrokes and deliver nothing.
pub fn route_event(event: &Event) -> bool {
    match event {
        Event::Key(key) => route_input(&RawInput::Key(*key)),
        Event::Paste(text) => route_input(&RawInput::InsertText(text)),
        _ => false,
    }
}

/// Clear all attached listeners (for testing).
pub fn reset_listeners() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.surfaces.clear();
        reg.next_id = 0;
    });
}

// =============================================================================
// PASTE CAPTURE
// =============================================================================

/// Enable bracketed paste, so hosts deliver insertions as paste events.
pub fn enable_paste_capture() -> io::Result<()> {
    execute!(stdout(), EnableBracketedPaste)
}

/// Disable bracketed paste.
pub fn disable_paste_capture() -> io::Result<()> {
    execute!(stdout(), DisableBracketedPaste)
}

// =============================================================================
// BASE LISTENER
// =============================================================================

/// Attach a listener on an explicit capture surface.
///
/// The surface's active state follows `active`: a reactive effect re-runs
/// when the flag changes and issues an activate/relinquish request, which
/// the surface applies only on change. Every normalized event is forwarded
/// verbatim to `on_event`. Returns a cleanup that detaches the listener,
/// relinquishes the surface, and drops the handler.
pub fn key_listener_on(
    surface: Rc<dyn KeyCapture>,
    active: impl Into<PropValue<bool>>,
    on_event: impl Fn(KeyInputEvent) + 'static,
) -> Cleanup {
    let active = active.into();

    surface.bind_handler(Rc::new(on_event));

    let id = REGISTRY.with(|reg| reg.borrow_mut().register(surface.clone()));

    // Reconcile active state with the flag
    let surface_for_effect = surface.clone();
    let stop_effect = effect(move || {
        surface_for_effect.set_active(active.get());
    });

    Box::new(move || {
        stop_effect();
        REGISTRY.with(|reg| {
            reg.borrow_mut()
                .surfaces
                .retain(|(surface_id, _)| *surface_id != id);
        });
        surface.set_active(false);
        surface.clear_handler();
    })
}

/// Attach a listener on a surface chosen by host capability detection.
pub fn key_listener(
    active: impl Into<PropValue<bool>>,
    on_event: impl Fn(KeyInputEvent) + 'static,
) -> Cleanup {
    key_listener_on(create_surface(detect_backend()), active, on_event)
}

// =============================================================================
// TEXT CONVENIENCE LISTENER
// =============================================================================

/// Apply the default event-to-text mapping to a bound string.
fn apply_edit(text: &Signal<String>, on_submit: &Option<SubmitCallback>, event: KeyInputEvent) {
    match event {
        KeyInputEvent::Character(c) => {
            let mut value = text.get();
            value.push(c);
            text.set(value);
        }
        KeyInputEvent::Space => {
            let mut value = text.get();
            value.push(' ');
            text.set(value);
        }
        KeyInputEvent::Backspace => {
            let mut value = text.get();
            // No-op on empty text
            if value.pop().is_some() {
                text.set(value);
            }
        }
        KeyInputEvent::Enter => match on_submit {
            Some(callback) => callback(),
            None => {
                let mut value = text.get();
                value.push('\n');
                text.set(value);
            }
        },
        KeyInputEvent::Escape | KeyInputEvent::Special(_) => {}
    }
}

/// Attach a listener that edits a bound string, on an explicit surface.
///
/// Characters and spaces append, backspace removes the last character
/// (no-op on empty text), and enter invokes `on_submit` when supplied,
/// otherwise appends a newline. Escape and special keys are ignored.
pub fn text_listener_on(
    surface: Rc<dyn KeyCapture>,
    text: Signal<String>,
    active: impl Into<PropValue<bool>>,
    on_submit: Option<SubmitCallback>,
) -> Cleanup {
    key_listener_on(surface, active, move |event| {
        apply_edit(&text, &on_submit, event);
    })
}

/// Attach a text-editing listener on a detected surface.
pub fn text_listener(
    text: Signal<String>,
    active: impl Into<PropValue<bool>>,
    on_submit: Option<SubmitCallback>,
) -> Cleanup {
    text_listener_on(create_surface(detect_backend()), text, active, on_submit)
}

// =============================================================================
// FOCUS-IDENTITY LISTENER
// =============================================================================

/// Attach a listener whose active flag is a focus-identity slot, on an
/// explicit surface.
///
/// The listener is active exactly while `slot` holds `identity`, which
/// makes listeners sharing one slot mutually exclusive.
pub fn focused_key_listener_on<I>(
    surface: Rc<dyn KeyCapture>,
    slot: Signal<Option<I>>,
    identity: I,
    on_event: impl Fn(KeyInputEvent) + 'static,
) -> Cleanup
where
    I: Clone + PartialEq + 'static,
{
    key_listener_on(surface, focus_binding(slot, identity), on_event)
}

/// Attach a focus-identity listener on a detected surface.
pub fn focused_key_listener<I>(
    slot: Signal<Option<I>>,
    identity: I,
    on_event: impl Fn(KeyInputEvent) + 'static,
) -> Cleanup
where
    I: Clone + PartialEq + 'static,
{
    focused_key_listener_on(create_surface(detect_backend()), slot, identity, on_event)
}

// =============================================================================
// TESTS
// =============================================================================
