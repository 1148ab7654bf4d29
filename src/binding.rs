//! Bindings - Reactive props and the focus-identity adapter
//!
//! The listener's active flag can be a static value, a two-way signal,
//! or a getter. Getters make derived flags cheap: the focus-identity
//! adapter below is just a getter over a shared focus slot.
//!
//! # Example
//!
//! ```ignore
//! use spark_signals::signal;
//! use key_listener::binding::focus_binding;
//!
//! let focused = signal(None::<u32>);
//! let flag = focus_binding(focused.clone(), 7);
//!
//! focused.set(Some(7));
//! assert!(flag.get());
//! ```

use std::rc::Rc;

use spark_signals::Signal;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by listener attachments.
///
/// Call this to detach the listener and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Callback Types
// =============================================================================

/// Submit callback for the text convenience listener (Enter key).
pub type SubmitCallback = Rc<dyn Fn()>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// Reads inside a reactive effect track the underlying signal, so a
/// `Signal` or `Getter` flag re-runs the listener's reconcile step when
/// it changes.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time the value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value.
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

// =============================================================================
// Focus-Identity Adapter
// =============================================================================

/// Adapt a shared focus-identity slot into a boolean active flag.
///
/// For frameworks that manage focus as one mutually-exclusive identity
/// rather than independent flags: the returned flag reads true exactly
/// when `slot` holds `identity`. Pure adapter - no state of its own, and
/// the surface never writes the slot back.
pub fn focus_binding<I>(slot: Signal<Option<I>>, identity: I) -> PropValue<bool>
where
    I: Clone + PartialEq + 'static,
{
    PropValue::Getter(Rc::new(move || slot.get().as_ref() == Some(&identity)))
}

// =============================================================================
// TESTS
// =============================================================================
