#![forbid(unsafe_code)]

//! Bindings between a model value and the state a view shows.
//!
//! Three pieces cover what a list row needs:
//!
//! - [`bind_mapped`] derives a display value from a model observable. It
//!   reads the source on every `get()`, so it can never show a stale value,
//!   and it registers no subscriber.
//! - [`TwoWayBinding`] mirrors a model observable into a control observable
//!   and back. The control adopts the model's value when the binding is made.
//! - [`BindingScope`] owns every subscription a view registers. Dropping the
//!   scope detaches the view from the model in one step.
//!
//! ```
//! use twoway_reactive::{BindingScope, Observable, bind_mapped};
//!
//! let done = Observable::new(false);
//! let checkbox = Observable::new(true);
//!
//! let mut scope = BindingScope::new();
//! scope.two_way(&done, &checkbox);
//! let mark = bind_mapped(&done, |d| if *d { "[x]" } else { "[ ]" });
//!
//! assert!(!checkbox.get());
//! checkbox.set(true);
//! assert!(done.get());
//! assert_eq!(mark.get(), "[x]");
//!
//! drop(scope);
//! assert_eq!(done.subscriber_count(), 0);
//! ```

use std::cell::Cell;
use std::rc::Rc;

use super::observable::{Observable, Subscription};

/// A read-only value derived from an [`Observable`].
///
/// Evaluated on every [`get`](Self::get); cloning shares the source.
pub struct Binding<T> {
    eval: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            eval: Rc::clone(&self.eval),
        }
    }
}

impl<T: std::fmt::Debug + 'static> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}

impl<T: 'static> Binding<T> {
    /// Evaluate against the source's current value.
    #[must_use]
    pub fn get(&self) -> T {
        (self.eval)()
    }
}

/// Derive a value from `source` through `map`.
pub fn bind_mapped<S: Clone + PartialEq + 'static, T: 'static>(
    source: &Observable<S>,
    map: impl Fn(&S) -> T + 'static,
) -> Binding<T> {
    let source = source.clone();
    Binding {
        eval: Rc::new(move || source.with(&map)),
    }
}

/// Keeps a model observable and a control observable equal.
///
/// Both directions share one `syncing` flag: while a write is being copied
/// across, the echo coming back from the other side is ignored, so one
/// change produces exactly one write on each side.
pub struct TwoWayBinding<T: Clone + PartialEq + 'static> {
    model_to_control: Subscription,
    control_to_model: Subscription,
    _value: std::marker::PhantomData<T>,
}

impl<T: Clone + PartialEq + 'static> TwoWayBinding<T> {
    /// Bind `control` to `model`. `control` takes the model's current value.
    pub fn new(model: &Observable<T>, control: &Observable<T>) -> Self {
        control.set(model.get());
        let syncing = Rc::new(Cell::new(false));
        Self {
            model_to_control: mirror(model, control, &syncing),
            control_to_model: mirror(control, model, &syncing),
            _value: std::marker::PhantomData,
        }
    }

    /// Hand both subscriptions over, `[model → control, control → model]`.
    #[must_use]
    pub fn into_subscriptions(self) -> [Subscription; 2] {
        [self.model_to_control, self.control_to_model]
    }
}

impl<T: Clone + PartialEq + 'static> std::fmt::Debug for TwoWayBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwoWayBinding").finish_non_exhaustive()
    }
}

/// Copy every change of `from` into `to` unless a copy is already running.
fn mirror<T: Clone + PartialEq + 'static>(
    from: &Observable<T>,
    to: &Observable<T>,
    syncing: &Rc<Cell<bool>>,
) -> Subscription {
    let to = to.clone();
    let syncing = Rc::clone(syncing);
    from.subscribe(move |value| {
        if syncing.replace(true) {
            return;
        }
        to.set(value.clone());
        syncing.set(false);
    })
}

/// Owns the subscriptions of one view.
///
/// Dropping the scope unsubscribes all of them.
#[derive(Default)]
pub struct BindingScope {
    subscriptions: Vec<Subscription>,
}

impl BindingScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` on every change of `source` while the scope lives.
    pub fn subscribe<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &Observable<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        self.subscriptions.push(source.subscribe(callback));
        self
    }

    /// Bind `control` to `model` in both directions while the scope lives.
    pub fn two_way<T: Clone + PartialEq + 'static>(
        &mut self,
        model: &Observable<T>,
        control: &Observable<T>,
    ) -> &mut Self {
        self.subscriptions
            .extend(TwoWayBinding::new(model, control).into_subscriptions());
        self
    }

    /// Number of subscriptions held.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl std::fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingScope")
            .field("binding_count", &self.subscriptions.len())
            .finish()
    }
}
