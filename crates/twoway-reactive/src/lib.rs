#![forbid(unsafe_code)]

//! Reactive data bindings for twoway.
//!
//! This crate provides the change-tracking primitives the list view is built
//! on:
//!
//! - [`Observable`]: A shared, version-tracked value wrapper with change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//! - [`Binding`]: A read binding that evaluates against its source on every
//!   `get()`.
//! - [`TwoWayBinding`]: Keeps two observables in sync in both directions.
//! - [`BindingScope`]: Owns every subscription registered by one view.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared ownership.
//! Subscribers are stored as `Weak` function pointers. Dead entries are pruned
//! on every notification and on every new subscription, so the list stays
//! bounded by the number of live subscriptions.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version bump,
//!    no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 5. Notifications are delivered synchronously, before `set()` returns.

pub mod binding;
pub mod observable;

pub use binding::{Binding, BindingScope, TwoWayBinding, bind_mapped};
pub use observable::{Observable, Subscription};
