#![forbid(unsafe_code)]

//! Shared, version-tracked values with synchronous change notification.
//!
//! An [`Observable<T>`] is a cheap handle: cloning it yields another handle to
//! the same value. Any handle may read, write, or subscribe.
//!
//! # Notification order
//!
//! `set()` stores the new value, bumps the version, releases its borrow and
//! only then invokes callbacks. A callback is therefore free to read this
//! observable or to write a different one (as [`TwoWayBinding`] does).
//!
//! # Failure Modes
//!
//! - Callback panic: propagates to the caller of `set()`. Remaining callbacks
//!   for that cycle are skipped; the value has already been stored.
//! - Writing the *same* observable from inside one of its own callbacks is
//!   allowed and starts a nested notification cycle.
//!
//! [`TwoWayBinding`]: crate::TwoWayBinding

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

struct Inner<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<Callback<T>>>,
}

/// A shared value that notifies subscribers whenever it changes.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable holding `value`, at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of changes applied since creation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Replace the value and notify subscribers if it changed.
    ///
    /// Returns `true` when the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
        true
    }

    /// Register `callback` to run after every change.
    ///
    /// The callback stays registered for as long as the returned
    /// [`Subscription`] is alive. Entries left behind by dropped
    /// subscriptions are pruned here.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        let mut inner = self.inner.borrow_mut();
        inner.subscribers.retain(|weak| weak.strong_count() > 0);
        inner.subscribers.push(Rc::downgrade(&callback));
        drop(inner);
        Subscription {
            _callback: Box::new(callback),
        }
    }

    /// Number of live subscriptions. Prunes dead entries as a side effect.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.inner.borrow_mut();
        inner.subscribers.retain(|weak| weak.strong_count() > 0);
        inner.subscribers.len()
    }

    /// Whether two handles refer to the same underlying value.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self) {
        let (value, live) = {
            let mut inner = self.inner.borrow_mut();
            let mut live = Vec::with_capacity(inner.subscribers.len());
            inner.subscribers.retain(|weak| match weak.upgrade() {
                Some(callback) => {
                    live.push(callback);
                    true
                }
                None => false,
            });
            (inner.value.clone(), live)
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(subscribers = live.len(), "observable changed");

        for callback in live {
            callback(&value);
        }
    }
}

/// Keeps a subscriber callback registered. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    _callback: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
