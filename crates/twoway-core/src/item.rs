#![forbid(unsafe_code)]

//! The to-do item model.
//!
//! A [`TodoItem`] pairs an immutable title with an observable `completed`
//! flag. Cloning an item yields another handle to the *same* item: both
//! clones share the flag and its subscribers.
//!
//! Every change of the flag is logged at debug level, whichever handle or
//! binding wrote it. The item keeps its own subscription for that; it is not
//! counted by [`TodoItem::observer_count`].

use std::fmt;
use std::rc::Rc;

use twoway_reactive::{Observable, Subscription};

/// One task in the list.
#[derive(Clone)]
pub struct TodoItem {
    title: Rc<str>,
    completed: Observable<bool>,
    _change_log: Rc<Subscription>,
}

impl TodoItem {
    /// Create an incomplete item.
    ///
    /// # Panics
    ///
    /// Panics if `title` is empty or whitespace-only.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let title: String = title.into();
        assert!(
            !title.trim().is_empty(),
            "TodoItem requires a non-empty title"
        );
        let title: Rc<str> = Rc::from(title);
        let completed = Observable::new(false);
        let logged = Rc::clone(&title);
        let change_log = completed.subscribe(move |completed| {
            tracing::debug!(title = %logged, completed, "item updated");
        });
        Self {
            title,
            completed,
            _change_log: Rc::new(change_log),
        }
    }

    /// The title given at creation.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current value of the `completed` flag.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }

    /// Set the flag, notifying observers before returning.
    ///
    /// Returns `true` when the flag changed.
    pub fn set_completed(&self, completed: bool) -> bool {
        self.completed.set(completed)
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> bool {
        let next = !self.is_completed();
        self.set_completed(next);
        next
    }

    /// Shared handle to the `completed` flag, for binding views to it.
    #[must_use]
    pub fn completed(&self) -> &Observable<bool> {
        &self.completed
    }

    /// Number of views currently watching this item.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.completed.subscriber_count().saturating_sub(1)
    }

    /// Whether `self` and `other` are handles to the same item.
    #[must_use]
    pub fn same_item(&self, other: &Self) -> bool {
        self.completed.ptr_eq(&other.completed)
    }
}

impl fmt::Debug for TodoItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoItem")
            .field("title", &self.title)
            .field("completed", &self.is_completed())
            .finish()
    }
}
