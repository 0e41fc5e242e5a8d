#![forbid(unsafe_code)]

//! Row views bound to a single [`TodoItem`].
//!
//! The visual state of a row is a pure function of the item's title and
//! `completed` flag ([`RowDisplay::derive`]). A [`TodoRow`] is the live view:
//! it owns a toggle control that is two-way bound to the item and a dirty
//! flag that the item's change notification raises.
//!
//! # Invariants
//!
//! 1. A row is bound to an item handle, never to a list position.
//! 2. Creating a row reads the item's current value; nothing is cached.
//! 3. Dropping a row unsubscribes everything it registered.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use twoway_reactive::{Binding, BindingScope, Observable, bind_mapped};
use twoway_style::{Color, Style};

use crate::item::TodoItem;

/// Position of the completion toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Off,
    On,
}

impl Toggle {
    #[must_use]
    pub const fn from_completed(completed: bool) -> Self {
        if completed { Self::On } else { Self::Off }
    }

    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Styles used when deriving row display attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    /// Layered over `title` for finished items.
    pub completed: Style,
    pub toggle_on: Style,
    pub toggle_off: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::new(),
            completed: Style::new().fg(Color::GREY).strikethrough(),
            toggle_on: Style::new().fg(Color::ACCENT).bold(),
            toggle_off: Style::new(),
        }
    }
}

/// Display attributes of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDisplay {
    pub title: String,
    pub title_style: Style,
    pub toggle: Toggle,
    pub toggle_style: Style,
}

impl RowDisplay {
    /// Derive the row's look from the item state.
    #[must_use]
    pub fn derive(title: &str, completed: bool, theme: &Theme) -> Self {
        let (title_style, toggle_style) = if completed {
            (theme.title.merge(theme.completed), theme.toggle_on)
        } else {
            (theme.title, theme.toggle_off)
        };
        Self {
            title: title.to_string(),
            title_style,
            toggle: Toggle::from_completed(completed),
            toggle_style,
        }
    }

    #[must_use]
    pub fn is_struck_through(&self) -> bool {
        self.title_style.has(twoway_style::StyleFlags::STRIKETHROUGH)
    }
}

/// A rendered row, live-bound to one item.
pub struct TodoRow {
    index: usize,
    item: TodoItem,
    toggle: Observable<bool>,
    display: Binding<RowDisplay>,
    dirty: Rc<Cell<bool>>,
    scope: BindingScope,
}

impl TodoRow {
    /// Bind a new row to `item`. `index` is the item's list position, kept
    /// for layout only.
    #[must_use]
    pub fn bind(index: usize, item: &TodoItem, theme: Theme) -> Self {
        let toggle = Observable::new(false);
        let dirty = Rc::new(Cell::new(true));

        let mut scope = BindingScope::new();
        scope.two_way(item.completed(), &toggle);
        let d = Rc::clone(&dirty);
        scope.subscribe(item.completed(), move |_| d.set(true));

        let title = item.title().to_string();
        let display = bind_mapped(item.completed(), move |completed| {
            RowDisplay::derive(&title, *completed, &theme)
        });

        Self {
            index,
            item: item.clone(),
            toggle,
            display,
            dirty,
            scope,
        }
    }

    /// List position the row was rendered for.
    #[must_use]
    pub fn item_index(&self) -> usize {
        self.index
    }

    /// The bound item.
    #[must_use]
    pub fn item(&self) -> &TodoItem {
        &self.item
    }

    /// Current toggle position.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.toggle.get()
    }

    /// User interaction: move the toggle. Writes through to the item.
    pub fn set_toggle(&self, on: bool) {
        tracing::debug!(index = self.index, on, "row toggle");
        self.toggle.set(on);
    }

    /// User interaction: flip the toggle.
    pub fn click_toggle(&self) {
        self.set_toggle(!self.is_on());
    }

    /// Display attributes for the item's current state.
    #[must_use]
    pub fn display(&self) -> RowDisplay {
        self.display.get()
    }

    /// Whether the item changed since the last [`take_dirty`](Self::take_dirty).
    /// A freshly bound row starts dirty.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Read and clear the dirty flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Number of subscriptions the row holds on its item.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.scope.binding_count()
    }
}

impl fmt::Debug for TodoRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoRow")
            .field("index", &self.index)
            .field("title", &self.item.title())
            .field("on", &self.is_on())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}
