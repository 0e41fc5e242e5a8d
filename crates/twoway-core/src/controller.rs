#![forbid(unsafe_code)]

//! The list controller: owns the items, renders bound rows, and runs the
//! "Complete All" bulk action.

use crate::item::TodoItem;
use crate::row::{Theme, TodoRow};

/// Titles of the items the application starts with, in display order.
pub const SEED_TITLES: [&str; 7] = [
    "Write a blog post",
    "Call John",
    "Make doctor's appointment",
    "Reply emails",
    "Buy Lego for Jimmy",
    "Get a hair cut",
    "Book flight to Japan",
];

/// Owns a fixed, ordered list of [`TodoItem`]s.
///
/// The list never grows, shrinks, or reorders after construction.
#[derive(Debug)]
pub struct TodoListController {
    items: Vec<TodoItem>,
    theme: Theme,
}

impl TodoListController {
    /// Build a controller over `titles`, all incomplete.
    ///
    /// # Panics
    ///
    /// Panics if any title is empty.
    #[must_use]
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<TodoItem> = titles.into_iter().map(TodoItem::new).collect();
        tracing::debug!(count = items.len(), "todo list created");
        Self {
            items,
            theme: Theme::default(),
        }
    }

    /// Controller over [`SEED_TITLES`].
    #[must_use]
    pub fn with_seed() -> Self {
        Self::new(SEED_TITLES)
    }

    /// Number of items, fixed at construction.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.items.len()
    }

    /// All items in display order.
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// The item at `index`, if any.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&TodoItem> {
        self.items.get(index)
    }

    /// How many items are currently complete.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_completed()).count()
    }

    /// Render a row bound to the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= row_count()`.
    #[must_use]
    pub fn render_row(&self, index: usize) -> TodoRow {
        let count = self.items.len();
        let Some(item) = self.items.get(index) else {
            panic!("render_row: index {index} out of range for {count} rows");
        };
        TodoRow::bind(index, item, self.theme)
    }

    /// Mark every item complete. Returns how many items changed.
    pub fn complete_all(&self) -> usize {
        let changed = self
            .items
            .iter()
            .map(|item| item.set_completed(true))
            .filter(|changed| *changed)
            .count();
        tracing::info!(changed, total = self.items.len(), "complete all");
        changed
    }
}

impl Default for TodoListController {
    fn default() -> Self {
        Self::with_seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn seed_has_seven_incomplete_items() {
        let list = TodoListController::with_seed();
        assert_eq!(list.row_count(), 7);
        assert_eq!(list.completed_count(), 0);
        assert_eq!(list.item(2).map(TodoItem::title), Some("Make doctor's appointment"));
    }

    #[test]
    fn complete_all_reports_changed_items() {
        let list = TodoListController::with_seed();
        list.items()[1].set_completed(true);
        assert_eq!(list.complete_all(), 6);
        assert_eq!(list.complete_all(), 0);
        assert_eq!(list.completed_count(), 7);
    }

    #[test]
    #[should_panic(expected = "index 7 out of range for 7 rows")]
    fn render_row_out_of_range_panics() {
        let list = TodoListController::with_seed();
        let _ = list.render_row(7);
    }

    #[test]
    fn render_row_binds_matching_item() {
        let list = TodoListController::with_seed();
        let row = list.render_row(4);
        assert!(row.item().same_item(&list.items()[4]));
        assert_eq!(row.display().title, "Buy Lego for Jimmy");
    }

    #[test]
    fn item_out_of_range_is_none() {
        let list = TodoListController::new(["a"]);
        assert!(list.item(1).is_none());
    }

    #[tracing_test::traced_test]
    #[test]
    fn complete_all_is_logged() {
        let list = TodoListController::with_seed();
        list.complete_all();
        assert!(logs_contain("complete all"));
        assert!(logs_contain("changed=7"));
    }

    proptest! {
        #[test]
        fn complete_all_completes_everything(initial in proptest::collection::vec(any::<bool>(), 1..16)) {
            let list = TodoListController::new((0..initial.len()).map(|i| format!("task {i}")));
            for (item, done) in list.items().iter().zip(&initial) {
                item.set_completed(*done);
            }
            let already = initial.iter().filter(|d| **d).count();
            prop_assert_eq!(list.complete_all(), initial.len() - already);
            prop_assert!(list.items().iter().all(TodoItem::is_completed));
        }
    }
}
