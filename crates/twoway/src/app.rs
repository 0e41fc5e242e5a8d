#![forbid(unsafe_code)]

//! The list screen: messages, state transitions, and the visible window.
//!
//! Layout is one header line, one line per visible row, and a footer. Only
//! rows inside the visible window are bound to their items; a row that
//! scrolls out is dropped (its item keeps its value with no observers) and a
//! row that scrolls in is rendered fresh from the item.
//!
//! Redraw is driven by [`TodoApp::take_damage`]: rows whose item changed
//! report themselves dirty through their binding, so a toggle or a bulk
//! action repaints exactly the affected lines.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use twoway_core::{TodoListController, TodoRow};

use crate::view::{self, Line, TOGGLE_COLUMNS};

/// Lines reserved for the header and footer.
const CHROME_LINES: u16 = 2;

/// Input to [`TodoApp::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Up,
    Down,
    /// Toggle the selected row.
    Toggle,
    CompleteAll,
    Click { column: u16, row: u16 },
    Resize { width: u16, height: u16 },
    Quit,
    Ignore,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => key_msg(key),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Self::Click { column, row },
            Event::Resize(width, height) => Self::Resize { width, height },
            _ => Self::Ignore,
        }
    }
}

fn key_msg(key: KeyEvent) -> Msg {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Msg::Quit,
        KeyCode::Up | KeyCode::Char('k') => Msg::Up,
        KeyCode::Down | KeyCode::Char('j') => Msg::Down,
        KeyCode::Char(' ') | KeyCode::Enter => Msg::Toggle,
        KeyCode::Char('a' | 'A') => Msg::CompleteAll,
        KeyCode::Char('q') | KeyCode::Esc => Msg::Quit,
        _ => Msg::Ignore,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Screen lines that need repainting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Damage {
    Full,
    Lines(Vec<u16>),
}

impl Damage {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Lines(lines) if lines.is_empty())
    }
}

#[derive(Debug)]
pub struct TodoApp {
    list: TodoListController,
    /// Bound rows for the visible window, in display order.
    rows: Vec<TodoRow>,
    selected: usize,
    scroll: usize,
    width: u16,
    height: u16,
    full_redraw: bool,
    /// Selection moved: old and new screen lines need repainting.
    moved_from: Option<usize>,
    painted_done: Option<usize>,
}

impl TodoApp {
    #[must_use]
    pub fn new(list: TodoListController, width: u16, height: u16) -> Self {
        let mut app = Self {
            list,
            rows: Vec::new(),
            selected: 0,
            scroll: 0,
            width,
            height,
            full_redraw: true,
            moved_from: None,
            painted_done: None,
        };
        app.sync_window();
        app
    }

    #[must_use]
    pub fn list(&self) -> &TodoListController {
        &self.list
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Rows currently bound, in display order.
    #[must_use]
    pub fn visible_rows(&self) -> &[TodoRow] {
        &self.rows
    }

    /// Number of list lines that fit between header and footer.
    #[must_use]
    pub fn window_len(&self) -> usize {
        usize::from(self.height.saturating_sub(CHROME_LINES))
    }

    pub fn update(&mut self, msg: Msg) -> Flow {
        match msg {
            Msg::Up => self.select(self.selected.saturating_sub(1)),
            Msg::Down => self.select(self.selected + 1),
            Msg::Toggle => self.toggle_selected(),
            Msg::CompleteAll => {
                self.list.complete_all();
            }
            Msg::Click { column, row } => self.click(column, row),
            Msg::Resize { width, height } => {
                self.width = width;
                self.height = height;
                self.full_redraw = true;
                self.sync_window();
            }
            Msg::Quit => {
                tracing::info!("quit requested");
                return Flow::Quit;
            }
            Msg::Ignore => {}
        }
        Flow::Continue
    }

    fn select(&mut self, index: usize) {
        let count = self.list.row_count();
        if count == 0 {
            return;
        }
        let index = index.min(count - 1);
        if index != self.selected {
            self.moved_from = Some(self.selected);
            self.selected = index;
            self.sync_window();
        }
    }

    fn toggle_selected(&mut self) {
        if let Some(row) = self.row_for(self.selected) {
            row.click_toggle();
        }
    }

    fn click(&mut self, column: u16, line: u16) {
        if line == 0 {
            let total = self.list.row_count();
            let start = view::complete_all_column(self.list.completed_count(), total, self.width);
            if start.is_some_and(|start| column >= start) {
                self.list.complete_all();
            }
            return;
        }
        let Some(offset) = usize::from(line).checked_sub(1) else {
            return;
        };
        if offset >= self.rows.len() {
            return;
        }
        let index = self.scroll + offset;
        self.select(index);
        if TOGGLE_COLUMNS.contains(&column) {
            self.toggle_selected();
        }
    }

    fn row_for(&self, index: usize) -> Option<&TodoRow> {
        index
            .checked_sub(self.scroll)
            .and_then(|offset| self.rows.get(offset))
    }

    /// Scroll so the selection is visible, then bind exactly the rows in
    /// the window. Rows already bound are kept.
    fn sync_window(&mut self) {
        let window = self.window_len();
        let count = self.list.row_count();

        let scroll = if window == 0 {
            self.selected
        } else if self.selected < self.scroll {
            self.selected
        } else if self.selected >= self.scroll + window {
            self.selected + 1 - window
        } else {
            self.scroll
        };
        let end = (scroll + window).min(count);

        let first_bound = self.rows.first().map(TodoRow::item_index);
        if first_bound == Some(scroll) && self.rows.len() == end.saturating_sub(scroll) {
            return;
        }

        let mut old: Vec<Option<TodoRow>> = self.rows.drain(..).map(Some).collect();
        let old_scroll = self.scroll;
        self.rows = (scroll..end)
            .map(|index| {
                index
                    .checked_sub(old_scroll)
                    .and_then(|offset| old.get_mut(offset))
                    .and_then(Option::take)
                    .unwrap_or_else(|| self.list.render_row(index))
            })
            .collect();
        drop(old);

        if scroll != self.scroll {
            self.full_redraw = true;
        }
        self.scroll = scroll;
        tracing::trace!(scroll, bound = self.rows.len(), "window synced");
    }

    /// Collect the lines to repaint and clear dirty state.
    pub fn take_damage(&mut self) -> Damage {
        let mut lines = Vec::new();
        for (offset, row) in self.rows.iter().enumerate() {
            if row.take_dirty() {
                lines.push(Self::row_line_y(offset));
            }
        }
        if let Some(prev) = self.moved_from.take() {
            for index in [prev, self.selected] {
                if let Some(offset) = index.checked_sub(self.scroll) {
                    if offset < self.rows.len() {
                        lines.push(Self::row_line_y(offset));
                    }
                }
            }
        }
        let done = self.list.completed_count();
        if self.painted_done != Some(done) {
            self.painted_done = Some(done);
            lines.push(0);
        }

        if std::mem::take(&mut self.full_redraw) {
            return Damage::Full;
        }
        lines.sort_unstable();
        lines.dedup();
        Damage::Lines(lines)
    }

    fn row_line_y(offset: usize) -> u16 {
        u16::try_from(offset + 1).unwrap_or(u16::MAX)
    }

    /// Content of screen line `y`.
    #[must_use]
    pub fn line_at(&self, y: u16) -> Line {
        if y == 0 {
            return view::header(self.list.completed_count(), self.list.row_count(), self.width);
        }
        if y + 1 == self.height {
            return view::footer(self.width);
        }
        match self.rows.get(usize::from(y - 1)) {
            Some(row) => view::row_line(
                &row.display(),
                row.item_index() == self.selected,
                self.width,
            ),
            None => Line::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app(height: u16) -> TodoApp {
        TodoApp::new(TodoListController::with_seed(), 60, height)
    }

    #[test]
    fn key_mapping() {
        assert_eq!(Msg::from(key(KeyCode::Up)), Msg::Up);
        assert_eq!(Msg::from(key(KeyCode::Char('j'))), Msg::Down);
        assert_eq!(Msg::from(key(KeyCode::Char(' '))), Msg::Toggle);
        assert_eq!(Msg::from(key(KeyCode::Char('A'))), Msg::CompleteAll);
        assert_eq!(Msg::from(key(KeyCode::Esc)), Msg::Quit);
        assert_eq!(Msg::from(key(KeyCode::Char('x'))), Msg::Ignore);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(Msg::from(ctrl_c), Msg::Quit);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(Msg::from(release), Msg::Ignore);
    }

    #[test]
    fn mouse_and_resize_mapping() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 2,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(Msg::from(click), Msg::Click { column: 3, row: 2 });
        assert_eq!(
            Msg::from(Event::Resize(80, 24)),
            Msg::Resize {
                width: 80,
                height: 24
            }
        );
    }

    #[test]
    fn all_rows_bound_when_they_fit() {
        let app = app(20);
        assert_eq!(app.visible_rows().len(), 7);
        assert_eq!(app.list().items()[6].observer_count(), 2);
    }

    #[test]
    fn toggle_selected_row() {
        let mut app = app(20);
        app.update(Msg::Down);
        app.update(Msg::Toggle);
        assert!(app.list().items()[1].is_completed());
        assert!(!app.list().items()[0].is_completed());
    }

    #[test]
    fn selection_clamps_to_list() {
        let mut app = app(20);
        app.update(Msg::Up);
        assert_eq!(app.selected(), 0);
        for _ in 0..20 {
            app.update(Msg::Down);
        }
        assert_eq!(app.selected(), 6);
    }

    #[test]
    fn quit_stops_loop() {
        let mut app = app(20);
        assert_eq!(app.update(Msg::Ignore), Flow::Continue);
        assert_eq!(app.update(Msg::Quit), Flow::Quit);
    }

    #[test]
    fn first_damage_is_full_then_clean() {
        let mut app = app(20);
        assert_eq!(app.take_damage(), Damage::Full);
        assert!(app.take_damage().is_empty());
    }

    #[test]
    fn toggle_damages_row_and_header_only() {
        let mut app = app(20);
        let _ = app.take_damage();
        app.update(Msg::Down);
        let _ = app.take_damage();

        app.update(Msg::Toggle);
        assert_eq!(app.take_damage(), Damage::Lines(vec![0, 2]));
    }

    #[test]
    fn complete_all_damages_every_changed_row() {
        let mut app = app(20);
        app.update(Msg::Toggle);
        let _ = app.take_damage();

        app.update(Msg::CompleteAll);
        assert_eq!(app.take_damage(), Damage::Lines(vec![0, 2, 3, 4, 5, 6, 7]));
        assert_eq!(app.list().completed_count(), 7);
    }

    #[test]
    fn small_window_binds_only_visible_rows() {
        // 3 list lines
        let mut app = app(5);
        assert_eq!(app.visible_rows().len(), 3);
        assert_eq!(app.list().items()[5].observer_count(), 0);

        for _ in 0..5 {
            app.update(Msg::Down);
        }
        let bound: Vec<usize> = app.visible_rows().iter().map(TodoRow::item_index).collect();
        assert_eq!(bound, vec![3, 4, 5]);
        assert_eq!(app.list().items()[0].observer_count(), 0);
        assert_eq!(app.list().items()[5].observer_count(), 2);
    }

    #[test]
    fn rows_scrolled_back_show_current_state() {
        let mut app = app(5);
        for _ in 0..6 {
            app.update(Msg::Down);
        }
        app.update(Msg::CompleteAll);
        for _ in 0..6 {
            app.update(Msg::Up);
        }
        let first = &app.visible_rows()[0];
        assert_eq!(first.item_index(), 0);
        assert!(first.is_on());
        assert!(first.display().is_struck_through());
    }

    #[test]
    fn scrolling_forces_full_redraw() {
        let mut app = app(5);
        let _ = app.take_damage();
        for _ in 0..3 {
            app.update(Msg::Down);
        }
        assert_eq!(app.take_damage(), Damage::Full);
    }

    #[test]
    fn click_on_toggle_column_toggles_row() {
        let mut app = app(20);
        app.update(Msg::Click { column: 3, row: 3 });
        assert_eq!(app.selected(), 2);
        assert!(app.list().items()[2].is_completed());
    }

    #[test]
    fn click_on_title_only_selects() {
        let mut app = app(20);
        app.update(Msg::Click { column: 20, row: 4 });
        assert_eq!(app.selected(), 3);
        assert!(!app.list().items()[3].is_completed());
    }

    #[test]
    fn click_on_header_action_completes_all() {
        let mut app = app(20);
        app.update(Msg::Click { column: 59, row: 0 });
        assert_eq!(app.list().completed_count(), 7);
    }

    #[test]
    fn header_click_on_narrow_screen_needs_visible_label() {
        let mut app = TodoApp::new(TodoListController::with_seed(), 10, 12);
        app.update(Msg::Click { column: 9, row: 0 });
        assert_eq!(app.list().completed_count(), 0, "label is clipped away");

        app.update(Msg::Resize { width: 20, height: 12 });
        app.update(Msg::Click { column: 16, row: 0 });
        assert_eq!(app.list().completed_count(), 0);
        app.update(Msg::Click { column: 18, row: 0 });
        assert_eq!(app.list().completed_count(), 7);
    }

    #[test]
    fn click_outside_rows_is_ignored() {
        let mut app = app(20);
        app.update(Msg::Click { column: 3, row: 15 });
        assert_eq!(app.list().completed_count(), 0);
        assert_eq!(app.selected(), 0);
    }

    #[test]
    fn lines_layout() {
        let mut app = app(10);
        app.update(Msg::Toggle);
        assert!(app.line_at(0).plain().contains("1/7 done"));
        assert_eq!(app.line_at(1).plain(), "› [x] Write a blog post");
        assert_eq!(app.line_at(2).plain(), "  [ ] Call John");
        assert!(app.line_at(9).plain().contains("complete all"));
        assert_eq!(app.line_at(8), Line::default());
    }

    #[test]
    fn resize_rebinds_window() {
        let mut app = app(20);
        app.update(Msg::Resize {
            width: 40,
            height: 4,
        });
        assert_eq!(app.visible_rows().len(), 2);
        assert_eq!(app.take_damage(), Damage::Full);
    }
}
