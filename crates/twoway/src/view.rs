#![forbid(unsafe_code)]

//! Screen lines built from row display attributes.
//!
//! Everything here is pure: a [`Line`] is a list of styled spans, clipped to
//! the terminal width by grapheme so wide characters never straddle the edge.

use twoway_core::{RowDisplay, Toggle};
use twoway_style::{Color, Style};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Label of the bulk action in the header.
pub const COMPLETE_ALL_LABEL: &str = "[Complete All]";

/// Columns occupied by the selection marker and the toggle, before the title.
pub const TOGGLE_COLUMNS: std::ops::Range<u16> = 2..5;

const HINTS: &str = " ↑/↓ move · space toggle · a complete all · q quit";

/// Text drawn in one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    /// Styled text.
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Text in the terminal's default style.
    pub fn raw(text: impl Into<String>) -> Self {
        Self::new(text, Style::new())
    }
}

/// One screen line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    /// A line made of `spans`, left to right.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Display width in terminal columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.width()).sum()
    }

    /// Concatenated text, without styles.
    #[must_use]
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Clip to at most `width` columns.
    #[must_use]
    pub fn clipped(mut self, width: usize) -> Self {
        let mut remaining = width;
        let mut kept = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..) {
            if remaining == 0 {
                break;
            }
            let span_width = span.text.width();
            if span_width <= remaining {
                remaining -= span_width;
                kept.push(span);
                continue;
            }
            let mut text = String::new();
            for g in span.text.graphemes(true) {
                let w = g.width();
                if w > remaining {
                    break;
                }
                remaining -= w;
                text.push_str(g);
            }
            kept.push(Span::new(text, span.style));
            remaining = 0;
        }
        Self { spans: kept }
    }
}

/// Header: app title on the left, progress and the bulk action on the right.
#[must_use]
pub fn header(done: usize, total: usize, width: u16) -> Line {
    Line::new(Vec::from(header_spans(done, total, width))).clipped(width.into())
}

/// Column where the header's bulk-action label starts, or `None` when the
/// label is clipped away entirely at this width.
#[must_use]
pub fn complete_all_column(done: usize, total: usize, width: u16) -> Option<u16> {
    let [title, gap, progress, _] = header_spans(done, total, width);
    let start = title.text.width() + gap.text.width() + progress.text.width();
    u16::try_from(start).ok().filter(|&column| column < width)
}

/// Unclipped header spans: title, gap, progress, action.
fn header_spans(done: usize, total: usize, width: u16) -> [Span; 4] {
    let title = Span::new(" To-Do", Style::new().bold());
    let progress = Span::new(format!("{done}/{total} done  "), Style::new().dim());
    let action = Span::new(COMPLETE_ALL_LABEL, Style::new().fg(Color::ACCENT).bold());

    let used = title.text.width() + progress.text.width() + action.text.width();
    let gap = usize::from(width).saturating_sub(used).max(1);
    [title, Span::raw(" ".repeat(gap)), progress, action]
}

/// One list row: selection marker, toggle, then the styled title.
#[must_use]
pub fn row_line(display: &RowDisplay, selected: bool, width: u16) -> Line {
    let marker = if selected {
        Span::new("› ", Style::new().fg(Color::ACCENT).bold())
    } else {
        Span::raw("  ")
    };
    let toggle = match display.toggle {
        Toggle::On => "[x]",
        Toggle::Off => "[ ]",
    };
    Line::new(vec![
        marker,
        Span::new(toggle, display.toggle_style),
        Span::raw(" "),
        Span::new(display.title.clone(), display.title_style),
    ])
    .clipped(width.into())
}

/// Key hints at the bottom of the screen.
#[must_use]
pub fn footer(width: u16) -> Line {
    Line::new(vec![Span::new(HINTS, Style::new().dim())]).clipped(width.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use twoway_core::Theme;
    use twoway_style::StyleFlags;

    #[test]
    fn clipped_respects_width() {
        let line = Line::new(vec![Span::raw("hello"), Span::raw(" world")]).clipped(8);
        assert_eq!(line.plain(), "hello wo");
        assert_eq!(line.width(), 8);
    }

    #[test]
    fn clipped_never_splits_wide_graphemes() {
        let line = Line::new(vec![Span::raw("日本へ")]).clipped(5);
        assert_eq!(line.plain(), "日本");
    }

    #[test]
    fn clipped_to_zero_is_empty() {
        assert_eq!(Line::new(vec![Span::raw("x")]).clipped(0).plain(), "");
    }

    #[test]
    fn header_right_aligns_action() {
        let line = header(2, 7, 60);
        assert_eq!(line.width(), 60);
        assert!(line.plain().ends_with("2/7 done  [Complete All]"));
        assert_eq!(
            complete_all_column(2, 7, 60).map(usize::from),
            Some(60 - COMPLETE_ALL_LABEL.len())
        );
    }

    #[test]
    fn narrow_header_clips_action_label() {
        let line = header(0, 7, 20);
        assert_eq!(line.plain(), " To-Do 0/7 done  [Co");
        assert_eq!(complete_all_column(0, 7, 20), Some(17));
    }

    #[test]
    fn action_column_absent_when_label_clipped_away() {
        assert_eq!(header(0, 7, 10).plain(), " To-Do 0/7");
        assert_eq!(complete_all_column(0, 7, 10), None);
        assert_eq!(complete_all_column(0, 7, 17), None);
    }

    #[test]
    fn row_line_for_completed_item() {
        let display = RowDisplay::derive("Call John", true, &Theme::default());
        let line = row_line(&display, true, 40);
        assert_eq!(line.plain(), "› [x] Call John");
        let title = line.spans.last().unwrap();
        assert!(title.style.has(StyleFlags::STRIKETHROUGH));
    }

    #[test]
    fn row_line_for_open_item() {
        let display = RowDisplay::derive("Call John", false, &Theme::default());
        let line = row_line(&display, false, 40);
        assert_eq!(line.plain(), "  [ ] Call John");
        assert!(!line.spans.last().unwrap().style.has(StyleFlags::STRIKETHROUGH));
    }

    #[test]
    fn toggle_columns_cover_brackets() {
        let display = RowDisplay::derive("x", false, &Theme::default());
        let text = row_line(&display, false, 40).plain();
        let start = usize::from(TOGGLE_COLUMNS.start);
        let end = usize::from(TOGGLE_COLUMNS.end);
        assert_eq!(&text[start..end], "[ ]");
    }
}
