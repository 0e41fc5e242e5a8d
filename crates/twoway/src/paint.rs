#![forbid(unsafe_code)]

//! Writes damaged screen lines to the terminal with crossterm.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, ContentStyle, PrintStyledContent, StyledContent};
use crossterm::terminal::{Clear, ClearType};
use twoway_style::{Color, ColorProfile, Style, StyleFlags};

use crate::app::{Damage, TodoApp};

/// Paints a [`TodoApp`] into any writer.
#[derive(Debug)]
pub struct Painter<W: Write> {
    out: W,
    profile: ColorProfile,
}

impl<W: Write> Painter<W> {
    /// Paint into `out`, downgrading colors to `profile`.
    pub fn new(out: W, profile: ColorProfile) -> Self {
        Self { out, profile }
    }

    /// Give back the writer, e.g. to inspect captured output.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Repaint whatever the app reports as damaged. Returns the number of
    /// lines written.
    pub fn paint(&mut self, app: &mut TodoApp) -> io::Result<usize> {
        let lines: Vec<u16> = match app.take_damage() {
            Damage::Full => {
                queue!(self.out, Clear(ClearType::All))?;
                (0..app.height()).collect()
            }
            Damage::Lines(lines) => lines,
        };

        for &y in &lines {
            queue!(self.out, MoveTo(0, y), Clear(ClearType::CurrentLine))?;
            for span in app.line_at(y).spans {
                let styled = StyledContent::new(content_style(span.style, self.profile), span.text);
                queue!(self.out, PrintStyledContent(styled))?;
            }
        }
        self.out.flush()?;
        tracing::trace!(lines = lines.len(), "painted");
        Ok(lines.len())
    }
}

/// Translate a [`Style`] into crossterm's representation for `profile`.
#[must_use]
pub fn content_style(style: Style, profile: ColorProfile) -> ContentStyle {
    let style = style.for_profile(profile);
    let mut out = ContentStyle::new();
    out.foreground_color = style.fg.map(terminal_color);

    const ATTRS: [(StyleFlags, Attribute); 5] = [
        (StyleFlags::BOLD, Attribute::Bold),
        (StyleFlags::DIM, Attribute::Dim),
        (StyleFlags::ITALIC, Attribute::Italic),
        (StyleFlags::UNDERLINE, Attribute::Underlined),
        (StyleFlags::STRIKETHROUGH, Attribute::CrossedOut),
    ];
    for (flag, attr) in ATTRS {
        if style.has(flag) {
            out.attributes.set(attr);
        }
    }
    out
}

fn terminal_color(color: Color) -> crossterm::style::Color {
    match color {
        Color::Rgb(r, g, b) => crossterm::style::Color::Rgb { r, g, b },
        Color::Ansi16(c) => crossterm::style::Color::AnsiValue(c.code()),
    }
}
