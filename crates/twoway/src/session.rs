#![forbid(unsafe_code)]

//! Owning the terminal while the list screen runs.
//!
//! A [`TerminalSession`] switches on the [`Mode`]s the options ask for and
//! remembers each one once it is active. Dropping the session, on a normal
//! return or while a panic unwinds, switches them off again last-first and
//! flushes stdout. If switching a mode on fails, the modes already active
//! are switched off before the error is returned.

use std::io::{self, Write};

use crossterm::event::Event;

/// Which optional terminal modes a session enables. Both default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Draw on the alternate screen so the shell's scrollback is untouched.
    pub alternate_screen: bool,
    /// Report mouse clicks.
    pub mouse_capture: bool,
}

/// One piece of terminal state a session changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Raw,
    AlternateScreen,
    MouseCapture,
    HiddenCursor,
}

impl Mode {
    /// Modes to switch on for `options`, in switch-on order.
    #[must_use]
    pub fn plan(options: SessionOptions) -> Vec<Self> {
        let mut modes = vec![Self::Raw];
        if options.alternate_screen {
            modes.push(Self::AlternateScreen);
        }
        if options.mouse_capture {
            modes.push(Self::MouseCapture);
        }
        modes.push(Self::HiddenCursor);
        modes
    }

    fn enable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Raw => crossterm::terminal::enable_raw_mode(),
            Self::AlternateScreen => {
                crossterm::execute!(out, crossterm::terminal::EnterAlternateScreen)
            }
            Self::MouseCapture => crossterm::execute!(out, crossterm::event::EnableMouseCapture),
            Self::HiddenCursor => crossterm::execute!(out, crossterm::cursor::Hide),
        }
    }

    fn disable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Raw => crossterm::terminal::disable_raw_mode(),
            Self::AlternateScreen => {
                crossterm::execute!(out, crossterm::terminal::LeaveAlternateScreen)
            }
            Self::MouseCapture => crossterm::execute!(out, crossterm::event::DisableMouseCapture),
            Self::HiddenCursor => crossterm::execute!(out, crossterm::cursor::Show),
        }
    }
}

/// Holds the terminal in the list screen's modes until dropped.
///
/// Only one session should exist at a time.
#[derive(Debug)]
pub struct TerminalSession {
    active: Vec<Mode>,
}

impl TerminalSession {
    /// Switch on every mode [`Mode::plan`] lists for `options`.
    ///
    /// # Errors
    ///
    /// Returns the first error from switching a mode on.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        let mut session = Self { active: Vec::new() };
        let mut stdout = io::stdout();
        for mode in Mode::plan(options) {
            // On error `session` drops here and unwinds what is active.
            mode.enable(&mut stdout)?;
            session.active.push(mode);
        }
        tracing::debug!(?options, "terminal session started");
        Ok(session)
    }

    /// Current terminal size (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Block until the next terminal event.
    pub fn read_event(&self) -> io::Result<Event> {
        crossterm::event::read()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        while let Some(mode) = self.active.pop() {
            if let Err(error) = mode.disable(&mut stdout) {
                tracing::warn!(?mode, %error, "terminal mode not restored");
            }
        }
        let _ = stdout.flush();
        tracing::debug!("terminal session restored");
    }
}
