#![forbid(unsafe_code)]

//! Terminal front end for the twoway to-do list.
//!
//! [`run`] owns the event loop: one terminal event becomes one [`Msg`], the
//! [`TodoApp`] applies it, and the [`Painter`] repaints whatever the rows'
//! bindings marked dirty. Everything happens on the calling thread.

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;
pub mod paint;
pub mod session;
pub mod view;

use std::io;

use twoway_core::{AppConfig, TodoListController};

pub use app::{Damage, Flow, Msg, TodoApp};
pub use cli::Cli;
pub use error::AppError;
pub use paint::Painter;
pub use session::{SessionOptions, TerminalSession};

/// Run the list screen until the user quits.
///
/// # Errors
///
/// Returns [`AppError::Io`] if the terminal cannot be set up, read, or drawn.
pub fn run(config: &AppConfig) -> Result<(), AppError> {
    let session = TerminalSession::new(SessionOptions {
        alternate_screen: config.alternate_screen,
        mouse_capture: config.mouse,
    })?;
    let (width, height) = session.size()?;
    tracing::info!(width, height, color = %config.color, "starting");

    let mut app = TodoApp::new(TodoListController::with_seed(), width, height);
    let mut painter = Painter::new(io::stdout(), config.color);
    painter.paint(&mut app)?;

    loop {
        let msg = Msg::from(session.read_event()?);
        if app.update(msg) == Flow::Quit {
            break;
        }
        painter.paint(&mut app)?;
    }

    tracing::info!(
        completed = app.list().completed_count(),
        total = app.list().row_count(),
        "stopped"
    );
    Ok(())
}
