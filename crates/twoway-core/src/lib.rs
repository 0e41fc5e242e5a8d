#![forbid(unsafe_code)]

//! To-do model, bound list rows, and the list controller.
//!
//! # Overview
//!
//! - [`TodoItem`]: an immutable title plus an observable `completed` flag.
//! - [`TodoListController`]: owns the fixed item list, renders rows, and
//!   runs the "Complete All" bulk action.
//! - [`TodoRow`]: a live row whose toggle is two-way bound to its item.
//! - [`RowDisplay`]: the pure mapping from item state to display attributes.
//! - [`AppConfig`]: environment (and optionally file) configuration.
//!
//! # Example
//!
//! ```
//! use twoway_core::{Toggle, TodoListController};
//!
//! let list = TodoListController::with_seed();
//! let row = list.render_row(0);
//! assert_eq!(row.display().toggle, Toggle::Off);
//!
//! list.complete_all();
//! assert!(row.is_on());
//! assert!(row.display().is_struck_through());
//! ```

pub mod config;
pub mod controller;
pub mod item;
pub mod row;

pub use config::{AppConfig, ConfigError};
pub use controller::{SEED_TITLES, TodoListController};
pub use item::TodoItem;
pub use row::{RowDisplay, Theme, TodoRow, Toggle};
