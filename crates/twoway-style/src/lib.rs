#![forbid(unsafe_code)]

//! Style types for twoway.
//!
//! This crate provides:
//! - [`Style`] for text styling with layered merging
//! - [`ColorProfile`] for color downgrade (TrueColor → 16 → mono)

pub mod color;
pub mod style;

pub use color::{Ansi16Color, Color, ColorProfile};
pub use style::{Style, StyleFlags};
