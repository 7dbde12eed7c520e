#![forbid(unsafe_code)]

//! Cell grid and terminal presenter for rekey.
//!
//! Widgets render into a [`buffer::Buffer`] of [`cell::Cell`]s; the
//! [`presenter`] writes a finished buffer to the terminal. The form is a
//! single small screen, so presentation is a full repaint per frame rather
//! than a damage diff.

pub mod buffer;
pub mod cell;
pub mod presenter;
pub mod style;

pub use buffer::Buffer;
pub use cell::{Cell, Rgba, StyleFlags};
pub use style::Style;
