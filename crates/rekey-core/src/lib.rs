#![forbid(unsafe_code)]

//! Terminal lifecycle and canonical input events for rekey.
//!
//! This crate owns the two seams every other layer builds on: the
//! [`event`] module's backend-independent input types, and the
//! [`terminal_session`] RAII guard that puts the terminal into raw mode and
//! guarantees it is restored on every exit path.

pub mod event;
pub mod geometry;
pub mod terminal_session;
