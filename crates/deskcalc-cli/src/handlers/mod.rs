//! Command handlers
//!
//! The non-interactive handlers return their output as a string so `main`
//! owns stdout and tests can check the text directly.

pub mod calc;
pub mod info;
pub mod tui;
