//! devtrack-tui: terminal panels and the interactive `devtrack` binary.
//!
//! Each panel owns its view state (expand flag, input handling) and renders
//! to plain text lines; the app shell wires the panels to one file store and
//! one change bus. Layout and styling stay out of the panels: the binary
//! just prints the rendered lines in order.

pub mod app;
pub mod log_panel;
pub mod plans_panel;
pub mod prompt;
pub mod stats_panel;
