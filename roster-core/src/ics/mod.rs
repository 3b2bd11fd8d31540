//! iCalendar feed generation.
//!
//! This module renders roster days as an RFC 5545 document.

mod generate;

pub use generate::{CRLF, fold_line, generate_ics, normalize_line_endings};
