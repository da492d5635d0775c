//! # Sanitization Pipelines
//!
//! Fixed, ordered chains of the escapers in [`crate::escape`].
//!
//! ## Inbound Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  input (shown literally):   "  <i>a\b</i>  "                            │
//! │       │                                                                 │
//! │       ▼  1. trim                                                        │
//! │  <i>a\b</i>                                                             │
//! │       │                                                                 │
//! │       ▼  2. double backslashes                                          │
//! │  <i>a\\b</i>                                                            │
//! │       │                                                                 │
//! │       ▼  3. HTML escape                                                 │
//! │  &lt;i&gt;a\\b&lt;/i&gt;                                                  │
//! │       │                                                                 │
//! │       ▼  4. MySQL escape (only with a live connection)                  │
//! │  &lt;i&gt;a\\\\b&lt;/i&gt;                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Step 4 runs AFTER HTML escaping, and step 2 already doubled every
//! backslash, so with a live connection backslashes end up quadrupled.
//! The order is part of the contract: callers depend on the exact output.
//! Do not reorder.

use crate::escape::{escape_backslashes, escape_mysql, html_escape, EscapeMode};

/// Sanitizes user input before it is placed in a query.
///
/// `driver` is the escape mode of the live connection, or `None` when the
/// descriptor is disconnected (step 4 is then skipped).
///
/// ## Example
/// ```rust
/// use sqlhandle_core::sanitize::sanitize_input;
/// use sqlhandle_core::EscapeMode;
///
/// assert_eq!(sanitize_input("  a\\b  ", None), "a\\\\b");
/// assert_eq!(sanitize_input("O'Brien", None), "O&#x27;Brien");
/// assert_eq!(sanitize_input("x\ny", Some(EscapeMode::Backslash)), "x\\ny");
/// ```
pub fn sanitize_input(data: &str, driver: Option<EscapeMode>) -> String {
    let data = data.trim();
    let data = escape_backslashes(data);
    let data = html_escape(&data);

    match driver {
        Some(mode) => escape_mysql(&data, mode),
        None => data,
    }
}

/// Sanitizes text destined for an HTML page.
pub fn sanitize_output(data: &str) -> String {
    html_escape(data)
}

// =============================================================================
// Unit Tests
// =============================================================================
