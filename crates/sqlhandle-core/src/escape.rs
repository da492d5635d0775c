//! # Escapers
//!
//! The three string transforms the sanitization pipeline is built from.
//!
//! | Function              | Neutralizes                         |
//! |-----------------------|-------------------------------------|
//! | [`html_escape`]       | `&` `<` `>` `"` `'`                 |
//! | [`escape_backslashes`]| `\`                                 |
//! | [`escape_mysql`]      | `\0` `\n` `\r` `\` `'` `"` `\x1a`   |

use serde::{Deserialize, Serialize};

/// How the MySQL server interprets backslashes in string literals.
///
/// Mirrors the server's `NO_BACKSLASH_ESCAPES` SQL mode, which changes what
/// the client library's `real_escape_string` emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeMode {
    /// Default server mode: special characters get a `\` prefix.
    #[default]
    Backslash,
    /// `NO_BACKSLASH_ESCAPES`: only `'` needs escaping, by doubling it.
    NoBackslashEscapes,
}

/// Encodes text for safe embedding in HTML, including quoted attributes.
///
/// ## Example
/// ```rust
/// use sqlhandle_core::escape::html_escape;
///
/// assert_eq!(html_escape("<b>\"x\" & 'y'</b>"),
///            "&lt;b&gt;&quot;x&quot; &amp; &#x27;y&#x27;&lt;/b&gt;");
/// ```
pub fn html_escape(data: &str) -> String {
    ::html_escape::encode_quoted_attribute(data).into_owned()
}

/// Doubles every backslash.
pub fn escape_backslashes(data: &str) -> String {
    data.replace('\\', "\\\\")
}

/// Escapes a string for inclusion inside a quoted MySQL literal.
///
/// Same output as the C client's `mysql_real_escape_string` for single-byte
/// safe charsets (utf8mb4 included).
///
/// ## Backslash Mode
/// ```text
/// NUL → \0       LF → \n       CR → \r
/// \   → \\       '  → \'       "  → \"
/// ^Z  → \Z
/// ```
///
/// ## NoBackslashEscapes Mode
/// ```text
/// '   → ''       (everything else passes through)
/// ```
pub fn escape_mysql(data: &str, mode: EscapeMode) -> String {
    let mut out = String::with_capacity(data.len() + data.len() / 8);

    match mode {
        EscapeMode::Backslash => {
            for c in data.chars() {
                match c {
                    '\0' => out.push_str("\\0"),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\\' => out.push_str("\\\\"),
                    '\'' => out.push_str("\\'"),
                    '"' => out.push_str("\\\""),
                    '\x1a' => out.push_str("\\Z"),
                    _ => out.push(c),
                }
            }
        }
        EscapeMode::NoBackslashEscapes => {
            for c in data.chars() {
                if c == '\'' {
                    out.push_str("''");
                } else {
                    out.push(c);
                }
            }
        }
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================
