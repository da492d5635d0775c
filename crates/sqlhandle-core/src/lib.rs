//! # sqlhandle-core: Pure Logic for the Connection Descriptor
//!
//! This crate holds everything the descriptor does that does not touch the
//! network: building the connection string and escaping text.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        sqlhandle Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Application code                             │   │
//! │  │       builds queries from sanitized text, renders output        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 sqlhandle-db (Database)                         │   │
//! │  │        connect / disconnect / sanitize_input / output           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sqlhandle-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │    dsn    │  │  escape   │  │ sanitize  │                  │   │
//! │  │   │    Dsn    │  │   html    │  │  input    │                  │   │
//! │  │   │  parsing  │  │   mysql   │  │  output   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`dsn`] - Connection string model (`user:password@tcp(host)/dbname`)
//! - [`escape`] - HTML, backslash and MySQL string escapers
//! - [`sanitize`] - The fixed inbound/outbound sanitization pipelines
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use sqlhandle_core::sanitize::{sanitize_input, sanitize_output};
//!
//! // Disconnected: no driver-level escaping step
//! assert_eq!(sanitize_input("  <script>  ", None), "&lt;script&gt;");
//! assert_eq!(sanitize_output("<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dsn;
pub mod error;
pub mod escape;
pub mod sanitize;

// =============================================================================
// Re-exports
// =============================================================================

pub use dsn::Dsn;
pub use error::DsnError;
pub use escape::EscapeMode;

// =============================================================================
// Constants
// =============================================================================

/// Port the MySQL server listens on when the host carries no `:port`.
pub const DEFAULT_PORT: u16 = 3306;

/// Host used when the descriptor's host field is empty.
///
/// The Go-style DSN `user:pass@tcp()/db` means "local server".
pub const DEFAULT_HOST: &str = "127.0.0.1";
