//! # Error Types
//!
//! Error types for the pure parts of sqlhandle.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sqlhandle-core errors (this file)                                     │
//! │  └── DsnError     - Connection string cannot be parsed                 │
//! │                                                                         │
//! │  sqlhandle-db errors (separate crate)                                  │
//! │  ├── DbError      - Connect / disconnect failures                      │
//! │  └── ConfigError  - Bad environment values                             │
//! │                                                                         │
//! │  Flow: DsnError → DbError::ConnectionFailed → caller                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Escaping and sanitization never fail, so they have no error type.

use thiserror::Error;

/// Connection string errors.
///
/// Raised by [`Dsn::parse`](crate::dsn::Dsn::parse) and by
/// [`Dsn::host_and_port`](crate::dsn::Dsn::host_and_port).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DsnError {
    /// No `/` separating the address from the database name.
    #[error("DSN is missing the '/' before the database name")]
    MissingDatabaseSeparator,

    /// No `@` separating credentials from the address.
    #[error("DSN is missing the '@' after the credentials")]
    MissingCredentials,

    /// The address is not wrapped as `proto(addr)`.
    #[error("DSN address must look like tcp(host), got '{0}'")]
    MalformedAddress(String),

    /// Only `tcp` is supported.
    #[error("Unsupported DSN protocol: {0}")]
    UnsupportedProtocol(String),

    /// The port after `host:` is not a valid u16.
    ///
    /// ## When This Occurs
    /// - `localhost:abc`
    /// - `localhost:70000`
    /// - `localhost:` (empty port)
    #[error("Invalid port in host '{host}'")]
    InvalidPort { host: String },
}
