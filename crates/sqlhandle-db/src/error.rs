//! # Database Error Types
//!
//! Error types for descriptor operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  DsnError (bad port)         sqlx::Error (ping failed)                 │
//! │       │                             │                                   │
//! │       └──────────────┬──────────────┘                                   │
//! │                      ▼                                                  │
//! │  DbError (this module) ← ConnectionFailed carries the cause            │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  Caller decides: report, fix config, try again                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlhandle_core::DsnError;
use thiserror::Error;

/// Descriptor operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The driver could not construct or verify the connection.
    ///
    /// ## When This Occurs
    /// - Host carries a non-numeric or out-of-range port
    /// - `verify_on_connect` is set and the server is unreachable
    /// - `verify_on_connect` is set and the credentials are rejected
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// `disconnect` (or a ping) was called with no live connection.
    ///
    /// Also what a second `disconnect` in a row reports.
    #[error("Not connected")]
    NotConnected,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl From<DsnError> for DbError {
    fn from(err: DsnError) -> Self {
        DbError::ConnectionFailed(err.to_string())
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Configuration  → DbError::ConnectionFailed
/// sqlx::Error::Io / Tls       → DbError::ConnectionFailed
/// sqlx::Error::Database       → DbError::ConnectionFailed (auth, unknown db)
/// sqlx::Error::PoolTimedOut   → DbError::ConnectionFailed
/// sqlx::Error::PoolClosed     → DbError::NotConnected
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Database(_)
            | sqlx::Error::PoolTimedOut => DbError::ConnectionFailed(err.to_string()),

            sqlx::Error::PoolClosed => DbError::NotConnected,

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for descriptor operations.
pub type DbResult<T> = Result<T, DbError>;
