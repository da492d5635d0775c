//! # sqlhandle-db: Connection Descriptor
//!
//! A small descriptor around the sqlx MySQL driver: open a connection from
//! host / user / password / database name, close it, and sanitize text on
//! the way in and out.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        sqlhandle Data Flow                              │
//! │                                                                         │
//! │  Application                                                            │
//! │       │  fields / DbConfig                                              │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  sqlhandle-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ DriverHandle  │    │   DbConfig   │  │   │
//! │  │   │ (database.rs) │───►│(connection.rs)│    │ (config.rs)  │  │   │
//! │  │   │ MySqlDatabase │    │ MySqlPool (1) │    │  from_env    │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  └────────────────────────────────┼───────────────────────────────┘   │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     MySQL Server                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`database`] - The descriptor and its MySQL-named wrapper
//! - [`connection`] - The live driver handle
//! - [`config`] - Descriptor configuration and environment loading
//! - [`error`] - Error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sqlhandle_db::{Database, DbConfig};
//!
//! # async fn run() -> sqlhandle_db::DbResult<()> {
//! let mut db = Database::new(DbConfig::new().host("localhost").database("shop"));
//!
//! db.connect().await?;
//! let name = db.sanitize_input("  O'Brien  ");
//! db.disconnect().await?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod connection;
pub mod database;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, ConnectSettings, DbConfig};
pub use connection::DriverHandle;
pub use database::{Database, MySqlDatabase};
pub use error::{DbError, DbResult};
