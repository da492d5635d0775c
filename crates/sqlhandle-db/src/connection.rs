//! # Driver Handle
//!
//! The live connection object a [`Database`](crate::Database) owns between
//! `connect` and `disconnect`.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Driver Handle Lifecycle                            │
//! │                                                                         │
//! │  DriverHandle::open(dsn, settings)                                     │
//! │       │   builds MySqlConnectOptions from the DSN                      │
//! │       │   no socket yet (lazy, like database/sql Open)                 │
//! │       │   verify_on_connect: one dial + ping + hang up, no retry       │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │  MySqlPool (max_connections = 1)        │                           │
//! │  │  ┌───────┐                              │                           │
//! │  │  │ Conn  │ ← dialed on first ping/use   │                           │
//! │  │  └───────┘                              │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DriverHandle::close(self) ← consumes the handle, closes the socket    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pool is capped at one connection and never grows: it is only the
//! sqlx vehicle for a lazily dialed single connection.

use sqlhandle_core::escape::escape_mysql;
use sqlhandle_core::{Dsn, EscapeMode};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::{ConnectOptions, Connection};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::ConnectSettings;
use crate::error::{DbError, DbResult};

/// An open MySQL connection plus the escaping rule that goes with it.
#[derive(Debug)]
pub struct DriverHandle {
    pool: MySqlPool,
    escape_mode: EscapeMode,
}

impl DriverHandle {
    /// Opens a handle for `dsn`.
    ///
    /// ## Errors
    /// - `DbError::ConnectionFailed` if the host's port is malformed
    /// - `DbError::ConnectionFailed` if `verify_on_connect` is set and the
    ///   single verification dial fails, carrying the driver's cause
    ///   (e.g. connection refused), or does not finish in `connect_timeout`
    pub async fn open(dsn: &Dsn, settings: &ConnectSettings) -> DbResult<Self> {
        let (host, port) = dsn.host_and_port()?;

        let mut options = MySqlConnectOptions::new()
            .host(&host)
            .port(port)
            .username(&dsn.user);

        if !dsn.password.is_empty() {
            options = options.password(&dsn.password);
        }
        if !dsn.database.is_empty() {
            options = options.database(&dsn.database);
        }

        if settings.verify_on_connect {
            if let Err(err) = verify(&options, settings.connect_timeout).await {
                warn!(error = %err, "Connection verification failed");
                return Err(err);
            }
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .min_connections(0)
            .acquire_timeout(settings.connect_timeout)
            .connect_lazy_with(options);

        debug!(host = %host, port, "Driver handle created");

        Ok(DriverHandle {
            pool,
            escape_mode: settings.escape_mode,
        })
    }

    /// Round-trips a ping to the server, dialing the connection if needed.
    pub async fn ping(&self) -> DbResult<()> {
        let mut conn = self.pool.acquire().await?;
        conn.ping().await?;
        Ok(())
    }

    /// The driver's native string escaping for this connection.
    pub fn escape(&self, data: &str) -> String {
        escape_mysql(data, self.escape_mode)
    }

    pub fn escape_mode(&self) -> EscapeMode {
        self.escape_mode
    }

    /// Closes the connection. Waits for an in-flight use to finish.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Dials once, pings, and hangs up.
///
/// Goes around the pool on purpose: `acquire` keeps redialing until its
/// timeout and then reports `PoolTimedOut` instead of the real cause.
async fn verify(options: &MySqlConnectOptions, limit: Duration) -> DbResult<()> {
    let dial = async {
        let mut conn = options.connect().await?;
        conn.ping().await?;
        conn.close().await
    };

    match timeout(limit, dial).await {
        Ok(result) => result.map_err(DbError::from),
        Err(_) => Err(DbError::ConnectionFailed(format!(
            "no answer within {}s",
            limit.as_secs_f64()
        ))),
    }
}
