//! # Connection Descriptor
//!
//! [`Database`] holds the connection parameters and, once connected, the
//! live driver handle. [`MySqlDatabase`] is the same descriptor under a
//! MySQL-specific name.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────────┐   connect() Ok    ┌──────────────┐                  │
//! │   │ Disconnected │ ────────────────► │  Connected   │                  │
//! │   │ handle: None │ ◄──────────────── │ handle: Some │                  │
//! │   └──────────────┘   disconnect() Ok └──────────────┘                  │
//! │          │                                   │                          │
//! │          │ disconnect()                      │ connect() again          │
//! │          ▼                                   ▼                          │
//! │   Err(NotConnected)                 new handle opened, old closed      │
//! │                                                                         │
//! │   connect() Err → state unchanged                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! One descriptor, one owner. State-changing calls take `&mut self` and the
//! descriptor is not `Clone`; sharing one across tasks is unsupported.

use std::fmt;
use std::ops::{Deref, DerefMut};

use sqlhandle_core::sanitize;
use sqlhandle_core::Dsn;
use tracing::{debug, info};

use crate::config::{ConnectSettings, DbConfig};
use crate::connection::DriverHandle;
use crate::error::{DbError, DbResult};

// =============================================================================
// Database
// =============================================================================

/// The connection descriptor.
///
/// Fields are public and unvalidated: assign them directly, then call
/// [`connect`](Database::connect).
///
/// ## Example
/// ```rust,no_run
/// use sqlhandle_db::Database;
///
/// # async fn run() -> sqlhandle_db::DbResult<()> {
/// let mut db = Database::default();
/// db.host = "localhost".to_string();
/// db.user = "user".to_string();
/// db.password = "password".to_string();
/// db.db_name = "database".to_string();
///
/// db.connect().await?;
/// let safe = db.sanitize_input("user' OR '1'='1");
/// db.disconnect().await?;
/// # Ok(())
/// # }
/// ```
pub struct Database {
    pub host: String,
    pub user: String,
    pub password: String,
    pub db_name: String,
    pub settings: ConnectSettings,
    connection: Option<DriverHandle>,
}

impl Database {
    /// Creates a disconnected descriptor from a configuration.
    pub fn new(config: DbConfig) -> Self {
        Database {
            host: config.host,
            user: config.user,
            password: config.password,
            db_name: config.database,
            settings: config.settings,
            connection: None,
        }
    }

    /// The connection string `user:password@tcp(host)/dbname`.
    pub fn dsn(&self) -> Dsn {
        Dsn::new(
            self.user.as_str(),
            self.password.as_str(),
            self.host.as_str(),
            self.db_name.as_str(),
        )
    }

    /// Opens the connection described by the current fields.
    ///
    /// ## What This Does
    /// 1. Builds the DSN from host / user / password / db_name
    /// 2. Opens a driver handle (lazy unless `verify_on_connect`)
    /// 3. Stores the handle, closing any handle it replaces
    ///
    /// ## Errors
    /// `DbError::ConnectionFailed` with the driver's reason. The descriptor
    /// is left exactly as it was (a previous handle stays open). Never
    /// retries.
    pub async fn connect(&mut self) -> DbResult<()> {
        let dsn = self.dsn();
        info!(dsn = %dsn.redacted(), "Opening database connection");

        let handle = DriverHandle::open(&dsn, &self.settings).await?;

        if let Some(previous) = self.connection.replace(handle) {
            debug!("Closing replaced connection");
            previous.close().await;
        }

        info!("Database connection opened");
        Ok(())
    }

    /// Closes the connection.
    ///
    /// ## Returns
    /// * `Ok(())` - A live handle was closed
    /// * `Err(DbError::NotConnected)` - There was nothing to close
    ///
    /// The handle is cleared, so calling this twice in a row yields
    /// `Ok(())` then `Err(NotConnected)`.
    pub async fn disconnect(&mut self) -> DbResult<()> {
        let handle = self.connection.take().ok_or(DbError::NotConnected)?;

        info!("Closing database connection");
        handle.close().await;

        Ok(())
    }

    /// Whether a handle is currently held.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// The live handle, if any.
    pub fn connection(&self) -> Option<&DriverHandle> {
        self.connection.as_ref()
    }

    /// Checks if the server answers a ping.
    ///
    /// ## Returns
    /// * `true` - Connected and responsive
    /// * `false` - Disconnected or unreachable
    pub async fn health_check(&self) -> bool {
        match &self.connection {
            Some(handle) => handle.ping().await.is_ok(),
            None => false,
        }
    }

    /// Sanitizes user input.
    ///
    /// Trim, double backslashes, HTML-escape, then (only when connected)
    /// the driver's string escaping. See [`sqlhandle_core::sanitize`].
    pub fn sanitize_input(&self, data: &str) -> String {
        // Steps 1-3 are connection independent
        let escaped = sanitize::sanitize_input(data, None);

        match &self.connection {
            Some(handle) => handle.escape(&escaped),
            None => escaped,
        }
    }

    /// Sanitizes text on its way to an HTML page.
    pub fn sanitize_output(&self, data: &str) -> String {
        sanitize::sanitize_output(data)
    }
}

impl Default for Database {
    /// `user` / `password` on `localhost`, database `database`.
    fn default() -> Self {
        Database::new(DbConfig::new())
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("dsn", &self.dsn().redacted())
            .field("settings", &self.settings)
            .field("connected", &self.is_connected())
            .finish()
    }
}

// =============================================================================
// MySqlDatabase
// =============================================================================

/// A descriptor for MySQL servers.
///
/// Carries every field and method of [`Database`] through `Deref`;
/// MySQL-only behavior goes here when there is some.
#[derive(Debug, Default)]
pub struct MySqlDatabase(Database);

impl MySqlDatabase {
    pub fn new(config: DbConfig) -> Self {
        MySqlDatabase(Database::new(config))
    }

    pub fn into_inner(self) -> Database {
        self.0
    }
}

impl From<Database> for MySqlDatabase {
    fn from(db: Database) -> Self {
        MySqlDatabase(db)
    }
}

impl Deref for MySqlDatabase {
    type Target = Database;

    fn deref(&self) -> &Database {
        &self.0
    }
}

impl DerefMut for MySqlDatabase {
    fn deref_mut(&mut self) -> &mut Database {
        &mut self.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sqlhandle_core::EscapeMode;
    use std::time::{Duration, Instant};

    fn descriptor() -> Database {
        let mut db = Database::default();
        db.host = "db.example.test:3306".to_string();
        db.user = "app".to_string();
        db.password = "s3cret".to_string();
        db.db_name = "shop".to_string();
        db
    }

    #[test]
    fn test_dsn_matches_fields() {
        let db = descriptor();
        assert_eq!(db.dsn().to_string(), "app:s3cret@tcp(db.example.test:3306)/shop");

        let db = Database::default();
        assert_eq!(db.dsn().to_string(), "user:password@tcp(localhost)/database");
    }

    #[tokio::test]
    async fn test_connect_then_disconnect() {
        let mut db = descriptor();
        assert!(!db.is_connected());

        db.connect().await.unwrap();
        assert!(db.is_connected());

        db.disconnect().await.unwrap();
        assert!(!db.is_connected());
    }

    #[tokio::test]
    async fn test_disconnect_without_connection() {
        let mut db = descriptor();
        assert!(matches!(db.disconnect().await, Err(DbError::NotConnected)));
    }

    #[tokio::test]
    async fn test_second_disconnect_reports_not_connected() {
        let mut db = descriptor();
        db.connect().await.unwrap();

        assert!(db.disconnect().await.is_ok());
        assert!(matches!(db.disconnect().await, Err(DbError::NotConnected)));
    }

    #[tokio::test]
    async fn test_connect_with_malformed_port_fails() {
        let mut db = descriptor();
        db.host = "localhost:not-a-port".to_string();

        let err = db.connect().await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
        assert!(!db.is_connected());
    }

    #[tokio::test]
    async fn test_refused_connection_fails_fast_with_cause() {
        let mut db = descriptor();
        db.host = "127.0.0.1:1".to_string();
        db.settings.verify_on_connect = true;
        db.settings.connect_timeout = Duration::from_secs(5);

        let started = Instant::now();
        let err = db.connect().await.unwrap_err();
        let elapsed = started.elapsed();

        // One dial, no redial loop until the timeout
        assert!(elapsed < Duration::from_secs(1), "took {:?}", elapsed);

        let message = err.to_string().to_lowercase();
        assert!(message.contains("refused"), "{}", message);
        assert!(!message.contains("pool timed out"), "{}", message);
        assert!(!db.is_connected());
    }

    #[tokio::test]
    async fn test_failed_connect_keeps_previous_handle() {
        let mut db = descriptor();
        db.connect().await.unwrap();

        db.host = "localhost:99999".to_string();
        assert!(db.connect().await.is_err());
        assert!(db.is_connected());

        db.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_reconnect_replaces_handle() {
        let mut db = descriptor();
        db.connect().await.unwrap();

        db.settings.escape_mode = EscapeMode::NoBackslashEscapes;
        db.connect().await.unwrap();

        let handle = db.connection().unwrap();
        assert_eq!(handle.escape_mode(), EscapeMode::NoBackslashEscapes);

        // Driver step now leaves newlines and backslashes alone
        assert_eq!(db.sanitize_input("x\ny"), "x\ny");
        assert_eq!(db.sanitize_input("a\\b"), "a\\\\b");

        db.disconnect().await.unwrap();
        assert!(matches!(db.disconnect().await, Err(DbError::NotConnected)));
    }

    #[tokio::test]
    async fn test_verify_on_connect_against_closed_port() {
        let mut db = descriptor();
        db.host = "127.0.0.1:1".to_string();
        db.settings.verify_on_connect = true;
        db.settings.connect_timeout = Duration::from_secs(2);

        let err = db.connect().await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
        assert!(!db.is_connected());
    }

    #[tokio::test]
    async fn test_health_check_when_disconnected() {
        let db = descriptor();
        assert!(!db.health_check().await);
    }

    #[test]
    fn test_sanitize_disconnected() {
        let db = descriptor();

        assert_eq!(db.sanitize_input("  a\\b  "), "a\\\\b");
        assert_eq!(db.sanitize_input("<script>"), "&lt;script&gt;");
        assert_eq!(db.sanitize_output("<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[tokio::test]
    async fn test_sanitize_connected_applies_driver_escaping() {
        let mut db = descriptor();
        db.connect().await.unwrap();

        assert_eq!(db.sanitize_input("  a\\b  "), "a\\\\\\\\b");
        assert_eq!(db.sanitize_input("line\nbreak"), "line\\nbreak");
        assert_eq!(db.sanitize_output("<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");

        db.disconnect().await.unwrap();
        assert_eq!(db.sanitize_input("  a\\b  "), "a\\\\b");
    }

    #[tokio::test]
    async fn test_mysql_database_forwards_everything() {
        let mut db = MySqlDatabase::default();
        db.host = "db.example.test".to_string();
        db.db_name = "inventory".to_string();

        assert_eq!(db.dsn().to_string(), "user:password@tcp(db.example.test)/inventory");

        db.connect().await.unwrap();
        assert!(db.is_connected());
        assert_eq!(db.sanitize_output("<i>"), "&lt;i&gt;");
        db.disconnect().await.unwrap();

        let inner = db.into_inner();
        assert_eq!(inner.db_name, "inventory");
    }

    #[test]
    fn test_debug_hides_password() {
        let db = descriptor();
        let rendered = format!("{:?}", db);

        assert!(rendered.contains("app:***@tcp(db.example.test:3306)/shop"));
        assert!(!rendered.contains("s3cret"));
    }
}
