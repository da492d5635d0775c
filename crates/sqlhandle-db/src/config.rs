//! # Descriptor Configuration
//!
//! Builder-style configuration for a [`Database`](crate::Database), plus
//! loading from environment variables for the `probe` binary.
//!
//! The library itself never reads the environment; only
//! [`DbConfig::from_env`] does, and only when called.
//!
//! ## Environment Variables
//! | Variable                          | Default     |
//! |-----------------------------------|-------------|
//! | `SQLHANDLE_HOST`                  | `localhost` |
//! | `SQLHANDLE_USER`                  | `user`      |
//! | `SQLHANDLE_PASSWORD`              | `password`  |
//! | `SQLHANDLE_DATABASE`              | `database`  |
//! | `SQLHANDLE_CONNECT_TIMEOUT_SECS`  | `30`        |
//! | `SQLHANDLE_VERIFY`                | `false`     |
//! | `SQLHANDLE_NO_BACKSLASH_ESCAPES`  | `false`     |

use serde::{Deserialize, Serialize};
use sqlhandle_core::EscapeMode;
use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_USER: &str = "user";
pub const DEFAULT_PASSWORD: &str = "password";
pub const DEFAULT_DATABASE: &str = "database";

// =============================================================================
// Connect Settings
// =============================================================================

/// How `connect` opens the handle. Independent of who/where to connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectSettings {
    /// Upper bound on establishing the physical connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Ping the server before `connect` reports success.
    /// Default: false (the handle opens lazily)
    pub verify_on_connect: bool,

    /// Driver-level escaping rule used by `sanitize_input`.
    /// Default: backslash escapes
    pub escape_mode: EscapeMode,
}

impl Default for ConnectSettings {
    fn default() -> Self {
        ConnectSettings {
            connect_timeout: Duration::from_secs(30),
            verify_on_connect: false,
            escape_mode: EscapeMode::Backslash,
        }
    }
}

// =============================================================================
// DbConfig
// =============================================================================

/// Descriptor configuration.
///
/// ## Example
/// ```rust
/// use sqlhandle_db::DbConfig;
///
/// let config = DbConfig::new()
///     .host("db.internal:3307")
///     .user("app")
///     .password("s3cret")
///     .database("shop")
///     .verify_on_connect(true);
///
/// assert_eq!(config.dsn().to_string(), "app:s3cret@tcp(db.internal:3307)/shop");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    /// Read from config files, never written back out.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub database: String,
    #[serde(default)]
    pub settings: ConnectSettings,
}

impl DbConfig {
    /// Creates a configuration with the default credentials
    /// (`user` / `password` on `localhost`, database `database`).
    pub fn new() -> Self {
        DbConfig {
            host: DEFAULT_HOST.to_string(),
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            settings: ConnectSettings::default(),
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.settings.connect_timeout = timeout;
        self
    }

    /// Sets whether `connect` pings the server before succeeding.
    pub fn verify_on_connect(mut self, verify: bool) -> Self {
        self.settings.verify_on_connect = verify;
        self
    }

    /// Selects the `NO_BACKSLASH_ESCAPES` escaping rule.
    pub fn no_backslash_escapes(mut self, enabled: bool) -> Self {
        self.settings.escape_mode = if enabled {
            EscapeMode::NoBackslashEscapes
        } else {
            EscapeMode::Backslash
        };
        self
    }

    /// The connection string these fields render to.
    pub fn dsn(&self) -> sqlhandle_core::Dsn {
        sqlhandle_core::Dsn::new(
            self.user.as_str(),
            self.password.as_str(),
            self.host.as_str(),
            self.database.as_str(),
        )
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset keys fall back to the defaults of [`DbConfig::new`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ConnectSettings::default();

        let connect_timeout = match lookup("SQLHANDLE_CONNECT_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse().map_err(|_| {
                ConfigError::InvalidValue("SQLHANDLE_CONNECT_TIMEOUT_SECS".to_string())
            })?),
            None => defaults.connect_timeout,
        };

        let config = DbConfig::new()
            .host(lookup("SQLHANDLE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()))
            .user(lookup("SQLHANDLE_USER").unwrap_or_else(|| DEFAULT_USER.to_string()))
            .password(lookup("SQLHANDLE_PASSWORD").unwrap_or_else(|| DEFAULT_PASSWORD.to_string()))
            .database(lookup("SQLHANDLE_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()))
            .connect_timeout(connect_timeout)
            .verify_on_connect(parse_flag(&lookup, "SQLHANDLE_VERIFY")?)
            .no_backslash_escapes(parse_flag(&lookup, "SQLHANDLE_NO_BACKSLASH_ESCAPES")?);

        Ok(config)
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("settings", &self.settings)
            .finish()
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(false),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::InvalidValue(key.to_string())),
        },
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DbConfig::default();

        assert_eq!(config.dsn().to_string(), "user:password@tcp(localhost)/database");
        assert_eq!(config.settings.connect_timeout, Duration::from_secs(30));
        assert!(!config.settings.verify_on_connect);
        assert_eq!(config.settings.escape_mode, EscapeMode::Backslash);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new()
            .connect_timeout(Duration::from_secs(5))
            .no_backslash_escapes(true);

        assert_eq!(config.settings.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.settings.escape_mode, EscapeMode::NoBackslashEscapes);
    }

    #[test]
    fn test_from_lookup() {
        let config = DbConfig::from_lookup(lookup_from(&[
            ("SQLHANDLE_HOST", "10.1.2.3:3307"),
            ("SQLHANDLE_USER", "report"),
            ("SQLHANDLE_PASSWORD", "pw"),
            ("SQLHANDLE_DATABASE", "analytics"),
            ("SQLHANDLE_CONNECT_TIMEOUT_SECS", "7"),
            ("SQLHANDLE_VERIFY", "yes"),
            ("SQLHANDLE_NO_BACKSLASH_ESCAPES", "1"),
        ]))
        .unwrap();

        assert_eq!(config.dsn().to_string(), "report:pw@tcp(10.1.2.3:3307)/analytics");
        assert_eq!(config.settings.connect_timeout, Duration::from_secs(7));
        assert!(config.settings.verify_on_connect);
        assert_eq!(config.settings.escape_mode, EscapeMode::NoBackslashEscapes);
    }

    #[test]
    fn test_from_lookup_empty_uses_defaults() {
        let config = DbConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, DbConfig::new());
    }

    #[test]
    fn test_from_lookup_invalid_values() {
        let err = DbConfig::from_lookup(lookup_from(&[("SQLHANDLE_CONNECT_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for SQLHANDLE_CONNECT_TIMEOUT_SECS");

        assert!(DbConfig::from_lookup(lookup_from(&[("SQLHANDLE_VERIFY", "maybe")])).is_err());
    }

    #[test]
    fn test_serialized_config_omits_password() {
        let config = DbConfig::new().password("hunter2");

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("\"password\""));

        let parsed: DbConfig = serde_json::from_str(
            r#"{"host":"db","user":"app","password":"pw","database":"shop"}"#,
        )
        .unwrap();
        assert_eq!(parsed.password, "pw");
        assert_eq!(parsed.settings, ConnectSettings::default());
    }

    #[test]
    fn test_debug_hides_password() {
        let config = DbConfig::new().password("hunter2");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
