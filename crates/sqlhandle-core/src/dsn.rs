//! # Connection String Model
//!
//! The descriptor's four fields render into one connection string:
//!
//! ```text
//! user:password@tcp(host)/dbname
//! ─┬── ───┬──── ─┬─ ─┬──  ──┬───
//!  │      │      │   │      └── database name (may be empty)
//!  │      │      │   └── host or host:port (may be empty → 127.0.0.1:3306)
//!  │      │      └── protocol, always tcp
//!  │      └── password (never logged, see Dsn::redacted)
//!  └── user
//! ```
//!
//! This is the Go MySQL driver's DSN shape, kept byte-for-byte so the same
//! strings work against that driver family. The sqlx driver does not read
//! it directly; `sqlhandle-db` turns a [`Dsn`] into connect options.

use std::fmt;

use crate::error::DsnError;
use crate::{DEFAULT_HOST, DEFAULT_PORT};

/// A parsed or assembled connection string.
///
/// No field is validated: empty strings are carried through verbatim,
/// matching what the descriptor allows.
#[derive(Clone, PartialEq, Eq)]
pub struct Dsn {
    pub user: String,
    pub password: String,
    /// `host` or `host:port`. IPv6 literals use brackets: `[::1]:3306`.
    pub host: String,
    pub database: String,
}

impl Dsn {
    /// Assembles a DSN from the descriptor fields.
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Dsn {
            user: user.into(),
            password: password.into(),
            host: host.into(),
            database: database.into(),
        }
    }

    /// Parses `user:password@tcp(host)/dbname`.
    ///
    /// ## Parsing Rules
    /// - The database name is everything after the LAST `/`
    /// - Credentials end at the LAST `@`, so a password may contain `@`
    /// - The password starts after the FIRST `:` of the credentials
    /// - A password containing `/` cannot round-trip
    ///
    /// ## Example
    /// ```rust
    /// use sqlhandle_core::Dsn;
    ///
    /// let dsn = Dsn::parse("app:s3cret@tcp(db.internal:3307)/shop").unwrap();
    /// assert_eq!(dsn.user, "app");
    /// assert_eq!(dsn.host, "db.internal:3307");
    /// assert_eq!(dsn.to_string(), "app:s3cret@tcp(db.internal:3307)/shop");
    /// ```
    pub fn parse(s: &str) -> Result<Self, DsnError> {
        let (left, database) = s
            .rsplit_once('/')
            .ok_or(DsnError::MissingDatabaseSeparator)?;

        let (credentials, address) = left.rsplit_once('@').ok_or(DsnError::MissingCredentials)?;

        let (user, password) = credentials.split_once(':').unwrap_or((credentials, ""));

        let open = match address.find('(') {
            Some(idx) if address.ends_with(')') => idx,
            _ => return Err(DsnError::MalformedAddress(address.to_string())),
        };

        let protocol = &address[..open];
        if protocol != "tcp" {
            return Err(DsnError::UnsupportedProtocol(protocol.to_string()));
        }

        let host = &address[open + 1..address.len() - 1];

        Ok(Dsn::new(user, password, host, database))
    }

    /// Splits `host` into a hostname and a port.
    ///
    /// ## Rules
    /// - empty host → `127.0.0.1:3306`
    /// - `host` → port 3306
    /// - `host:port` → explicit port
    /// - `[v6]` / `[v6]:port` → bracketed IPv6
    /// - bare IPv6 (several colons, no brackets) → whole string is the host
    pub fn host_and_port(&self) -> Result<(String, u16), DsnError> {
        let host = self.host.as_str();

        if host.is_empty() {
            return Ok((DEFAULT_HOST.to_string(), DEFAULT_PORT));
        }

        if let Some(rest) = host.strip_prefix('[') {
            let (inner, after) = rest.split_once(']').ok_or_else(|| self.invalid_port())?;
            return match after {
                "" => Ok((inner.to_string(), DEFAULT_PORT)),
                _ => {
                    let port = after.strip_prefix(':').ok_or_else(|| self.invalid_port())?;
                    Ok((inner.to_string(), self.parse_port(port)?))
                }
            };
        }

        match host.matches(':').count() {
            0 => Ok((host.to_string(), DEFAULT_PORT)),
            1 => {
                // count == 1 guarantees the split
                let (name, port) = host.split_once(':').ok_or_else(|| self.invalid_port())?;
                Ok((name.to_string(), self.parse_port(port)?))
            }
            _ => Ok((host.to_string(), DEFAULT_PORT)),
        }
    }

    /// Renders the DSN with the password masked, for logs.
    pub fn redacted(&self) -> String {
        format!("{}:***@tcp({})/{}", self.user, self.host, self.database)
    }

    fn parse_port(&self, port: &str) -> Result<u16, DsnError> {
        port.parse::<u16>().map_err(|_| self.invalid_port())
    }

    fn invalid_port(&self) -> DsnError {
        DsnError::InvalidPort {
            host: self.host.clone(),
        }
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}@tcp({})/{}",
            self.user, self.password, self.host, self.database
        )
    }
}

// Debug must not leak the password.
impl fmt::Debug for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Dsn").field(&self.redacted()).finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let dsn = Dsn::new("user", "password", "localhost", "database");
        assert_eq!(dsn.to_string(), "user:password@tcp(localhost)/database");

        let dsn = Dsn::new("root", "", "10.0.0.5:3307", "orders");
        assert_eq!(dsn.to_string(), "root:@tcp(10.0.0.5:3307)/orders");

        // Empty fields are not validated
        let dsn = Dsn::new("", "", "", "");
        assert_eq!(dsn.to_string(), ":@tcp()/");
    }

    #[test]
    fn test_parse() {
        let dsn = Dsn::parse("user:password@tcp(localhost)/database").unwrap();
        assert_eq!(dsn, Dsn::new("user", "password", "localhost", "database"));

        // '@' and ':' inside the password
        let dsn = Dsn::parse("app:p@ss:word@tcp(db:3307)/shop").unwrap();
        assert_eq!(dsn.user, "app");
        assert_eq!(dsn.password, "p@ss:word");
        assert_eq!(dsn.host, "db:3307");
        assert_eq!(dsn.database, "shop");

        // No password
        let dsn = Dsn::parse("reader@tcp(localhost)/db").unwrap();
        assert_eq!(dsn.user, "reader");
        assert_eq!(dsn.password, "");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Dsn::parse("user:pw@tcp(localhost)"),
            Err(DsnError::MissingDatabaseSeparator)
        );
        assert_eq!(
            Dsn::parse("tcp(localhost)/db"),
            Err(DsnError::MissingCredentials)
        );
        assert_eq!(
            Dsn::parse("u:p@localhost/db"),
            Err(DsnError::MalformedAddress("localhost".to_string()))
        );
        assert_eq!(
            Dsn::parse("u:p@unix(/tmp/mysql.sock)/db"),
            Err(DsnError::UnsupportedProtocol("unix".to_string()))
        );
    }

    #[test]
    fn test_host_and_port() {
        let port_of = |host: &str| Dsn::new("u", "p", host, "d").host_and_port();

        assert_eq!(port_of(""), Ok(("127.0.0.1".to_string(), 3306)));
        assert_eq!(port_of("localhost"), Ok(("localhost".to_string(), 3306)));
        assert_eq!(port_of("db:3307"), Ok(("db".to_string(), 3307)));
        assert_eq!(port_of("[::1]"), Ok(("::1".to_string(), 3306)));
        assert_eq!(port_of("[::1]:3310"), Ok(("::1".to_string(), 3310)));
        assert_eq!(port_of("fe80::1"), Ok(("fe80::1".to_string(), 3306)));

        assert!(port_of("localhost:abc").is_err());
        assert!(port_of("localhost:70000").is_err());
        assert!(port_of("localhost:").is_err());
        assert!(port_of("[::1").is_err());
        assert!(port_of("[::1]3306").is_err());
    }

    #[test]
    fn test_password_never_rendered_by_debug() {
        let dsn = Dsn::new("user", "hunter2", "localhost", "db");
        assert_eq!(dsn.redacted(), "user:***@tcp(localhost)/db");
        assert!(!format!("{:?}", dsn).contains("hunter2"));
    }
}
