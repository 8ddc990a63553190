//! Catalog connection configuration.
//!
//! This module provides the `ConnectionConfig` struct for configuring
//! catalog connections with read-only defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Default MySQL port
pub const DEFAULT_PORT: u16 = 3306;

/// Configuration for catalog connections.
///
/// # Security
/// This struct intentionally does NOT store passwords or usernames.
/// Those live in [`super::Credentials`] and are never logged.
///
/// # Example
/// ```rust
/// use tsdump_core::ConnectionConfig;
///
/// let config = ConnectionConfig::new("db.internal".to_string()).with_port(3307);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Server host address
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Unix socket path; takes precedence over host and port when set
    pub socket: Option<PathBuf>,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// Per-statement execution limit
    pub query_timeout: Duration,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Whether sessions are switched to read-only transactions
    pub read_only: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            socket: None,
            connect_timeout: Duration::from_secs(30),
            query_timeout: Duration::from_secs(30),
            max_connections: 1,
            read_only: true,
        }
    }
}

impl std::fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.socket {
            Some(socket) => write!(f, "ConnectionConfig(unix:{})", socket.display()),
            None => write!(f, "ConnectionConfig({}:{})", self.host, self.port),
        }
    }
}

impl ConnectionConfig {
    /// Validates connection configuration parameters.
    ///
    /// # Errors
    /// Returns error if configuration values are invalid or unsafe
    pub fn validate(&self) -> crate::Result<()> {
        if self.socket.is_none() && self.host.trim().is_empty() {
            return Err(crate::error::TsdumpError::configuration(
                "host cannot be empty",
            ));
        }

        if self.port == 0 {
            return Err(crate::error::TsdumpError::configuration(
                "port must be greater than 0",
            ));
        }

        if let Some(socket) = &self.socket
            && socket.as_os_str().is_empty()
        {
            return Err(crate::error::TsdumpError::configuration(
                "socket path cannot be empty",
            ));
        }

        if self.max_connections == 0 {
            return Err(crate::error::TsdumpError::configuration(
                "max_connections must be greater than 0",
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(crate::error::TsdumpError::configuration(
                "connect_timeout must be greater than 0",
            ));
        }

        if self.query_timeout.is_zero() {
            return Err(crate::error::TsdumpError::configuration(
                "query_timeout must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Creates a new connection config with read-only defaults.
    pub fn new(host: String) -> Self {
        Self {
            host,
            ..Default::default()
        }
    }

    /// Builder method to set port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder method to connect through a unix socket.
    pub fn with_socket(mut self, socket: PathBuf) -> Self {
        self.socket = Some(socket);
        self
    }
}
