//! MySQL connection pool management and validation.
//!
//! # Security Features
//! - Validates connection parameters before any network activity
//! - Switches every pooled session to READ ONLY transactions
//! - Sets statement timeouts for all catalog queries

use super::{ConnectionConfig, MySqlRepository};
use crate::Result;
use crate::repository::Credentials;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};

impl MySqlRepository {
    /// Creates a repository with a lazily connected pool.
    ///
    /// No connection is opened here; the first catalog query (or
    /// [`MySqlRepository::test_connection`]) establishes it.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid
    pub fn connect(config: ConnectionConfig, credentials: &Credentials) -> Result<Self> {
        config.validate()?;

        let options = connect_options(&config, credentials);
        let pool = create_mysql_connection_pool(options, &config);

        tracing::debug!("Configured catalog pool for {}", config);

        Ok(Self { pool, config })
    }

    /// Verifies the server is reachable and `information_schema` is readable.
    ///
    /// # Errors
    /// Returns a connection error if the server rejects the login or the
    /// catalog is not accessible
    pub async fn test_connection(&self) -> Result<()> {
        let connectivity: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                crate::error::TsdumpError::connection_failed(
                    format!("Cannot reach {}", self.config),
                    e,
                )
            })?;

        if connectivity != 1 {
            return Err(crate::error::TsdumpError::configuration(
                "Basic connectivity test failed: unexpected result",
            ));
        }

        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM information_schema.SCHEMATA")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                crate::error::TsdumpError::connection_failed(
                    "Cannot access information_schema",
                    e,
                )
            })?;

        Ok(())
    }

    /// Closes the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Builds driver connect options from the configuration and credentials.
pub fn connect_options(config: &ConnectionConfig, credentials: &Credentials) -> MySqlConnectOptions {
    let mut options = MySqlConnectOptions::new()
        .username(credentials.username())
        .database("information_schema");

    options = match &config.socket {
        Some(socket) => options.socket(socket),
        None => options.host(&config.host).port(config.port),
    };

    if let Some(password) = credentials.password() {
        options = options.password(password);
    }

    options
}

/// Creates a MySQL connection pool with proper configuration
///
/// # Security Features
/// - Enforces connection limits
/// - Sets appropriate timeouts
/// - Validates connections before use
fn create_mysql_connection_pool(
    options: MySqlConnectOptions,
    config: &ConnectionConfig,
) -> sqlx::MySqlPool {
    use sqlx::Executor;

    let query_timeout_ms = config.query_timeout.as_millis();
    let read_only = config.read_only;

    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
        .test_before_acquire(true)
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                conn.execute(format!("SET SESSION max_execution_time = {query_timeout_ms}").as_str())
                    .await?;

                if read_only {
                    conn.execute("SET SESSION TRANSACTION READ ONLY").await?;
                }

                Ok(())
            })
        })
        .connect_lazy_with(options)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_connect_options_tcp() {
        let config = ConnectionConfig::new("db.internal".to_string()).with_port(3307);
        let creds = Credentials::new("reader".to_string(), Some("pw".to_string()));

        let options = connect_options(&config, &creds);
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 3307);
        assert_eq!(options.get_username(), "reader");
        assert_eq!(options.get_database(), Some("information_schema"));
    }

    #[test]
    fn test_connect_options_socket() {
        let config = ConnectionConfig::default().with_socket(PathBuf::from("/tmp/mysql.sock"));
        let creds = Credentials::new("root".to_string(), None);

        let options = connect_options(&config, &creds);
        assert_eq!(
            options.get_socket(),
            Some(&PathBuf::from("/tmp/mysql.sock"))
        );
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_config() {
        let config = ConnectionConfig::default().with_port(0);
        let creds = Credentials::new("root".to_string(), None);

        let result = MySqlRepository::connect(config, &creds);
        assert!(matches!(
            result,
            Err(crate::TsdumpError::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn test_connection_test_fails_gracefully() {
        let config = ConnectionConfig::new("127.0.0.1".to_string()).with_port(9);
        let config = ConnectionConfig {
            connect_timeout: std::time::Duration::from_secs(2),
            ..config
        };
        let creds = Credentials::new("invalid".to_string(), Some("invalid".to_string()));

        let repo = MySqlRepository::connect(config, &creds).unwrap();
        let result = repo.test_connection().await;
        assert!(matches!(
            result,
            Err(crate::TsdumpError::Connection { .. })
        ));
    }
}
