//! Error types for tsdump operations.
//!
//! Every failure aborts the current invocation and is surfaced unchanged to
//! the caller; nothing here is retried. Messages never include passwords.

use std::path::PathBuf;
use thiserror::Error;

use crate::render::RenderError;

/// Main error type for tsdump operations.
#[derive(Debug, Error)]
pub enum TsdumpError {
    /// The caller broke an assembly precondition (a bug, not user input)
    #[error("Contract violation: {message}")]
    ContractViolation { message: String },

    /// Connecting to the catalog failed
    #[error("Database connection failed: {context}")]
    Connection {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A catalog query failed
    #[error("Catalog query failed: {context}")]
    Repository {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No renderer is registered under the requested name
    #[error("unsupported viewer: {name:?} (valid: {})", .available.join("|"))]
    UnsupportedViewer {
        name: String,
        available: Vec<String>,
    },

    /// The selected renderer failed while writing
    #[error("Rendering failed")]
    Render(#[from] RenderError),

    /// The output destination could not be created
    #[error("Failed to create output file {}", .path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience type alias for Results with TsdumpError
pub type Result<T> = std::result::Result<T, TsdumpError>;

impl TsdumpError {
    /// Creates a contract violation error
    pub fn contract_violation(message: impl Into<String>) -> Self {
        Self::ContractViolation {
            message: message.into(),
        }
    }

    /// Creates a connection error with sanitized context
    pub fn connection_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a catalog query error with context
    pub fn query_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Repository {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates an unsupported viewer error carrying the valid names
    pub fn unsupported_viewer<S: AsRef<str>>(name: impl Into<String>, available: &[S]) -> Self {
        Self::UnsupportedViewer {
            name: name.into(),
            available: available.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
