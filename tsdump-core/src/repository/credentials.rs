//! Login credentials with automatic memory zeroing.
//!
//! # Security
//! - Username and password live in `Zeroizing<T>` containers
//! - Memory is cleared when the credentials go out of scope
//! - `Debug` output never includes the password

use zeroize::{Zeroize, Zeroizing};

/// Catalog login credentials.
///
/// # Example
///
/// ```rust
/// use tsdump_core::Credentials;
///
/// let creds = Credentials::new("root".to_string(), Some("secret".to_string()));
/// assert_eq!(creds.username(), "root");
/// assert!(creds.has_password());
/// assert!(!format!("{creds:?}").contains("secret"));
/// ```
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Credentials {
    username: Zeroizing<String>,
    password: Zeroizing<Option<String>>,
}

impl Credentials {
    /// Creates new credentials with automatic memory zeroing.
    pub fn new(username: String, password: Option<String>) -> Self {
        Self {
            username: Zeroizing::new(username),
            password: Zeroizing::new(password),
        }
    }

    /// Gets the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Gets the password, if one was supplied.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Checks if password is present without exposing it.
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username())
            .field("has_password", &self.has_password())
            .finish()
    }
}
