//! Catalog access abstraction.
//!
//! The assembler only ever talks to a [`Repository`]; which engine answers
//! the queries is decided by whoever constructs the repository.
//!
//! # Module Structure
//! - `config`: Connection settings (no credentials)
//! - `credentials`: Username and password with memory zeroing
//! - `mysql`: `information_schema` backed implementation

use crate::Result;
use crate::models::{Database, Table};
use async_trait::async_trait;

pub mod config;
pub mod credentials;

#[cfg(feature = "mysql")]
pub mod mysql;

pub use config::ConnectionConfig;
pub use credentials::Credentials;

/// Selects a single database by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseFilter {
    pub name: String,
}

impl DatabaseFilter {
    /// Creates a filter matching the named database.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Selects tables of one database, optionally narrowed to a single name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFilter {
    pub db: String,
    pub name: Option<String>,
}

impl TableFilter {
    /// Matches every table of `db`.
    pub fn all_in(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            name: None,
        }
    }

    /// Matches the table `name` of `db`.
    pub fn named(db: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            name: Some(name.into()),
        }
    }
}

/// Read-only catalog queries the assembler depends on.
///
/// # Object Safety
/// This trait is object-safe, allowing for dynamic dispatch through
/// `&dyn Repository` or `Box<dyn Repository>`.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Lists databases.
    ///
    /// `None` returns every database, `Some(filter)` only the named one. With
    /// `include_tables` each database carries all of its tables (with
    /// columns); otherwise each is returned as a shell with no tables.
    ///
    /// # Errors
    /// Returns [`crate::TsdumpError::Repository`] if any catalog query fails
    async fn list_databases(
        &self,
        filter: Option<&DatabaseFilter>,
        include_tables: bool,
    ) -> Result<Vec<Database>>;

    /// Lists the tables matching `filter`, each with its columns populated.
    ///
    /// A filter naming one table normally yields zero or one table, but the
    /// catalog's collation may match more than one.
    ///
    /// # Errors
    /// Returns [`crate::TsdumpError::Repository`] if any catalog query fails
    async fn list_tables(&self, filter: &TableFilter) -> Result<Vec<Table>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_filter_constructors() {
        let filter = TableFilter::named("shop", "users");
        assert_eq!(filter.db, "shop");
        assert_eq!(filter.name.as_deref(), Some("users"));

        let filter = TableFilter::all_in("shop");
        assert_eq!(filter.name, None);
    }
}
