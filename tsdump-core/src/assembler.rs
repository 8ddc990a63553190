//! Decides which catalog queries to issue for a selection and composes the
//! results into a metadata tree.
//!
//! A selection is a database name plus optional table names. Exactly one of
//! three fetch plans applies:
//!
//! | database | tables | plan |
//! |----------|--------|------|
//! | empty | empty | every database, fully populated |
//! | named | empty | the named database, fully populated |
//! | named | named | database shell, then one table query per requested name |
//!
//! Table names without a database name are a caller bug and are rejected
//! before any query is made.

use crate::Result;
use crate::error::TsdumpError;
use crate::models::Database;
use crate::repository::{DatabaseFilter, Repository, TableFilter};

/// What the caller asked to dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every database in the catalog
    Catalog,
    /// One whole database
    Database(String),
    /// Specific tables of one database, in request order
    Tables { db: String, tables: Vec<String> },
}

impl Selection {
    /// Classifies a database name and table list.
    ///
    /// # Errors
    /// Returns [`TsdumpError::ContractViolation`] when table names are given
    /// without a database name
    pub fn new(db_name: &str, table_names: &[String]) -> Result<Self> {
        match (db_name.is_empty(), table_names.is_empty()) {
            (true, true) => Ok(Self::Catalog),
            (true, false) => Err(TsdumpError::contract_violation(format!(
                "{} table name(s) supplied without a database name",
                table_names.len()
            ))),
            (false, true) => Ok(Self::Database(db_name.to_string())),
            (false, false) => Ok(Self::Tables {
                db: db_name.to_string(),
                tables: table_names.to_vec(),
            }),
        }
    }
}

/// Builds the metadata tree for `db_name` and `table_names`.
///
/// Catalog calls are issued strictly one after another. A failing call
/// aborts the whole assembly; nothing accumulated so far is returned.
///
/// # Errors
/// - [`TsdumpError::ContractViolation`] if tables are named without a database
/// - Any repository error, unchanged
///
/// # Example
/// ```rust,no_run
/// use tsdump_core::{Repository, assemble};
///
/// # async fn example(repo: &dyn Repository) -> tsdump_core::Result<()> {
/// let tables = vec!["users".to_string(), "orders".to_string()];
/// let databases = assemble(repo, "shop", &tables).await?;
/// assert_eq!(databases[0].tables[0].name, "users");
/// # Ok(())
/// # }
/// ```
pub async fn assemble(
    repo: &dyn Repository,
    db_name: &str,
    table_names: &[String],
) -> Result<Vec<Database>> {
    let selection = Selection::new(db_name, table_names)?;
    assemble_selection(repo, &selection).await
}

/// Builds the metadata tree for an already classified selection.
///
/// # Errors
/// Returns any repository error unchanged
pub async fn assemble_selection(
    repo: &dyn Repository,
    selection: &Selection,
) -> Result<Vec<Database>> {
    match selection {
        Selection::Catalog => {
            tracing::debug!("Assembling full catalog");
            repo.list_databases(None, true).await
        }
        Selection::Database(db) => {
            tracing::debug!("Assembling database '{}'", db);
            repo.list_databases(Some(&DatabaseFilter::new(db)), true)
                .await
        }
        Selection::Tables { db, tables } => {
            tracing::debug!("Assembling {} table(s) of '{}'", tables.len(), db);
            let mut shells = repo
                .list_databases(Some(&DatabaseFilter::new(db)), false)
                .await?;

            for shell in &mut shells {
                for table_name in tables {
                    let found = repo
                        .list_tables(&TableFilter::named(&shell.name, table_name))
                        .await?;
                    if found.is_empty() {
                        tracing::debug!("No table '{}' in '{}'", table_name, shell.name);
                    }
                    shell.tables.extend(found);
                }
            }

            Ok(shells)
        }
    }
}
