//! MySQL catalog repository backed by `information_schema`.
//!
//! # Module Structure
//! - `connection`: Pool construction and session setup
//! - `catalog`: Database, table and column queries
//!
//! # Security Guarantees
//! - All operations are read-only (SELECT only)
//! - Sessions run in READ ONLY transaction mode
//! - Statement execution time is capped per session

pub mod catalog;
pub mod connection;

use super::{ConnectionConfig, DatabaseFilter, Repository, TableFilter};
use crate::Result;
use crate::models::{Database, Table};
use async_trait::async_trait;
use sqlx::MySqlPool;

/// MySQL repository over a lazily connected pool.
pub struct MySqlRepository {
    /// Connection pool for catalog queries
    pub pool: MySqlPool,
    /// Connection configuration (no credentials)
    pub config: ConnectionConfig,
}

impl std::fmt::Debug for MySqlRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlRepository")
            .field("config", &self.config)
            .field("pool_size", &self.pool.size())
            .field("pool_idle", &self.pool.num_idle())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn list_databases(
        &self,
        filter: Option<&DatabaseFilter>,
        include_tables: bool,
    ) -> Result<Vec<Database>> {
        let mut databases = catalog::fetch_databases(&self.pool, filter).await?;

        if include_tables {
            for database in &mut databases {
                database.tables =
                    catalog::fetch_tables(&self.pool, &TableFilter::all_in(&database.name))
                        .await?;
            }
        }

        Ok(databases)
    }

    async fn list_tables(&self, filter: &TableFilter) -> Result<Vec<Table>> {
        catalog::fetch_tables(&self.pool, filter).await
    }
}
