//! `information_schema` queries for databases, tables and columns.
//!
//! Every identifier column is cast to CHAR because MySQL 8 reports several
//! `information_schema` columns as VARBINARY. No ORDER BY is applied to
//! databases or tables: callers get catalog-native order and sort on request.

use crate::Result;
use crate::error::TsdumpError;
use crate::models::{Column, ColumnKey, Database, Table};
use crate::repository::{DatabaseFilter, TableFilter};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

const DATABASES_QUERY: &str = r#"
    SELECT
        CAST(SCHEMA_NAME AS CHAR) AS SCHEMA_NAME,
        CAST(DEFAULT_CHARACTER_SET_NAME AS CHAR) AS CHARSET_NAME,
        CAST(DEFAULT_COLLATION_NAME AS CHAR) AS COLLATION_NAME
    FROM information_schema.SCHEMATA
"#;

const TABLES_QUERY: &str = r#"
    SELECT
        CAST(TABLE_NAME AS CHAR) AS TABLE_NAME,
        CAST(TABLE_COMMENT AS CHAR) AS TABLE_COMMENT
    FROM information_schema.TABLES
    WHERE TABLE_SCHEMA = ?
    AND TABLE_TYPE = 'BASE TABLE'
"#;

const COLUMNS_QUERY: &str = r#"
    SELECT
        CAST(COLUMN_NAME AS CHAR) AS COLUMN_NAME,
        CAST(COLUMN_TYPE AS CHAR) AS COLUMN_TYPE,
        CAST(IS_NULLABLE AS CHAR) AS IS_NULLABLE,
        CAST(COLUMN_KEY AS CHAR) AS COLUMN_KEY,
        CAST(COLUMN_DEFAULT AS CHAR) AS COLUMN_DEFAULT,
        CAST(ORDINAL_POSITION AS UNSIGNED) AS ORDINAL_POSITION,
        CAST(CHARACTER_SET_NAME AS CHAR) AS CHARSET_NAME,
        CAST(COLLATION_NAME AS CHAR) AS COLLATION_NAME,
        CAST(EXTRA AS CHAR) AS EXTRA,
        CAST(COLUMN_COMMENT AS CHAR) AS COLUMN_COMMENT
    FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = ?
    AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION
"#;

/// Extension trait for extracting typed values from catalog rows
/// with consistent error context.
trait RowExt {
    fn get_field<'r, T>(&'r self, field_name: &str, context: &str) -> Result<T>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>;

    /// Reads a nullable text column, mapping empty strings to `None`.
    fn get_text(&self, field_name: &str, context: &str) -> Result<Option<String>>;
}

impl RowExt for MySqlRow {
    fn get_field<'r, T>(&'r self, field_name: &str, context: &str) -> Result<T>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
    {
        self.try_get(field_name).map_err(|e| {
            TsdumpError::query_failed(
                format!("Failed to parse field '{}' for {}", field_name, context),
                e,
            )
        })
    }

    fn get_text(&self, field_name: &str, context: &str) -> Result<Option<String>> {
        let value: Option<String> = self.get_field(field_name, context)?;
        Ok(value.filter(|v| !v.is_empty()))
    }
}

/// Lists databases, all of them or the one named by `filter`, as shells.
pub async fn fetch_databases(
    pool: &MySqlPool,
    filter: Option<&DatabaseFilter>,
) -> Result<Vec<Database>> {
    let filtered_sql = format!("{DATABASES_QUERY} WHERE SCHEMA_NAME = ?");

    let rows = match filter {
        Some(filter) => {
            tracing::debug!("Querying catalog for database '{}'", filter.name);
            sqlx::query(&filtered_sql)
                .bind(&filter.name)
                .fetch_all(pool)
                .await
        }
        None => {
            tracing::debug!("Querying catalog for all databases");
            sqlx::query(DATABASES_QUERY).fetch_all(pool).await
        }
    }
    .map_err(|e| TsdumpError::query_failed("Failed to list databases", e))?;

    rows.iter()
        .map(|row| {
            Ok(Database {
                name: row.get_field("SCHEMA_NAME", "database list")?,
                charset: row.get_text("CHARSET_NAME", "database list")?,
                collation: row.get_text("COLLATION_NAME", "database list")?,
                tables: Vec::new(),
            })
        })
        .collect()
}

/// Lists the tables matching `filter`, each with its columns.
///
/// Column queries are issued one table at a time, in the order the
/// catalog returned the tables.
pub async fn fetch_tables(pool: &MySqlPool, filter: &TableFilter) -> Result<Vec<Table>> {
    let filtered_sql = format!("{TABLES_QUERY} AND TABLE_NAME = ?");

    let rows = match &filter.name {
        Some(name) => {
            tracing::debug!("Querying catalog for table '{}.{}'", filter.db, name);
            sqlx::query(&filtered_sql)
                .bind(&filter.db)
                .bind(name)
                .fetch_all(pool)
                .await
        }
        None => {
            tracing::debug!("Querying catalog for tables of '{}'", filter.db);
            sqlx::query(TABLES_QUERY)
                .bind(&filter.db)
                .fetch_all(pool)
                .await
        }
    }
    .map_err(|e| {
        TsdumpError::query_failed(format!("Failed to list tables of '{}'", filter.db), e)
    })?;

    let mut tables = Vec::with_capacity(rows.len());

    for row in &rows {
        let name: String = row.get_field("TABLE_NAME", "table list")?;
        let comment = row.get_text("TABLE_COMMENT", &name)?;
        let columns = fetch_columns(pool, &filter.db, &name).await?;

        tracing::debug!(
            "Collected table '{}.{}' with {} columns",
            filter.db,
            name,
            columns.len()
        );

        tables.push(Table {
            db: filter.db.clone(),
            name,
            comment,
            columns,
        });
    }

    Ok(tables)
}

/// Lists the columns of one table in ordinal order.
pub async fn fetch_columns(pool: &MySqlPool, db: &str, table: &str) -> Result<Vec<Column>> {
    let context = format!("table '{}.{}'", db, table);

    let rows = sqlx::query(COLUMNS_QUERY)
        .bind(db)
        .bind(table)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            TsdumpError::query_failed(format!("Failed to list columns of {}", context), e)
        })?;

    rows.iter().map(|row| parse_column(row, &context)).collect()
}

fn parse_column(row: &MySqlRow, context: &str) -> Result<Column> {
    let nullable: String = row.get_field("IS_NULLABLE", context)?;
    let key: Option<String> = row.get_field("COLUMN_KEY", context)?;
    let ordinal_position: u64 = row.get_field("ORDINAL_POSITION", context)?;

    Ok(Column {
        name: row.get_field("COLUMN_NAME", context)?,
        data_type: row.get_field("COLUMN_TYPE", context)?,
        nullable: nullable.eq_ignore_ascii_case("YES"),
        key: key.as_deref().and_then(ColumnKey::from_catalog),
        // An empty-string default is a real default, unlike the text
        // attributes below.
        default: row.get_field("COLUMN_DEFAULT", context)?,
        ordinal_position: u32::try_from(ordinal_position).unwrap_or(u32::MAX),
        charset: row.get_text("CHARSET_NAME", context)?,
        collation: row.get_text("COLLATION_NAME", context)?,
        extra: row.get_text("EXTRA", context)?,
        comment: row.get_text("COLUMN_COMMENT", context)?,
    })
}
