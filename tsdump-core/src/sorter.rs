//! Optional lexicographic ordering of the metadata tree.
//!
//! Sorting is bottom-up: columns within each table, then tables within each
//! database, then the databases themselves. All sorts are stable, so siblings
//! sharing a name keep their assembled relative order.

use crate::models::{Column, Database, Table};

/// Sorts databases, their tables and the tables' columns by name, in place.
pub fn sort_databases(databases: &mut [Database]) {
    for database in databases.iter_mut() {
        sort_tables(&mut database.tables);
    }
    databases.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Sorts tables and their columns by name, in place.
pub fn sort_tables(tables: &mut [Table]) {
    for table in tables.iter_mut() {
        sort_columns(&mut table.columns);
    }
    tables.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Sorts columns by name, in place.
pub fn sort_columns(columns: &mut [Column]) {
    columns.sort_by(|a, b| a.name.cmp(&b.name));
}
