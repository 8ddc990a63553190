//! Catalog metadata tree: databases own tables, tables own columns.
//!
//! The tree is built fresh per invocation by the assembler, optionally
//! reordered by the sorter and then handed read-only to a renderer. Column
//! attributes beyond the name are descriptive only; nothing in the pipeline
//! inspects them.

use serde::{Deserialize, Serialize};

/// A database (schema) and the tables selected from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// A base table with its columns in catalog (ordinal) order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Name of the owning database (back-reference only)
    pub db: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// Index role of a column as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKey {
    #[serde(rename = "PRI")]
    Primary,
    #[serde(rename = "UNI")]
    Unique,
    #[serde(rename = "MUL")]
    Multiple,
}

impl ColumnKey {
    /// Parses the `COLUMN_KEY` value; an empty or unknown value has no key role.
    pub fn from_catalog(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "PRI" => Some(Self::Primary),
            "UNI" => Some(Self::Unique),
            "MUL" => Some(Self::Multiple),
            _ => None,
        }
    }

    /// Catalog spelling of the key role
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "PRI",
            Self::Unique => "UNI",
            Self::Multiple => "MUL",
        }
    }
}

impl std::fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A table column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Full column type as declared, e.g. `varchar(255)` or `int unsigned`
    pub data_type: String,
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ColumnKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub ordinal_position: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Database {
    /// Creates a database shell: name only, no tables.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the default character set and collation.
    pub fn with_charset(mut self, charset: impl Into<String>, collation: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self.collation = Some(collation.into());
        self
    }

    /// Builder method to append a table.
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Returns a copy of this database without its tables.
    pub fn shell(&self) -> Self {
        Self {
            name: self.name.clone(),
            charset: self.charset.clone(),
            collation: self.collation.clone(),
            tables: Vec::new(),
        }
    }
}

impl Table {
    /// Creates a table with no columns.
    pub fn new(db: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the table comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Builder method to append a column.
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
}

impl Column {
    /// Creates a nullable column with the given type and no other attributes.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            ..Default::default()
        }
    }

    /// Builder method to mark the column NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Builder method to set the key role.
    pub fn with_key(mut self, key: ColumnKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Builder method to set the default value expression.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Builder method to set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Builder method to set the ordinal position.
    pub fn at_position(mut self, ordinal_position: u32) -> Self {
        self.ordinal_position = ordinal_position;
        self
    }
}
