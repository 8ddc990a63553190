//! Markdown renderer built on an askama template.
//!
//! The tree is first flattened into display rows so the template stays free
//! of formatting logic. Cell text is escaped for use inside a pipe table.

use super::{COLUMN_HEADERS, RenderError, Renderer, column_cells};
use crate::models::{Database, Table};
use askama::Template;
use std::io::Write;

/// Registry name of the Markdown renderer
pub const NAME: &str = "md";

/// Renders one heading per database and one pipe table per table.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

#[derive(Template)]
#[template(
    ext = "md",
    source = r#"{% for db in databases -%}
# {{ db.name }}

{% if !db.charset.is_empty() -%}
Character set: `{{ db.charset }}`, collation: `{{ db.collation }}`

{% endif -%}
{% for table in db.tables -%}
## {{ table.name }}

{% if !table.comment.is_empty() -%}
{{ table.comment }}

{% endif -%}
| {{ headers|join(" | ") }} |
|{{ separator }}|
{% for row in table.rows -%}
| {{ row|join(" | ") }} |
{% endfor %}
{% endfor -%}
{% endfor -%}"#
)]
struct MarkdownDocument {
    headers: Vec<&'static str>,
    separator: String,
    databases: Vec<MarkdownDatabase>,
}

struct MarkdownDatabase {
    name: String,
    charset: String,
    collation: String,
    tables: Vec<MarkdownTable>,
}

struct MarkdownTable {
    name: String,
    comment: String,
    rows: Vec<Vec<String>>,
}

impl MarkdownDocument {
    fn new(databases: &[Database]) -> Self {
        Self {
            headers: COLUMN_HEADERS.to_vec(),
            separator: vec!["---"; COLUMN_HEADERS.len()].join("|"),
            databases: databases.iter().map(MarkdownDatabase::new).collect(),
        }
    }
}

impl MarkdownDatabase {
    fn new(db: &Database) -> Self {
        Self {
            name: escape_cell(&db.name),
            charset: db.charset.clone().unwrap_or_default(),
            collation: db.collation.clone().unwrap_or_default(),
            tables: db.tables.iter().map(MarkdownTable::new).collect(),
        }
    }
}

impl MarkdownTable {
    fn new(table: &Table) -> Self {
        Self {
            name: escape_cell(&table.name),
            comment: escape_cell(table.comment.as_deref().unwrap_or_default()),
            rows: table
                .columns
                .iter()
                .map(|column| column_cells(column).iter().map(|c| escape_cell(c)).collect())
                .collect(),
        }
    }
}

/// Keeps a value on one line and out of the table's cell delimiters.
fn escape_cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}

impl Renderer for MarkdownRenderer {
    fn render(&self, databases: &[Database], sink: &mut dyn Write) -> Result<(), RenderError> {
        let document = MarkdownDocument::new(databases)
            .render()
            .map_err(|e| RenderError::encode(NAME, e))?;
        sink.write_all(document.as_bytes())?;
        Ok(())
    }
}
