//! CSV renderer: one record per column, qualified by database and table.

use super::{COLUMN_HEADERS, RenderError, Renderer, column_cells};
use crate::models::Database;
use std::io::Write;

/// Registry name of the CSV renderer
pub const NAME: &str = "csv";

/// Flattens the tree into a single CSV document.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl Renderer for CsvRenderer {
    fn render(&self, databases: &[Database], sink: &mut dyn Write) -> Result<(), RenderError> {
        let mut writer = ::csv::Writer::from_writer(sink);

        writer
            .write_record(["DATABASE", "TABLE"].into_iter().chain(COLUMN_HEADERS))
            .map_err(|e| RenderError::encode(NAME, e))?;

        for db in databases {
            for table in &db.tables {
                for column in &table.columns {
                    let cells = column_cells(column);
                    writer
                        .write_record(
                            [db.name.as_str(), table.name.as_str()]
                                .into_iter()
                                .chain(cells.iter().map(String::as_str)),
                        )
                        .map_err(|e| RenderError::encode(NAME, e))?;
                }
            }
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{Column, ColumnKey, Table};

    #[test]
    fn test_csv_records() {
        let databases = vec![Database::new("shop").with_table(
            Table::new("shop", "users")
                .with_column(Column::new("id", "int").not_null().with_key(ColumnKey::Primary))
                .with_column(Column::new("bio", "text").with_comment("free, \"quoted\" text")),
        )];

        let mut out = Vec::new();
        CsvRenderer.render(&databases, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "DATABASE,TABLE,COLUMN,DATA TYPE,NULLABLE,KEY,DEFAULT,CHARACTER SET,COLLATION,COMMENT"
        );
        assert_eq!(lines[1], "shop,users,id,int,NO,PRI,,,,");
        assert_eq!(lines[2], "shop,users,bio,text,YES,,,,,\"free, \"\"quoted\"\" text\"");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_empty_tree_writes_header_only() {
        let mut out = Vec::new();
        CsvRenderer.render(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}
