//! JSON renderer.

use super::{RenderError, Renderer};
use crate::models::Database;
use std::io::Write;

/// Registry name of the JSON renderer
pub const NAME: &str = "json";

/// Serializes the tree as a pretty-printed JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, databases: &[Database], sink: &mut dyn Write) -> Result<(), RenderError> {
        serde_json::to_writer_pretty(&mut *sink, databases)
            .map_err(|e| RenderError::encode(NAME, e))?;
        writeln!(sink)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{Column, ColumnKey, Table};

    #[test]
    fn test_json_parses_back_to_same_tree() {
        let databases = vec![
            Database::new("shop")
                .with_charset("utf8mb4", "utf8mb4_bin")
                .with_table(
                    Table::new("shop", "users")
                        .with_column(Column::new("id", "int").not_null().with_key(ColumnKey::Primary)),
                ),
        ];

        let mut out = Vec::new();
        JsonRenderer.render(&databases, &mut out).unwrap();

        let parsed: Vec<Database> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, databases);
        assert!(out.ends_with(b"\n"));
    }

    #[test]
    fn test_json_omits_absent_optionals() {
        let databases = vec![Database::new("bare")];

        let mut out = Vec::new();
        JsonRenderer.render(&databases, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value[0]["name"], "bare");
        assert!(value[0].get("charset").is_none());
    }

    #[test]
    fn test_json_empty_tree() {
        let mut out = Vec::new();
        JsonRenderer.render(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
