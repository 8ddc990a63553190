//! YAML renderer.

use super::{RenderError, Renderer};
use crate::models::Database;
use std::io::Write;

/// Registry name of the YAML renderer
pub const NAME: &str = "yaml";

/// Serializes the tree as a YAML sequence of databases.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlRenderer;

impl Renderer for YamlRenderer {
    fn render(&self, databases: &[Database], sink: &mut dyn Write) -> Result<(), RenderError> {
        serde_yaml::to_writer(&mut *sink, databases).map_err(|e| RenderError::encode(NAME, e))?;
        sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{Column, Table};

    #[test]
    fn test_yaml_parses_back_to_same_tree() {
        let databases = vec![
            Database::new("shop").with_table(
                Table::new("shop", "orders")
                    .with_comment("customer orders")
                    .with_column(Column::new("id", "bigint").not_null().at_position(1))
                    .with_column(Column::new("note", "text").with_default("").at_position(2)),
            ),
            Database::new("empty"),
        ];

        let mut out = Vec::new();
        YamlRenderer.render(&databases, &mut out).unwrap();

        let parsed: Vec<Database> = serde_yaml::from_slice(&out).unwrap();
        assert_eq!(parsed, databases);
    }

    #[test]
    fn test_yaml_field_names() {
        let databases = vec![Database::new("shop").with_table(Table::new("shop", "users"))];

        let mut out = Vec::new();
        YamlRenderer.render(&databases, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("- name: shop"));
        assert!(output.contains("db: shop"));
        assert!(output.contains("name: users"));
    }
}
