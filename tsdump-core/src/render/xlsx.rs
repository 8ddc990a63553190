//! Excel workbook renderer.
//!
//! Each database becomes one worksheet listing every column of every table,
//! one row per column under a bold header row.

use super::{COLUMN_HEADERS, RenderError, Renderer, column_cells};
use crate::models::Database;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::collections::HashSet;
use std::io::Write;

/// Registry name of the workbook renderer
pub const NAME: &str = "xlsx";

/// Longest worksheet name Excel accepts.
const MAX_SHEET_NAME_CHARS: usize = 31;

/// Builds an `.xlsx` workbook in memory and writes it to the sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxRenderer;

impl Renderer for XlsxRenderer {
    fn render(&self, databases: &[Database], sink: &mut dyn Write) -> Result<(), RenderError> {
        let bytes = build_workbook(databases).map_err(|e| RenderError::encode(NAME, e))?;
        sink.write_all(&bytes)?;
        Ok(())
    }
}

fn build_workbook(databases: &[Database]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let mut used_names = HashSet::new();

    for db in databases {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(unique_sheet_name(&db.name, &mut used_names))?;
        write_header(worksheet, &header_format)?;

        let mut row: u32 = 1;
        for table in &db.tables {
            for column in &table.columns {
                worksheet.write_string(row, 0, &table.name)?;
                for (col, cell) in (1u16..).zip(column_cells(column)) {
                    worksheet.write_string(row, col, cell)?;
                }
                row = row.saturating_add(1);
            }
        }
        worksheet.autofit();
    }

    // A workbook must contain at least one sheet
    if databases.is_empty() {
        let worksheet = workbook.add_worksheet();
        write_header(worksheet, &header_format)?;
    }

    workbook.save_to_buffer()
}

fn write_header(worksheet: &mut Worksheet, format: &Format) -> Result<(), XlsxError> {
    let headers = std::iter::once("TABLE").chain(COLUMN_HEADERS);
    for (col, header) in (0u16..).zip(headers) {
        worksheet.write_string_with_format(0, col, header, format)?;
    }
    Ok(())
}

/// Turns a database name into a valid worksheet name not yet in `used`.
///
/// Excel compares sheet names case-insensitively, so `used` holds
/// lowercased names.
fn unique_sheet_name(db_name: &str, used: &mut HashSet<String>) -> String {
    let sanitized: String = db_name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' | '\'' => '_',
            other => other,
        })
        .take(MAX_SHEET_NAME_CHARS)
        .collect();
    let base = if sanitized.is_empty() {
        "Sheet".to_string()
    } else {
        sanitized
    };

    let mut candidate = base.clone();
    let mut suffix: usize = 1;
    while used.contains(&candidate.to_lowercase()) {
        suffix = suffix.saturating_add(1);
        let tag = format!("~{suffix}");
        let keep = MAX_SHEET_NAME_CHARS.saturating_sub(tag.chars().count());
        candidate = base.chars().take(keep).chain(tag.chars()).collect();
    }

    used.insert(candidate.to_lowercase());
    candidate
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{Column, Table};

    #[test]
    fn test_xlsx_writes_zip_container() {
        let databases = vec![
            Database::new("shop").with_table(
                Table::new("shop", "users").with_column(Column::new("id", "int").not_null()),
            ),
            Database::new("analytics"),
        ];

        let mut out = Vec::new();
        XlsxRenderer.render(&databases, &mut out).unwrap();
        assert!(out.starts_with(b"PK"));
    }

    #[test]
    fn test_xlsx_empty_tree_still_valid() {
        let mut out = Vec::new();
        XlsxRenderer.render(&[], &mut out).unwrap();
        assert!(out.starts_with(b"PK"));
    }

    #[test]
    fn test_sheet_name_sanitized_and_truncated() {
        let mut used = HashSet::new();
        assert_eq!(unique_sheet_name("a/b:c", &mut used), "a_b_c");
        assert_eq!(unique_sheet_name("", &mut used), "Sheet");

        let long = "x".repeat(40);
        let name = unique_sheet_name(&long, &mut used);
        assert_eq!(name.chars().count(), MAX_SHEET_NAME_CHARS);
    }

    #[test]
    fn test_sheet_name_deduplicated_case_insensitively() {
        let mut used = HashSet::new();
        assert_eq!(unique_sheet_name("Shop", &mut used), "Shop");
        assert_eq!(unique_sheet_name("shop", &mut used), "shop~2");
        assert_eq!(unique_sheet_name("SHOP", &mut used), "SHOP~3");

        let long = "y".repeat(31);
        assert_eq!(unique_sheet_name(&long, &mut used), long);
        let second = unique_sheet_name(&long, &mut used);
        assert_eq!(second.chars().count(), MAX_SHEET_NAME_CHARS);
        assert!(second.ends_with("~2"));
    }
}
