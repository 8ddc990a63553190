//! Plain text renderer with ASCII grids.

use super::{COLUMN_HEADERS, RenderError, Renderer, column_cells};
use crate::models::{Database, Table};
use std::io::Write;

/// Registry name of the text renderer
pub const NAME: &str = "txt";

/// Renders each table as an aligned ASCII grid under database and table
/// header lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, databases: &[Database], sink: &mut dyn Write) -> Result<(), RenderError> {
        for db in databases {
            writeln!(
                sink,
                "Database: {}\tCharacter Set: {}\tCollation: {}",
                db.name,
                db.charset.as_deref().unwrap_or_default(),
                db.collation.as_deref().unwrap_or_default()
            )?;
            writeln!(sink)?;

            for table in &db.tables {
                write_table(table, sink)?;
            }
        }
        Ok(())
    }
}

fn write_table(table: &Table, sink: &mut dyn Write) -> Result<(), RenderError> {
    writeln!(
        sink,
        "Table: {}\tComment: {}",
        single_line(&table.name),
        single_line(table.comment.as_deref().unwrap_or_default())
    )?;

    let header = COLUMN_HEADERS.map(String::from);
    let rows: Vec<[String; 8]> = table
        .columns
        .iter()
        .map(|column| column_cells(column).map(|cell| single_line(&cell)))
        .collect();

    let mut widths = header.each_ref().map(|cell| cell.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_border(&widths, sink)?;
    write_row(&header, &widths, sink)?;
    write_border(&widths, sink)?;
    for row in &rows {
        write_row(row, &widths, sink)?;
    }
    if !rows.is_empty() {
        write_border(&widths, sink)?;
    }
    writeln!(sink)?;

    Ok(())
}

/// Folds line breaks into spaces so a value stays on one grid row.
fn single_line(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

fn write_border(widths: &[usize], sink: &mut dyn Write) -> Result<(), RenderError> {
    for width in widths {
        write!(sink, "+-{}-", "-".repeat(*width))?;
    }
    writeln!(sink, "+")?;
    Ok(())
}

fn write_row(cells: &[String], widths: &[usize], sink: &mut dyn Write) -> Result<(), RenderError> {
    for (cell, width) in cells.iter().zip(widths) {
        let padding = width.saturating_sub(cell.chars().count());
        write!(sink, "| {}{} ", cell, " ".repeat(padding))?;
    }
    writeln!(sink, "|")?;
    Ok(())
}
