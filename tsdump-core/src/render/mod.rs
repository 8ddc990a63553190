//! Output encoders and the name-based registry that selects them.
//!
//! Each output format is an independent [`Renderer`]. The assembler and the
//! CLI never name a concrete format; they only look one up by name in a
//! [`RendererRegistry`], so adding a format means adding a module and one
//! entry in [`registry::BUILTIN_RENDERERS`].
//!
//! # Module Structure
//! - `registry`: Name to renderer mapping
//! - `text`, `csv`, `json`, `yaml`, `markdown`, `xlsx`: One module per format

use crate::models::{Column, Database};
use std::io::Write;
use thiserror::Error;

pub mod csv;
pub mod json;
pub mod markdown;
pub mod registry;
pub mod text;
pub mod xlsx;
pub mod yaml;

pub use registry::{BUILTIN_RENDERERS, DEFAULT_RENDERER, RendererRegistry};

/// Failure while encoding or writing rendered output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the sink failed
    #[error("Failed to write rendered output")]
    Io(#[from] std::io::Error),

    /// The format encoder rejected the tree
    #[error("Failed to encode {format} output")]
    Encode {
        format: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RenderError {
    /// Creates an encoding error for `format`
    pub fn encode<E>(format: &'static str, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Encode {
            format,
            source: Box::new(error),
        }
    }
}

/// Encodes an assembled metadata tree into one output format.
///
/// Renderers get the tree by shared reference and must write only through
/// `sink`. They may stream their writes or buffer the whole document.
pub trait Renderer {
    /// Writes `databases` to `sink`.
    ///
    /// # Errors
    /// Returns [`RenderError`] if encoding or writing fails; output written
    /// before the failure is left in the sink
    fn render(&self, databases: &[Database], sink: &mut dyn Write) -> Result<(), RenderError>;
}

/// Headings of the per-column attribute grid shared by the tabular formats.
pub(crate) const COLUMN_HEADERS: [&str; 8] = [
    "COLUMN",
    "DATA TYPE",
    "NULLABLE",
    "KEY",
    "DEFAULT",
    "CHARACTER SET",
    "COLLATION",
    "COMMENT",
];

/// Cells of one column in [`COLUMN_HEADERS`] order.
pub(crate) fn column_cells(column: &Column) -> [String; 8] {
    [
        column.name.clone(),
        column.data_type.clone(),
        if column.nullable { "YES" } else { "NO" }.to_string(),
        column.key.map(|k| k.to_string()).unwrap_or_default(),
        column.default.clone().unwrap_or_default(),
        column.charset.clone().unwrap_or_default(),
        column.collation.clone().unwrap_or_default(),
        column.comment.clone().unwrap_or_default(),
    ]
}
