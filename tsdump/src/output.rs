//! Output sink handling for rendered documents.
//!
//! The sink is opened once per run, receives exactly one render call and is
//! flushed before it is dropped. A render failure part way through leaves
//! whatever was already written in place.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tsdump_core::{Database, RenderError, Renderer, TsdumpError};

/// Opens the destination: the file at `path`, or standard output.
///
/// # Errors
/// Returns [`TsdumpError::Sink`] if the file cannot be created
pub(crate) fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write>, TsdumpError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| TsdumpError::Sink {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!("Writing output to {}", path.display());
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Renders `databases` into the destination named by `path`.
///
/// # Errors
/// Returns a sink error if the destination cannot be opened, or a render
/// error if encoding or writing fails
pub(crate) fn write_output(
    renderer: &dyn Renderer,
    databases: &[Database],
    path: Option<&Path>,
) -> Result<(), TsdumpError> {
    let mut sink = open_sink(path)?;
    renderer.render(databases, &mut sink)?;
    sink.flush().map_err(RenderError::from)?;
    Ok(())
}
