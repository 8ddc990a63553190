//! Core data structures and pipeline stages for tsdump.
//!
//! This crate turns a sparse selection (a database name and optional table
//! names) into a tree of catalog metadata and hands that tree to one of a set
//! of named renderers.
//!
//! # Read-only Guarantees
//! - Catalog access is limited to `information_schema` SELECTs
//! - No credentials are stored in the metadata tree or logged
//! - The tree is built fresh per invocation and never cached
//!
//! # Architecture
//! - Repository pattern for catalog access ([`repository::Repository`])
//! - A single assembler deciding which catalog calls to issue ([`assembler`])
//! - Explicit registry of output encoders ([`render::RendererRegistry`])

pub mod assembler;
pub mod error;
pub mod logging;
pub mod models;
pub mod render;
pub mod repository;
pub mod sorter;

// Re-export commonly used types
pub use assembler::{Selection, assemble};
pub use error::{Result, TsdumpError};
pub use logging::init_logging;
pub use models::{Column, ColumnKey, Database, Table};
pub use render::{DEFAULT_RENDERER, RenderError, Renderer, RendererRegistry};
pub use repository::{ConnectionConfig, Credentials, DatabaseFilter, Repository, TableFilter};
pub use sorter::sort_databases;

#[cfg(feature = "mysql")]
pub use repository::mysql::MySqlRepository;
