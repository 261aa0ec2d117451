//! Batch runner for parameterized SQL statements.
//!
//! Reads a JSON batch description (connection descriptor plus an
//! ordered list of statements with parameter sets), executes every
//! statement through the MySQL prepared-statement protocol, and renders
//! MySQL-console-style reports: affected-row counts for DML and boxed
//! tables for result sets.
//!
//! Exposed as a library so integration tests can drive classification,
//! binding, materialization and rendering without a live server.

pub mod args;
pub mod binder;
pub mod client;
pub mod config;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod materialize;
pub mod parser;
pub mod session;
pub mod types;

pub use binder::{BoundParameters, BoundValue, ParameterValue};
pub use config::BatchConfig;
pub use error::{Error, Result};
pub use materialize::{ColumnMeta, RawValue, ResultCursor, ResultGrid};
pub use parser::SyntaxCategory;
pub use session::Session;
pub use types::{FieldKind, TemporalValue};
