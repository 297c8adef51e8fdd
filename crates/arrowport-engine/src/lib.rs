//! Embedded analytical engine for Arrowport (DuckDB-powered SQL over a
//! preloaded dataset).
//!
//! This crate is a workspace member that isolates the heavy `duckdb` (bundled
//! C++) dependency into its own compilation unit, preventing recompilation of
//! DuckDB when unrelated server code changes.
//!
//! # Overview
//!
//! The engine materializes one Parquet file into an in-memory DuckDB table
//! when it is opened, then serves read queries against that table for the
//! lifetime of the process:
//!
//! 1. [`DatasetEngine::open`] creates the connection and loads the dataset.
//!    A missing or malformed file is a hard error; the caller is expected to
//!    abort startup.
//! 2. [`DatasetEngine::query_ipc`] rewrites `count(*)` aggregates to a fixed
//!    integer width, executes the SQL, and serializes the result batches
//!    into a single Arrow IPC stream (schema followed by record batches).
//!
//! # Modules
//!
//! - [`engine`] -- Connection ownership, dataset loading, query execution.
//! - [`rewrite`] -- Quote- and comment-aware `count(*)` cast rewriting.
//! - [`error`] -- Domain-specific error types.

pub mod engine;
pub mod error;
pub mod rewrite;

pub use engine::{is_plain_identifier, DatasetConfig, DatasetEngine};
pub use error::{EngineError, Result};
pub use rewrite::cast_count_star;
