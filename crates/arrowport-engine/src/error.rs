//! Error types for the Arrowport query engine.
//!
//! This module defines domain-specific errors for the embedded DuckDB engine,
//! covering dataset loading at startup, SQL preparation and execution, and
//! Arrow IPC serialization of result batches.

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors from the dataset engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The dataset could not be materialized at startup (missing file,
    /// malformed file, or an invalid target table name).
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// The SQL statement could not be parsed or prepared by DuckDB.
    ///
    /// The inner string contains the DuckDB diagnostic message.
    #[error("Invalid SQL: {0}")]
    InvalidSql(String),

    /// The statement prepared successfully but failed during execution.
    #[error("Execution error: {0}")]
    Execution(String),

    /// Result batches could not be serialized to the Arrow IPC stream format.
    #[error("IPC serialization error: {0}")]
    Ipc(String),

    /// A DuckDB operation failed (wrapper around the duckdb crate error).
    #[error("DuckDB error: {0}")]
    DuckDb(String),
}

impl EngineError {
    /// Create an `InvalidSql` error carrying a preview of the offending query.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrowport_engine::error::EngineError;
    ///
    /// let err = EngineError::invalid_sql(
    ///     "SELECT * FORM prompts",
    ///     "syntax error near 'FORM'",
    /// );
    /// assert!(err.to_string().contains("syntax error"));
    /// ```
    pub fn invalid_sql(sql: &str, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        // Truncate very long queries in the error message
        let sql_preview = if sql.chars().count() > 120 {
            let truncated: String = sql.chars().take(120).collect();
            format!("{}...", truncated)
        } else {
            sql.to_string()
        };
        Self::InvalidSql(format!("{} (query: {})", detail, sql_preview))
    }

    /// Create a `Dataset` error.
    pub fn dataset(detail: impl Into<String>) -> Self {
        Self::Dataset(detail.into())
    }

    /// Wrap a raw DuckDB error string.
    pub fn duckdb(detail: impl Into<String>) -> Self {
        Self::DuckDb(detail.into())
    }
}
