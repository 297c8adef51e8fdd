//! DuckDB-backed dataset engine.
//!
//! One in-memory DuckDB database holds a single dataset table, materialized
//! from a Parquet file when the engine is opened. Queries run on the shared
//! connection and their results are serialized as an Arrow IPC stream
//! (schema + record batches), ready to be used verbatim as an HTTP response
//! body.
//!
//! # Architecture
//!
//! 1. **Startup load** -- [`DatasetEngine::open`] issues one
//!    `CREATE TABLE ... AS SELECT * FROM read_parquet(...)` statement. Any
//!    failure is returned to the caller; the process must not serve traffic
//!    without the dataset.
//! 2. **Query rewrite** -- `count(*)` aggregates are annotated with an
//!    `::INT` cast (see [`crate::rewrite`]).
//! 3. **Execution** -- the rewritten SQL runs against the shared connection
//!    and results are collected as Arrow record batches.
//! 4. **Serialization** -- batches are written to an Arrow IPC stream. An
//!    empty result still yields a valid stream carrying the schema.

use crate::error::{EngineError, Result};
use crate::rewrite::cast_count_star;
use arrow::ipc::writer::StreamWriter;
use arrow::record_batch::RecordBatch;
use duckdb::Connection;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

// ─── Public types ────────────────────────────────────────────────────────────

/// Location and target table of the dataset loaded at startup.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Parquet file read fully into memory when the engine opens.
    pub path: PathBuf,

    /// Name of the table the dataset is materialized into.
    pub table: String,
}

impl DatasetConfig {
    /// Create a dataset description from a file path and table name.
    pub fn new(path: impl Into<PathBuf>, table: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            table: table.into(),
        }
    }
}

/// Embedded analytical engine owning the process-wide connection.
///
/// The engine is safe to share across threads (`Send + Sync`) and is expected
/// to be wrapped in an `Arc` and handed to every request handler. The
/// connection sits behind a mutex because the DuckDB handle contains `RefCell`
/// state and is not `Sync`; concurrent queries serialize on the lock.
#[derive(Debug)]
pub struct DatasetEngine {
    /// DuckDB connection (in-memory database).
    connection: Arc<Mutex<Connection>>,

    /// Dataset that was materialized at startup.
    dataset: DatasetConfig,
}

/// Returns `true` when `name` is a plain SQL identifier: ASCII letters,
/// digits, and underscores, not starting with a digit.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ─── Engine implementation ───────────────────────────────────────────────────

impl DatasetEngine {
    /// Open an in-memory database and materialize the dataset into it.
    ///
    /// Runs exactly once per process, before any request is served. A missing
    /// or malformed dataset file, or an invalid table name, is a hard error
    /// with no retry; the caller is expected to abort startup.
    pub fn open(dataset: DatasetConfig) -> Result<Self> {
        if !is_plain_identifier(&dataset.table) {
            return Err(EngineError::dataset(format!(
                "invalid dataset table name: {:?}",
                dataset.table
            )));
        }
        if !dataset.path.is_file() {
            return Err(EngineError::dataset(format!(
                "dataset file not found: {}",
                dataset.path.display()
            )));
        }

        let connection = Connection::open_in_memory().map_err(|e| {
            EngineError::duckdb(format!("failed to create DuckDB connection: {}", e))
        })?;

        // Disable automatic extension installation to avoid failures on
        // systems where dynamic extension loading is restricted. The bundled
        // build already includes the Parquet reader.
        let _ = connection.execute_batch(
            "SET autoinstall_known_extensions=false; SET autoload_known_extensions=true;",
        );

        // Single quotes in the path are escaped by doubling; the table name
        // was validated as a plain identifier above.
        let path_sql = dataset.path.display().to_string().replace('\'', "''");
        connection
            .execute_batch(&format!(
                "CREATE TABLE \"{}\" AS SELECT * FROM read_parquet('{}')",
                dataset.table, path_sql
            ))
            .map_err(|e| {
                EngineError::dataset(format!(
                    "failed to load dataset {}: {}",
                    dataset.path.display(),
                    e
                ))
            })?;

        let engine = Self {
            connection: Arc::new(Mutex::new(connection)),
            dataset,
        };

        let rows = engine.row_count()?;
        info!(
            table = %engine.dataset.table,
            path = %engine.dataset.path.display(),
            rows,
            "Dataset loaded into DuckDB"
        );

        Ok(engine)
    }

    /// The dataset this engine was opened with.
    pub fn dataset(&self) -> &DatasetConfig {
        &self.dataset
    }

    // ── Query execution ──────────────────────────────────────────────────

    /// Execute `sql` and serialize the result as an Arrow IPC stream.
    ///
    /// The query text is passed to the engine verbatim apart from the
    /// `count(*)` cast rewrite, so any statement DuckDB accepts is accepted
    /// here. Results are returned as one self-describing byte stream: the
    /// schema followed by zero or more record batches.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidSql` when DuckDB rejects the statement at
    /// prepare time, `EngineError::Execution` when execution fails, and
    /// `EngineError::Ipc` when the result cannot be serialized.
    pub fn query_ipc(&self, sql: &str) -> Result<Vec<u8>> {
        let rewritten = cast_count_star(sql);
        if rewritten != sql {
            debug!(sql = %sql, "Applied count(*) integer cast");
        }

        let conn = self.connection.lock();
        let mut stmt = conn
            .prepare(&rewritten)
            .map_err(|e| EngineError::invalid_sql(&rewritten, e.to_string()))?;

        let result = stmt
            .query_arrow([])
            .map_err(|e| EngineError::Execution(format!("query failed: {}", e)))?;
        let schema = result.get_schema();
        let batches: Vec<RecordBatch> = result.collect();

        let mut writer = StreamWriter::try_new(Vec::new(), schema.as_ref())
            .map_err(|e| EngineError::Ipc(e.to_string()))?;
        for batch in &batches {
            writer
                .write(batch)
                .map_err(|e| EngineError::Ipc(e.to_string()))?;
        }
        writer.finish().map_err(|e| EngineError::Ipc(e.to_string()))?;
        let bytes = writer
            .into_inner()
            .map_err(|e| EngineError::Ipc(e.to_string()))?;

        info!(
            sql = %rewritten,
            batches = batches.len(),
            rows = batches.iter().map(RecordBatch::num_rows).sum::<usize>(),
            "Query executed"
        );

        Ok(bytes)
    }

    /// Number of rows in the dataset table.
    ///
    /// Used by readiness probes; the dataset is immutable, so the value is
    /// constant for the process lifetime.
    pub fn row_count(&self) -> Result<i64> {
        let conn = self.connection.lock();
        conn.query_row(
            &format!("SELECT count(*) FROM \"{}\"", self.dataset.table),
            [],
            |row| row.get(0),
        )
        .map_err(|e| EngineError::duckdb(format!("failed to count dataset rows: {}", e)))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
