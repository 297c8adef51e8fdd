//! Shared helpers for integration tests.
//!
//! Each test builds its own router wired to a real `DatasetEngine` loaded
//! from a Parquet fixture written into a temp directory, then exercises the
//! HTTP layer via `tower::ServiceExt::oneshot`.

use arrowport::config::ServerConfig;
use arrowport::engine::{DatasetConfig, DatasetEngine};
use arrowport::server::http::{build_http_router, HttpServerState};
use axum::Router;
use duckdb::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempDir;

/// Number of rows in the fixture dataset.
pub const FIXTURE_ROWS: i64 = 4;

/// Table name the fixture is materialized into.
pub const FIXTURE_TABLE: &str = "diffusiondb";

/// Frontend port used for the CORS allow-list in tests.
pub const FIXTURE_FRONTEND_PORT: u16 = 5173;

/// Write a small diffusiondb-shaped Parquet file and return its path.
pub fn write_dataset_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("diffusiondb.parquet");
    let conn = Connection::open_in_memory().expect("failed to open fixture connection");
    conn.execute_batch(&format!(
        "COPY (
            SELECT * FROM (VALUES
                ('a cat in space', 42, 512, 512),
                ('oil painting of a harbor', 7, 768, 512),
                ('studio photo of a violin', 7, 512, 768),
                ('isometric city at night', 99, 1024, 1024)
            ) AS t(prompt, seed, width, height)
        ) TO '{}' (FORMAT PARQUET)",
        path.display()
    ))
    .expect("failed to write fixture parquet");
    path
}

/// Build a server configuration pointing at the fixture dataset.
pub fn test_config(dataset_path: &Path) -> ServerConfig {
    ServerConfig {
        dataset_path: dataset_path.to_path_buf(),
        dataset_table: FIXTURE_TABLE.to_string(),
        frontend_port: FIXTURE_FRONTEND_PORT,
        ..Default::default()
    }
}

/// Build the full application router backed by a freshly loaded engine.
///
/// The returned `TempDir` keeps the fixture alive for the test's duration.
pub fn test_app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let dataset_path = write_dataset_fixture(dir.path());

    let config = test_config(&dataset_path);
    let engine = DatasetEngine::open(DatasetConfig::new(
        config.dataset_path.clone(),
        config.dataset_table.as_str(),
    ))
    .expect("failed to open dataset engine");

    let state = HttpServerState {
        engine: Arc::new(engine),
        config,
        start_time: Instant::now(),
    };

    (dir, build_http_router(&state))
}

/// Percent-encode the characters in test SQL that are not valid in a URI
/// path, so the query text can be placed in a request URI.
pub fn query_uri(sql: &str) -> String {
    let encoded = sql
        .replace(' ', "%20")
        .replace('<', "%3C")
        .replace('>', "%3E");
    format!("/query/{}", encoded)
}
