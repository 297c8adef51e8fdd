//! Query REST API serving Arrow IPC result streams.
//!
//! This module provides the single data endpoint of the server: it takes the
//! remainder of the URL path as SQL text, executes it on the shared dataset
//! engine, and responds with the serialized result stream.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/query/{sql}` | Execute SQL, respond with an Arrow IPC stream |
//!
//! The `{sql}` segment is a wildcard: embedded slashes stay part of the query
//! text, and percent-encoded characters are decoded before execution.
//!
//! # Example
//!
//! ```bash
//! curl 'http://localhost:8000/query/SELECT%20count(*)%20FROM%20diffusiondb' \
//!   --output result.arrow
//! ```

use arrowport_engine::{DatasetEngine, EngineError};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Shared state for the query API.
#[derive(Clone)]
pub struct QueryApiState {
    /// Engine owning the shared DuckDB connection.
    pub engine: Arc<DatasetEngine>,
}

/// Standard error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Optional error code for programmatic handling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Create the query API router.
pub fn create_query_api_router(state: QueryApiState) -> Router {
    Router::new()
        .route("/query/*sql", get(execute_query_handler))
        .with_state(state)
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// Execute the SQL captured from the path and stream the result bytes back.
async fn execute_query_handler(
    State(state): State<QueryApiState>,
    Path(sql): Path<String>,
) -> Result<Response, ApiError> {
    info!(sql = %sql, "Executing SQL query");

    let bytes = state
        .engine
        .query_ipc(&sql)
        .map_err(ApiError::from_engine_error)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/octet-stream")],
        bytes,
    )
        .into_response())
}

// ─── Error handling ──────────────────────────────────────────────────────────

/// API error type with HTTP status code mapping.
#[derive(Debug)]
enum ApiError {
    /// The SQL was rejected by the engine at prepare time.
    InvalidSql(String),
    /// Any other engine failure (execution, serialization).
    Engine(String),
}

impl ApiError {
    /// Map an `EngineError` to the appropriate `ApiError` variant.
    fn from_engine_error(e: EngineError) -> Self {
        match e {
            EngineError::InvalidSql(msg) => ApiError::InvalidSql(msg),
            other => ApiError::Engine(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::InvalidSql(msg) => (StatusCode::BAD_REQUEST, "INVALID_SQL", msg),
            ApiError::Engine(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "ENGINE_ERROR", msg),
        };

        let body = Json(ErrorResponse {
            error: message,
            code: Some(code.to_string()),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_sql_maps_to_bad_request() {
        let err = ApiError::from_engine_error(EngineError::InvalidSql("nope".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn other_engine_errors_map_to_server_error() {
        let err = ApiError::from_engine_error(EngineError::duckdb("boom"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
