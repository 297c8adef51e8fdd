//! HTTP server for the query endpoint, health checks, and server info
//!
//! This module assembles the full router and runs the server:
//! - Arrow IPC query endpoint (/query/{sql})
//! - Health checks (/health, /health/live, /health/ready)
//! - Server information (/info)
//!
//! Cross-origin requests are gated by a fixed two-origin allow-list derived
//! from the configured frontend port; the check itself is performed by the
//! CORS middleware, not by application logic.

use crate::config::ServerConfig;
use crate::error::{ArrowportError, Result};
use crate::server::query_api::{create_query_api_router, QueryApiState};
use arrowport_engine::DatasetEngine;
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared HTTP server state
#[derive(Clone)]
pub struct HttpServerState {
    /// Dataset engine shared by all request handlers
    pub engine: Arc<DatasetEngine>,
    /// Server configuration
    pub config: ServerConfig,
    /// Server start time
    pub start_time: Instant,
}

/// Health check status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Overall status ("healthy" or "unhealthy")
    pub status: String,
    /// Individual checks
    pub checks: Vec<HealthCheck>,
}

/// Individual health check
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Check name
    pub name: String,
    /// Check status ("ok" or "failed")
    pub status: String,
    /// Optional error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Server information
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server version
    pub version: String,
    /// HTTP API address
    pub http_addr: SocketAddr,
    /// Dataset file the table was loaded from
    pub dataset_path: PathBuf,
    /// Table queries run against
    pub dataset_table: String,
    /// Number of rows in the dataset
    pub dataset_rows: i64,
    /// Server uptime in seconds
    pub uptime_seconds: f64,
}

// ─── Router assembly ─────────────────────────────────────────────────────────

fn build_base_router(state: &HttpServerState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .route("/info", get(info_handler))
        .with_state(state.clone())
}

/// Build the complete application router with CORS and tracing layers.
pub fn build_http_router(state: &HttpServerState) -> Router {
    let query_state = QueryApiState {
        engine: state.engine.clone(),
    };
    let query_router = create_query_api_router(query_state);

    build_base_router(state)
        .merge(query_router)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
}

/// CORS layer allowing exactly the two configured frontend origins.
///
/// All methods and headers are permitted for allowed origins; everything else
/// gets no `Access-Control-Allow-Origin` match.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the HTTP server and serve until shutdown.
pub async fn start_http_server(addr: SocketAddr, state: HttpServerState) -> Result<()> {
    let app = build_http_router(&state);

    info!(addr = %addr, "Starting HTTP API server (query, health, info)");

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            ArrowportError::Server(format!(
                "HTTP port {} is already in use. \
                 Fix: use --http-addr to pick a different port, \
                 or stop the existing process.",
                addr.port()
            ))
        } else {
            ArrowportError::Server(format!("Failed to bind HTTP server to {}: {}", addr, e))
        }
    })?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ArrowportError::Server(format!("HTTP server error: {}", e)))?;

    Ok(())
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to install Ctrl-C handler");
        return;
    }
    info!("Shutdown signal received");
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// Health check endpoint handler
async fn health_handler(State(state): State<HttpServerState>) -> Response {
    let checks = perform_health_checks(&state);
    let all_healthy = checks.iter().all(|c| c.status == "ok");

    let status = HealthStatus {
        status: if all_healthy { "healthy" } else { "unhealthy" }.to_string(),
        checks,
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(status)).into_response()
}

/// Liveness probe handler (always returns OK if server is running)
async fn liveness_handler() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// Readiness probe handler (checks the dataset answers queries)
async fn readiness_handler(State(state): State<HttpServerState>) -> Response {
    match state.engine.row_count() {
        Ok(_) => (StatusCode::OK, "READY").into_response(),
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response(),
    }
}

/// Server information endpoint handler
async fn info_handler(State(state): State<HttpServerState>) -> Response {
    let rows = match state.engine.row_count() {
        Ok(rows) => rows,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    let dataset = state.engine.dataset();
    let info = ServerInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        http_addr: state.config.http_addr,
        dataset_path: dataset.path.clone(),
        dataset_table: dataset.table.clone(),
        dataset_rows: rows,
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
    };

    (StatusCode::OK, Json(info)).into_response()
}

/// Run all health checks against the shared engine.
fn perform_health_checks(state: &HttpServerState) -> Vec<HealthCheck> {
    let dataset_check = match state.engine.row_count() {
        Ok(_) => HealthCheck {
            name: "dataset".to_string(),
            status: "ok".to_string(),
            message: None,
        },
        Err(e) => HealthCheck {
            name: "dataset".to_string(),
            status: "failed".to_string(),
            message: Some(e.to_string()),
        },
    };

    vec![dataset_check]
}
