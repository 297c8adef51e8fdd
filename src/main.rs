//! Arrowport - Arrow-over-HTTP query service
//!
//! Loads one Parquet dataset into an embedded DuckDB database and serves
//! query results as Arrow IPC streams.

use arrowport::config::{merge_config_with_args, ConfigFile};
use arrowport::engine::{DatasetConfig, DatasetEngine};
use arrowport::server::http::{start_http_server, HttpServerState};
use arrowport::{ArrowportError, Result, ServerArgs, ServerConfig};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    if let Err(e) = run() {
        eprintln!("Arrowport failed to start: {e}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<()> {
    // Parse command-line arguments (before runtime creation)
    let mut args = ServerArgs::parse();

    // Handle --generate-config flag
    if args.generate_config {
        println!("{}", ConfigFile::generate_example());
        return Ok(());
    }

    // Load configuration file if specified or from default locations
    let config_file = if let Some(ref path) = args.config {
        match ConfigFile::load(path) {
            Ok(config) => {
                eprintln!("Loaded configuration from {:?}", path);
                Some(config)
            }
            Err(e) => {
                eprintln!("Error loading configuration file: {}", e);
                return Err(e);
            }
        }
    } else {
        ConfigFile::load_default()
    };

    // Merge config file values with CLI args (CLI takes precedence)
    if let Some(ref config) = config_file {
        args = merge_config_with_args(args, config);
    }

    // Initialize logging
    let log_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(log_filter)
        .init();

    if config_file.is_some() {
        info!("Configuration loaded from file");
    }

    // Create and validate server configuration before starting
    let config = match ServerConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to create configuration");
            return Err(e);
        }
    };

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(e);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ArrowportError::Server(format!("Failed to create Tokio runtime: {}", e)))?;

    runtime.block_on(run_server(config))
}

/// Load the dataset and serve HTTP traffic until shutdown.
async fn run_server(config: ServerConfig) -> Result<()> {
    // Startup loader: runs exactly once, before any request is served.
    // A missing or malformed dataset is fatal - no retry.
    let dataset = DatasetConfig::new(&config.dataset_path, config.dataset_table.as_str());
    let engine = match DatasetEngine::open(dataset) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            error!(error = %e, "Failed to load dataset");
            return Err(e.into());
        }
    };

    info!(
        frontend_port = config.frontend_port,
        "CORS allow-list: {:?}",
        config.cors_origins()
    );

    let state = HttpServerState {
        engine,
        config: config.clone(),
        start_time: Instant::now(),
    };

    start_http_server(config.http_addr, state).await
}
