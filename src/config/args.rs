//! Command-line arguments for the Arrowport server
//!
//! This module defines the CLI arguments structure using clap.

use clap::Parser;
use std::path::PathBuf;

use super::defaults::*;

/// Command-line arguments for the Arrowport server
#[derive(Parser, Debug, Clone)]
#[command(name = "arrowport")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "HTTP façade serving Arrow IPC query results from an embedded DuckDB dataset")]
pub struct ServerArgs {
    /// Path to configuration file (TOML format).
    /// If not specified, looks for arrowport.toml in the current directory,
    /// /etc/arrowport/, or ~/.config/arrowport/
    #[arg(short, long, env = "ARROWPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Generate example configuration file and exit
    #[arg(long)]
    pub generate_config: bool,

    /// Address to listen on for the HTTP API
    #[arg(long, env = "ARROWPORT_HTTP_ADDR", default_value = DEFAULT_HTTP_ADDR)]
    pub http_addr: String,

    /// Port of the companion frontend. Used only to compute the CORS
    /// allow-list (http://localhost:<port> and http://127.0.0.1:<port>).
    #[arg(long, env = "ARROWPORT_FRONTEND_PORT", default_value_t = DEFAULT_FRONTEND_PORT)]
    pub frontend_port: u16,

    /// Parquet file materialized into the dataset table at startup
    #[arg(long, env = "ARROWPORT_DATASET_PATH", default_value = DEFAULT_DATASET_PATH)]
    pub dataset_path: PathBuf,

    /// Name of the table queries run against
    #[arg(long, env = "ARROWPORT_DATASET_TABLE", default_value = DEFAULT_DATASET_TABLE)]
    pub dataset_table: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ARROWPORT_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}
