//! Configuration module for Arrowport
//!
//! This module is organized into submodules:
//! - `defaults` - Default constants and values
//! - `args` - CLI argument definitions
//! - `file` - TOML configuration file support
//! - `merge` - File/CLI precedence merging

mod args;
mod defaults;
pub mod file;
mod merge;

// Re-export submodule types
pub use args::ServerArgs;
pub use defaults::*;
pub use file::ConfigFile;
pub use merge::merge_config_with_args;

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{ArrowportError, Result};

/// Complete server configuration for Arrowport.
///
/// Contains everything needed to run the server: the bind address, the
/// companion frontend port that drives the CORS allow-list, and the dataset
/// to materialize at startup.
///
/// # Configuration Sources
///
/// Configuration is loaded from multiple sources with this precedence:
/// 1. **CLI arguments** (highest priority)
/// 2. **Environment variables** - `ARROWPORT_*` prefix
/// 3. **Config file** - TOML (see [`ConfigFile`])
/// 4. **Built-in defaults** (lowest priority)
///
/// # Example
///
/// ```rust,ignore
/// use arrowport::config::{ServerConfig, ServerArgs};
/// use clap::Parser;
///
/// let args = ServerArgs::parse();
/// let config = ServerConfig::from_args(args)?;
/// config.validate()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on for the HTTP API
    pub http_addr: SocketAddr,

    /// Port of the companion frontend, used only to compute the CORS
    /// allow-list
    pub frontend_port: u16,

    /// Parquet file materialized into the dataset table at startup
    pub dataset_path: PathBuf,

    /// Name of the table queries run against
    pub dataset_table: String,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_SOCKET_ADDR,
            frontend_port: DEFAULT_FRONTEND_PORT,
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            dataset_table: DEFAULT_DATASET_TABLE.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Build a configuration from parsed CLI arguments.
    pub fn from_args(args: ServerArgs) -> Result<Self> {
        let http_addr = args.http_addr.parse::<SocketAddr>().map_err(|e| {
            ArrowportError::Config(format!("invalid HTTP address '{}': {}", args.http_addr, e))
        })?;

        Ok(Self {
            http_addr,
            frontend_port: args.frontend_port,
            dataset_path: args.dataset_path,
            dataset_table: args.dataset_table,
            log_level: args.log_level,
        })
    }

    /// Validate the configuration before starting the server.
    ///
    /// Startup is the only place the dataset file is read, so a missing file
    /// is rejected here rather than surfacing on the first request.
    pub fn validate(&self) -> Result<()> {
        if self.frontend_port == 0 {
            return Err(ArrowportError::Config(
                "frontend port must be nonzero".to_string(),
            ));
        }
        if !arrowport_engine::is_plain_identifier(&self.dataset_table) {
            return Err(ArrowportError::Config(format!(
                "dataset table must be a plain SQL identifier, got {:?}",
                self.dataset_table
            )));
        }
        if !self.dataset_path.is_file() {
            return Err(ArrowportError::Config(format!(
                "dataset file not found: {}",
                self.dataset_path.display()
            )));
        }
        Ok(())
    }

    /// The fixed two-origin CORS allow-list derived from the frontend port.
    ///
    /// Browsers may spell the local origin either way, so both the
    /// `localhost` and `127.0.0.1` forms are allowed.
    pub fn cors_origins(&self) -> [String; 2] {
        [
            format!("http://localhost:{}", self.frontend_port),
            format!("http://127.0.0.1:{}", self.frontend_port),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn from_args_parses_bind_address() {
        let args = ServerArgs::parse_from(["arrowport", "--http-addr", "0.0.0.0:9000"]);
        let config = ServerConfig::from_args(args).unwrap();
        assert_eq!(config.http_addr.port(), 9000);
    }

    #[test]
    fn from_args_rejects_bad_address() {
        let args = ServerArgs::parse_from(["arrowport", "--http-addr", "not-an-addr"]);
        assert!(ServerConfig::from_args(args).is_err());
    }

    #[test]
    fn validate_rejects_missing_dataset() {
        let config = ServerConfig {
            dataset_path: PathBuf::from("/definitely/not/here.parquet"),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dataset file not found"));
    }

    #[test]
    fn validate_rejects_bad_table_name() {
        let config = ServerConfig {
            dataset_table: "drop table; --".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("plain SQL identifier"));
    }

    #[test]
    fn cors_origins_cover_both_local_spellings() {
        let config = ServerConfig {
            frontend_port: 5173,
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins(),
            [
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string()
            ]
        );
    }
}
