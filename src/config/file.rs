//! Configuration file support for Arrowport
//!
//! This module provides TOML configuration file parsing and merging with CLI
//! arguments.
//!
//! ## Priority Order
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values
//!
//! ## Example Configuration
//!
//! ```toml
//! # arrowport.toml
//!
//! [server]
//! http_addr = "127.0.0.1:8000"
//! log_level = "info"
//!
//! [frontend]
//! port = 5173
//!
//! [dataset]
//! path = "data/diffusiondb.parquet"
//! table = "diffusiondb"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ArrowportError, Result};

/// Root configuration structure for the TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Server configuration
    pub server: ServerSection,

    /// Companion frontend configuration
    pub frontend: FrontendSection,

    /// Dataset configuration
    pub dataset: DatasetSection,
}

/// `[server]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Address to listen on for the HTTP API
    pub http_addr: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

/// `[frontend]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendSection {
    /// Port of the companion frontend (drives the CORS allow-list)
    pub port: Option<u16>,
}

/// `[dataset]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSection {
    /// Parquet file materialized at startup
    pub path: Option<PathBuf>,

    /// Name of the table queries run against
    pub table: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ArrowportError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents).map_err(|e| {
            ArrowportError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Look for a configuration file in the default locations and load the
    /// first one that exists. Returns `None` when no file is found or the
    /// found file fails to parse.
    pub fn load_default() -> Option<Self> {
        let mut candidates = vec![PathBuf::from("arrowport.toml")];
        candidates.push(PathBuf::from("/etc/arrowport/arrowport.toml"));
        if let Some(home) = std::env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join(".config/arrowport/arrowport.toml"));
        }

        candidates
            .iter()
            .find(|p| p.is_file())
            .and_then(|p| Self::load(p).ok())
    }

    /// Render an example configuration file with the built-in defaults.
    pub fn generate_example() -> String {
        use super::defaults::*;

        format!(
            r#"# Arrowport configuration file
#
# CLI arguments and ARROWPORT_* environment variables take precedence
# over values set here.

[server]
http_addr = "{DEFAULT_HTTP_ADDR}"
log_level = "{DEFAULT_LOG_LEVEL}"

[frontend]
# Only used to compute the CORS allow-list:
# http://localhost:<port> and http://127.0.0.1:<port>
port = {DEFAULT_FRONTEND_PORT}

[dataset]
path = "{DEFAULT_DATASET_PATH}"
table = "{DEFAULT_DATASET_TABLE}"
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let config: ConfigFile = toml::from_str(
            r#"
            [server]
            http_addr = "0.0.0.0:9000"
            log_level = "debug"

            [frontend]
            port = 3000

            [dataset]
            path = "fixtures/sample.parquet"
            table = "sample"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.http_addr.as_deref(), Some("0.0.0.0:9000"));
        assert_eq!(config.frontend.port, Some(3000));
        assert_eq!(config.dataset.table.as_deref(), Some("sample"));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let config: ConfigFile = toml::from_str("[server]\nlog_level = \"warn\"").unwrap();
        assert_eq!(config.server.log_level.as_deref(), Some("warn"));
        assert!(config.server.http_addr.is_none());
        assert!(config.frontend.port.is_none());
        assert!(config.dataset.path.is_none());
    }

    #[test]
    fn generated_example_parses_back() {
        let example = ConfigFile::generate_example();
        let config: ConfigFile = toml::from_str(&example).unwrap();
        assert!(config.server.http_addr.is_some());
        assert!(config.frontend.port.is_some());
        assert!(config.dataset.table.is_some());
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[server\nnope").unwrap();
        assert!(ConfigFile::load(&path).is_err());
    }
}
