//! Default constants for Arrowport configuration
//!
//! These constants define the default values used throughout the
//! configuration system when no explicit value is provided.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default listen address for the HTTP API
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8000";

/// Default HTTP socket address (const, no parsing needed)
pub(crate) const DEFAULT_HTTP_SOCKET_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8000);

/// Default port of the companion frontend (used for the CORS allow-list)
pub const DEFAULT_FRONTEND_PORT: u16 = 5173;

/// Default dataset file path
pub const DEFAULT_DATASET_PATH: &str = "data/diffusiondb.parquet";

/// Default dataset table name
pub const DEFAULT_DATASET_TABLE: &str = "diffusiondb";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
