#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

//! # Arrowport
//!
//! Arrowport is a small HTTP façade over an embedded DuckDB database: it
//! loads one Parquet dataset into memory at startup, accepts raw SQL through
//! a URL path segment, and streams results back as Arrow IPC bytes that a
//! compatible reader can reconstruct without copying.
//!
//! The SQL engine (DuckDB) and the wire format (Arrow IPC) are consumed as
//! black boxes; this crate is transport glue plus the operational surface
//! around it (configuration, logging, health checks, CORS).
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve the default dataset on 127.0.0.1:8000
//! $ ./arrowport --dataset-path data/diffusiondb.parquet
//!
//! # Query it
//! $ curl 'http://localhost:8000/query/SELECT%20count(*)%20FROM%20diffusiondb' \
//!     --output result.arrow
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use arrowport::engine::{DatasetConfig, DatasetEngine};
//!
//! fn main() -> arrowport::Result<()> {
//!     let engine = DatasetEngine::open(DatasetConfig::new(
//!         "data/diffusiondb.parquet",
//!         "diffusiondb",
//!     ))?;
//!
//!     let bytes = engine.query_ipc("SELECT count(*) FROM diffusiondb")?;
//!     println!("IPC stream: {} bytes", bytes.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - CLI arguments, TOML config file, merged server settings
//! - [`server`] - Router assembly, query endpoint, health/info endpoints
//! - [`error`] - Top-level error type
//! - [`engine`] - Re-export of the `arrowport-engine` workspace crate

pub mod config;
pub mod error;
pub mod server;

/// Embedded analytical engine (workspace crate re-export).
pub use arrowport_engine as engine;

pub use config::{ServerArgs, ServerConfig};
pub use error::{ArrowportError, Result};
