//! Error types for Arrowport
//!
//! This module defines the top-level error type used by the server binary and
//! library surface. Engine-level failures are defined in the
//! `arrowport-engine` crate and wrapped here.

use thiserror::Error;

/// Result type alias for Arrowport operations
pub type Result<T> = std::result::Result<T, ArrowportError>;

/// Main error type for Arrowport
#[derive(Error, Debug)]
pub enum ArrowportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Engine error: {0}")]
    Engine(#[from] arrowport_engine::EngineError),

    #[error("Server error: {0}")]
    Server(String),
}
