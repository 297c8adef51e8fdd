//! HTTP server modules
//!
//! - [`http`] - Router assembly, health/info endpoints, server startup
//! - [`query_api`] - The Arrow IPC query endpoint

pub mod http;
pub mod query_api;
