//! Configuration merging utilities
//!
//! This module provides the function that merges configuration file values
//! with command-line arguments, where CLI arguments take precedence. A config
//! file value is only applied when the corresponding CLI argument was left at
//! its built-in default.

use std::path::Path;

use super::args::ServerArgs;
use super::defaults::*;
use super::file::ConfigFile;

/// Merge configuration file values with CLI arguments.
/// CLI arguments take precedence over config file values.
pub fn merge_config_with_args(mut args: ServerArgs, config: &ConfigFile) -> ServerArgs {
    if let Some(ref addr) = config.server.http_addr {
        if args.http_addr == DEFAULT_HTTP_ADDR {
            args.http_addr = addr.clone();
        }
    }
    if let Some(ref level) = config.server.log_level {
        if args.log_level == DEFAULT_LOG_LEVEL {
            args.log_level = level.clone();
        }
    }
    if let Some(port) = config.frontend.port {
        if args.frontend_port == DEFAULT_FRONTEND_PORT {
            args.frontend_port = port;
        }
    }
    if let Some(ref path) = config.dataset.path {
        if args.dataset_path == Path::new(DEFAULT_DATASET_PATH) {
            args.dataset_path = path.clone();
        }
    }
    if let Some(ref table) = config.dataset.table {
        if args.dataset_table == DEFAULT_DATASET_TABLE {
            args.dataset_table = table.clone();
        }
    }
    args
}
