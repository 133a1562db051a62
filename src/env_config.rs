//! Shared environment configuration for the loto binaries.
//!
//! | Variable | Default | Used by |
//! |----------|---------|---------|
//! | `LOTO_BASE_PATH` | `.` | working directory for relative paths |
//! | `LOTO_DATA_PATH` | `data/loto_combined.csv` | draw history feed |
//! | `LOTO_PORT` | `9000` | HTTP server |
//! | `LOTO_MAX_ATTEMPTS` | `20000` | profitability search cap |
//! | `LOTO_BATCH_SIZE` | `200` | attempts between yields |
//! | `RUST_LOG` | `info` | log filter |

use std::path::PathBuf;

use log::{error, info, warn};

use crate::constants::DATA_FILE_PATH;
use crate::search::SearchConfig;

/// Initialise `env_logger` with an `info` default filter.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Read `LOTO_BASE_PATH` (default `"."`) and chdir into it. Exits on failure.
pub fn init_base_path() -> PathBuf {
    let base_path = std::env::var("LOTO_BASE_PATH").unwrap_or_else(|_| ".".to_string());
    info!("LOTO_BASE_PATH={}", base_path);
    let path = PathBuf::from(&base_path);
    if std::env::set_current_dir(&base_path).is_err() {
        error!("Failed to change directory to {}", base_path);
        std::process::exit(1);
    }
    if let Ok(cwd) = std::env::current_dir() {
        info!("Working directory: {}", cwd.display());
    }
    path
}

/// Read `LOTO_DATA_PATH` (default [`DATA_FILE_PATH`]).
pub fn data_path() -> PathBuf {
    std::env::var("LOTO_DATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DATA_FILE_PATH))
}

/// Read `LOTO_PORT` (default 9000).
pub fn server_port() -> u16 {
    std::env::var("LOTO_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9000)
}

/// Search limits from `LOTO_MAX_ATTEMPTS` / `LOTO_BATCH_SIZE`, defaulting each
/// unset or unparseable variable independently. Values above
/// [`crate::constants::MAX_SEARCH_ATTEMPTS`] / [`crate::constants::MAX_BATCH_SIZE`]
/// are clamped so requests relying on the defaults stay valid.
pub fn search_config() -> SearchConfig {
    let defaults = SearchConfig::default();
    let read = |key: &str, fallback: u32| {
        std::env::var(key)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(fallback)
    };
    let config = SearchConfig {
        max_attempts: read("LOTO_MAX_ATTEMPTS", defaults.max_attempts),
        batch_size: read("LOTO_BATCH_SIZE", defaults.batch_size),
    };
    let bounded = config.bounded();
    if bounded != config {
        warn!("search limits {config:?} clamped to {bounded:?}");
    }
    bounded
}
