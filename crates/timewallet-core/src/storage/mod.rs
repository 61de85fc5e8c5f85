mod config;
pub mod database;
pub mod migrations;

pub use config::Config;
pub use database::{Database, Tab};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/timewallet[-dev]/` based on TIMEWALLET_ENV.
///
/// Set TIMEWALLET_ENV=dev to use the development data directory, or
/// TIMEWALLET_DATA_DIR to point at an explicit directory (used by tests).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var("TIMEWALLET_DATA_DIR") {
        Ok(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TIMEWALLET_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("timewallet-dev")
            } else {
                base_dir.join("timewallet")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
