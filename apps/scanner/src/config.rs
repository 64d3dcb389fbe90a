//! # Application Configuration
//!
//! Paths and tunables loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SCANLEDGER_*`)
//! 2. Defaults (platform data directory, 2 second scan cooldown)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::error::AppError;

/// Cooldown after an accepted barcode before the next one is accepted.
///
/// A physical scan fires several identical decode events in a burst; the
/// cooldown mutes the burst at the capture boundary. Dedup in the cart is
/// the actual correctness guarantee.
pub const DEFAULT_SCAN_COOLDOWN: Duration = Duration::from_secs(2);

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the SQLite snapshot store.
    pub database_path: PathBuf,

    /// Directory receiving exported receipt documents.
    pub export_dir: PathBuf,

    /// Barcode scan cooldown window.
    pub scan_cooldown: Duration,
}

impl AppConfig {
    /// Builds the configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SCANLEDGER_DB_PATH`: Override the database file path
    /// - `SCANLEDGER_EXPORT_DIR`: Override the export directory
    /// - `SCANLEDGER_SCAN_COOLDOWN_MS`: Override the scan cooldown
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.scanledger.scanledger/`
    /// - **Windows**: `%APPDATA%\scanledger\scanledger\`
    /// - **Linux**: `~/.local/share/scanledger/`
    ///
    /// Creates the data and export directories if they don't exist.
    pub fn from_env() -> Result<Self, AppError> {
        let data_dir = match std::env::var("SCANLEDGER_DB_PATH") {
            Ok(path) => {
                let path = PathBuf::from(path);
                let dir = path.parent().map(PathBuf::from).unwrap_or_default();
                if !dir.as_os_str().is_empty() {
                    std::fs::create_dir_all(&dir)?;
                }
                return Self::with_database_path(path);
            }
            Err(_) => {
                let proj_dirs = ProjectDirs::from("com", "scanledger", "scanledger")
                    .ok_or(AppError::NoDataDir)?;
                let dir = proj_dirs.data_dir().to_path_buf();
                std::fs::create_dir_all(&dir)?;
                dir
            }
        };

        Self::with_database_path(data_dir.join("scanledger.db"))
    }

    /// Finishes construction around a resolved database path.
    fn with_database_path(database_path: PathBuf) -> Result<Self, AppError> {
        let export_dir = match std::env::var("SCANLEDGER_EXPORT_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => database_path
                .parent()
                .map(PathBuf::from)
                .unwrap_or_default()
                .join("exports"),
        };

        let scan_cooldown = std::env::var("SCANLEDGER_SCAN_COOLDOWN_MS")
            .ok()
            .and_then(|ms| ms.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SCAN_COOLDOWN);

        Ok(AppConfig {
            database_path,
            export_dir,
            scan_cooldown,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_database_path_derives_export_dir() {
        let config = AppConfig::with_database_path(PathBuf::from("/data/app/scanledger.db"))
            .expect("config builds");

        assert_eq!(config.database_path, PathBuf::from("/data/app/scanledger.db"));
        assert!(config.export_dir.ends_with("exports"));
        assert_eq!(config.scan_cooldown, DEFAULT_SCAN_COOLDOWN);
    }
}
