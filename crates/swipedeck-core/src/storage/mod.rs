mod config;

pub use config::{BoostConfig, Config, DeckConfig, SpringConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/swipedeck[-dev]/` based on SWIPEDECK_ENV.
///
/// Set SWIPEDECK_ENV=dev to use development data directory, or
/// SWIPEDECK_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = std::env::var_os("SWIPEDECK_CONFIG_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)
            .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SWIPEDECK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("swipedeck-dev")
    } else {
        base_dir.join("swipedeck")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
