mod config;

pub use config::Config;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the configuration directory.
///
/// `ZENWRITE_CONFIG_DIR` wins when set. Otherwise `~/.config/zenwrite/`, or
/// `~/.config/zenwrite-dev/` when `ZENWRITE_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("ZENWRITE_CONFIG_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("ZENWRITE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base.join("zenwrite-dev")
            } else {
                base.join("zenwrite")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::NoConfigDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
