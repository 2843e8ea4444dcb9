mod config;

pub use config::{Config, NotificationsConfig, TimerConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable naming an explicit configuration directory.
pub const CONFIG_DIR_ENV: &str = "POMODORO_CONFIG_DIR";

/// Returns the configuration directory.
///
/// `POMODORO_CONFIG_DIR` wins when set. Otherwise this is
/// `<config dir>/pomodoro-timer[-dev]/`, with the `-dev` suffix chosen by
/// `POMODORO_ENV=dev`. The directory is not created here.
///
/// # Errors
/// Returns an error if the platform has no configuration directory.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let base_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let env = std::env::var("POMODORO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomodoro-timer-dev")
    } else {
        base_dir.join("pomodoro-timer")
    };
    Ok(dir)
}
