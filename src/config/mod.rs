//! Configuration management
//!
//! In the browser the client runs with [`ClientConfig::default`]. The native
//! probe layers defaults, an optional config file and `WATCHTOWER_*`
//! environment variables.

use std::time::Duration;

use serde::Deserialize;

use crate::keys::ESCAPE;
use crate::modal::SETTLE_DELAY;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    /// Prefix for every API path. Empty means same-origin relative paths.
    #[serde(default)]
    pub base_url: String,

    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Recurring status poll period; unset polls only once at load.
    #[serde(default)]
    pub poll_interval_secs: Option<u64>,

    #[serde(default = "default_dismiss_key")]
    pub dismiss_key: String,
}

fn default_settle_delay_ms() -> u64 {
    SETTLE_DELAY.as_millis() as u64
}

fn default_dismiss_key() -> String {
    ESCAPE.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            settle_delay_ms: default_settle_delay_ms(),
            poll_interval_secs: None,
            dismiss_key: default_dismiss_key(),
        }
    }
}

impl ClientConfig {
    /// A zero period counts as disabled.
    pub fn poll_interval(&self) -> Option<Duration> {
        self.poll_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Server the probe talks to when nothing else is configured (the Flask default).
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Get config directory (WATCHTOWER_CONFIG_DIR or platform default)
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub fn get_config_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("WATCHTOWER_CONFIG_DIR") {
        return std::path::PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return std::path::PathBuf::from(home).join("Library/Application Support/watchtower");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return std::path::PathBuf::from(xdg).join("watchtower");
        }
        if let Ok(home) = std::env::var("HOME") {
            return std::path::PathBuf::from(home).join(".config/watchtower");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return std::path::PathBuf::from(appdata).join("watchtower");
        }
    }

    // Fallback to current directory
    std::path::PathBuf::from(".")
}

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub fn load_config() -> anyhow::Result<ClientConfig> {
    let config_dir = get_config_dir();

    let config = ::config::Config::builder()
        // Start with defaults
        .set_default("base_url", DEFAULT_BASE_URL)?
        .set_default("settle_delay_ms", default_settle_delay_ms())?
        .set_default("dismiss_key", default_dismiss_key())?
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false),
        )
        // Override with environment variables (WATCHTOWER_BASE_URL, WATCHTOWER_POLL_INTERVAL_SECS, ...)
        .add_source(
            ::config::Environment::with_prefix("WATCHTOWER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
