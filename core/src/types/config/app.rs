use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// User-facing application configuration, persisted as config.toml.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub views: ViewsConfig,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), AppConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.bridge.request_timeout_ms == 0 {
            errors.push("request_timeout_ms must be at least 1".to_string());
        }

        if self.bridge.channel_capacity == 0 {
            errors.push("channel_capacity must be at least 1".to_string());
        }

        if self.views.recent_limit == 0 {
            errors.push("recent_limit must be at least 1".to_string());
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        Self {
            bridge: BridgeConfig {
                request_timeout_ms: if self.bridge.request_timeout_ms == 0 {
                    defaults.bridge.request_timeout_ms
                } else {
                    self.bridge.request_timeout_ms
                },
                channel_capacity: if self.bridge.channel_capacity == 0 {
                    defaults.bridge.channel_capacity
                } else {
                    self.bridge.channel_capacity
                },
            },
            views: ViewsConfig {
                recent_limit: if self.views.recent_limit == 0 {
                    defaults.views.recent_limit
                } else {
                    self.views.recent_limit
                },
            },
        }
    }
}

/// Settings for the request/response boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Upper bound on a single round trip to the store worker.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl BridgeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

/// List view settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewsConfig {
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_channel_capacity() -> usize {
    64
}

fn default_recent_limit() -> usize {
    crate::views::RECENT_LIMIT
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
