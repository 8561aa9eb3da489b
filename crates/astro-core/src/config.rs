//! Client configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every section and
//! field is optional in the file; missing values fall back to the defaults
//! below.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::navigation::ScreenId;
use crate::realtime::RealtimeEndpoint;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_SOCKET_URL: &str = "http://localhost:8000";
pub const DEFAULT_SOCKET_PATH: &str = "/socket.io";
pub const DEFAULT_FALLBACK_SCREEN: &str = "MarsRoverImagesScreen";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub realtime: RealtimeConfig,
    pub ui: UiConfig,
    pub achievements: AchievementConfig,
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RealtimeConfig {
    pub url: String,
    pub path: String,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOCKET_URL.to_string(),
            path: DEFAULT_SOCKET_PATH.to_string(),
        }
    }
}

impl RealtimeConfig {
    pub fn endpoint(&self) -> RealtimeEndpoint {
        RealtimeEndpoint::new(&self.url, &self.path)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub snackbar_duration_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            snackbar_duration_ms: 1500,
        }
    }
}

impl UiConfig {
    pub fn snackbar_window(&self) -> Duration {
        Duration::from_millis(self.snackbar_duration_ms)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AchievementConfig {
    /// Screen shown once the achievement chain is drained
    pub fallback_screen: ScreenId,
}

impl Default for AchievementConfig {
    fn default() -> Self {
        Self {
            fallback_screen: ScreenId::new(DEFAULT_FALLBACK_SCREEN),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Write a daily-rolling log file next to the config
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.realtime.path, "/socket.io");
        assert_eq!(config.ui.snackbar_window(), Duration::from_millis(1500));
        assert_eq!(config.achievements.fallback_screen.as_str(), "MarsRoverImagesScreen");
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
[api]
base_url = "https://api.example.com"

[ui]
snackbar_duration_ms = 2000
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.ui.snackbar_duration_ms, 2000);
        assert_eq!(config.realtime, RealtimeConfig::default());
    }
}
