//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml`, then applies environment overrides.
//! A missing or empty file yields the defaults.

use astro_core::config::AppConfig;
use astro_core::error::{AstroError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::paths::AstroPaths;

pub const ENV_API_URL: &str = "ASTRO_API_URL";
pub const ENV_SOCKET_URL: &str = "SOCKET_IO_URL";
pub const ENV_LOG_LEVEL: &str = "ASTRO_LOG_LEVEL";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: AstroPaths,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service reading from the platform config directory, or from
    /// `base_path` when given.
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            paths: AstroPaths::new(base_path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn paths(&self) -> &AstroPaths {
        &self.paths
    }

    /// Gets the configuration, loading it on first access.
    pub fn get_config(&self) -> Result<AppConfig> {
        if let Some(cached) = self.read_cache()? {
            return Ok(cached);
        }

        let env: HashMap<String, String> = std::env::vars().collect();
        let mut loaded = self.load_file()?;
        apply_env_overrides(&mut loaded, &env);

        let mut write_lock = self
            .config
            .write()
            .map_err(|e| AstroError::internal(format!("config cache poisoned: {e}")))?;
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn read_cache(&self) -> Result<Option<AppConfig>> {
        let read_lock = self
            .config
            .read()
            .map_err(|e| AstroError::internal(format!("config cache poisoned: {e}")))?;
        Ok(read_lock.clone())
    }

    fn load_file(&self) -> Result<AppConfig> {
        let config_path = self
            .paths
            .config_file()
            .map_err(|e| AstroError::config(e.to_string()))?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&config_path)?;
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        let config = toml::from_str(&content).map_err(|e| {
            AstroError::config(format!(
                "Failed to parse TOML from {:?}: {}",
                config_path, e
            ))
        })?;
        tracing::info!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Writes `config` to `config.toml`, creating the directory if needed.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let config_path = self
            .paths
            .config_file()
            .map_err(|e| AstroError::config(e.to_string()))?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, toml::to_string_pretty(config)?)?;
        self.invalidate_cache();
        Ok(())
    }
}

/// Applies `ASTRO_API_URL`, `SOCKET_IO_URL` and `ASTRO_LOG_LEVEL`.
pub fn apply_env_overrides(config: &mut AppConfig, env: &HashMap<String, String>) {
    let non_empty = |key: &str| env.get(key).filter(|v| !v.trim().is_empty()).cloned();

    if let Some(url) = non_empty(ENV_API_URL) {
        config.api.base_url = url;
    }
    if let Some(url) = non_empty(ENV_SOCKET_URL) {
        config.realtime.url = url;
    }
    if let Some(level) = non_empty(ENV_LOG_LEVEL) {
        config.logging.level = level;
    }
}
