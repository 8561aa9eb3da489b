//! Unified path management for Astro configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/astro/             # Config directory
//! ├── config.toml              # Client configuration
//! └── logs/                    # Application logs
//!     └── astro.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "astro";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves Astro's files, either under the platform config directory or
/// under an explicit base directory (tests, portable installs).
#[derive(Debug, Clone, Default)]
pub struct AstroPaths {
    base: Option<PathBuf>,
}

impl AstroPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the config directory (e.g. `~/.config/astro/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base() {
        let paths = AstroPaths::new(Some(Path::new("/tmp/astro-test")));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/astro-test/config.toml")
        );
        assert_eq!(paths.logs_dir().unwrap(), PathBuf::from("/tmp/astro-test/logs"));
    }
}
