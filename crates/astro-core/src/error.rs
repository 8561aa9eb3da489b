//! Error types for the Astro client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Astro client.
///
/// Every failure in the pipeline is terminal for the single operation that
/// produced it: callers log it (or map it to a toast) and leave state as it was.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AstroError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Error reported by the authentication provider
    #[error("Auth error [{code}]: {message}")]
    Auth { code: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", "engine.io", ...
        message: String,
    },

    /// Realtime transport failure (socket closed, handshake rejected, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// An operation needed an authenticated session and none is active.
    #[error("No active session")]
    NoSession,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AstroError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Backend error
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    /// Creates an Auth error
    pub fn auth(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Auth {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a network or backend failure (silent-fail category)
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Backend { .. })
    }

    /// Check if this is an auth provider error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Returns the auth provider error code, if any.
    pub fn auth_code(&self) -> Option<&str> {
        match self {
            Self::Auth { code, .. } => Some(code),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AstroError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AstroError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AstroError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for AstroError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, AstroError>`.
pub type Result<T> = std::result::Result<T, AstroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_errors_are_classified() {
        assert!(AstroError::network("timed out").is_remote());
        assert!(AstroError::backend(500, "boom").is_remote());
        assert!(!AstroError::NoSession.is_remote());
    }

    #[test]
    fn test_auth_code() {
        let err = AstroError::auth("auth/requires-recent-login", "stale");
        assert!(err.is_auth());
        assert_eq!(err.auth_code(), Some("auth/requires-recent-login"));
        assert_eq!(AstroError::NoSession.auth_code(), None);
    }

    #[test]
    fn test_json_error_conversion() {
        let err: AstroError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.is_serialization());
        assert!(err.to_string().starts_with("Serialization error: JSON"));
    }
}
