//! Authentication provider boundary.
//!
//! The provider itself (sign-in UI, token refresh, email verification) is an
//! external collaborator. The pipeline only consumes its state stream and a
//! couple of account operations.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::{AstroError, Result};

/// Error code the provider reports when a sensitive operation needs a fresh
/// sign-in.
pub const REQUIRES_RECENT_LOGIN: &str = "auth/requires-recent-login";

/// A signed-in user as seen by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub access_token: String,
    pub email: String,
    pub email_verified: bool,
}

/// Stream of auth state changes; `None` means signed out.
pub type AuthStateStream = BoxStream<'static, Option<AuthUser>>;

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Subscribes to auth state changes. Dropping the stream unsubscribes.
    fn subscribe(&self) -> AuthStateStream;

    /// Changes the signed-in user's password.
    async fn update_password(&self, new_password: &str) -> Result<()>;

    async fn sign_out(&self) -> Result<()>;
}

/// User-facing categories for a failed credential update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordUpdateFailure {
    /// The provider wants the user to sign in again first.
    RecentLoginRequired,
    /// Anything else, with the provider's message when it gave one.
    Other(Option<String>),
}

impl PasswordUpdateFailure {
    pub fn classify(error: &AstroError) -> Self {
        match error {
            AstroError::Auth { code, .. } if code == REQUIRES_RECENT_LOGIN => {
                PasswordUpdateFailure::RecentLoginRequired
            }
            AstroError::Auth { message, .. } if !message.is_empty() => {
                PasswordUpdateFailure::Other(Some(message.clone()))
            }
            _ => PasswordUpdateFailure::Other(None),
        }
    }
}
