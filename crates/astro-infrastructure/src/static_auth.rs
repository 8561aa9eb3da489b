//! Token-based auth provider for headless runs.
//!
//! Holds a pre-issued access token instead of driving an interactive sign-in.
//! The state stream emits the current user immediately and then every change
//! (sign-out, token replacement).

use astro_core::auth::{AuthProvider, AuthStateStream, AuthUser};
use astro_core::error::{AstroError, Result};
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use tokio::sync::watch;

pub struct StaticTokenAuthProvider {
    state: watch::Sender<Option<AuthUser>>,
}

impl StaticTokenAuthProvider {
    /// A provider signed in with `token`. The user counts as verified.
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        let user = AuthUser {
            access_token: token.into(),
            email: email.into(),
            email_verified: true,
        };
        let (state, _) = watch::channel(Some(user));
        Self { state }
    }

    /// A provider with nobody signed in.
    pub fn signed_out() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }

    /// Replaces the current user, as a token refresh or re-login would.
    pub fn set_user(&self, user: Option<AuthUser>) {
        self.state.send_replace(user);
    }

    pub fn current(&self) -> Option<AuthUser> {
        self.state.borrow().clone()
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuthProvider {
    fn subscribe(&self) -> AuthStateStream {
        let rx = self.state.subscribe();
        stream::unfold((rx, true), |(mut rx, first)| async move {
            if !first {
                rx.changed().await.ok()?;
            }
            let user = rx.borrow_and_update().clone();
            Some((user, (rx, false)))
        })
        .boxed()
    }

    async fn update_password(&self, _new_password: &str) -> Result<()> {
        Err(AstroError::auth(
            "auth/operation-not-allowed",
            "Password changes are not supported with a static access token",
        ))
    }

    async fn sign_out(&self) -> Result<()> {
        tracing::info!("signing out static token user");
        self.state.send_replace(None);
        Ok(())
    }
}
