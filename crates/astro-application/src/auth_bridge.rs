//! Auth bridge: turns auth provider state into a hydrated session.

use astro_core::auth::{AuthProvider, AuthUser};
use astro_core::backend::BackendApi;
use astro_core::error::Result;
use astro_core::session::{Session, SessionAction, SessionStore};
use futures::StreamExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Listens to the auth provider and installs the backend's user record as
/// the session.
///
/// A signed-out or unverified state is ignored; logging out is an explicit
/// account operation, not something the bridge infers.
pub struct AuthBridge {
    auth: Arc<dyn AuthProvider>,
    backend: Arc<dyn BackendApi>,
    store: Arc<SessionStore>,
}

impl AuthBridge {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        backend: Arc<dyn BackendApi>,
        store: Arc<SessionStore>,
    ) -> Self {
        Self {
            auth,
            backend,
            store,
        }
    }

    /// Consumes auth state changes until `scope` is cancelled or the provider
    /// ends the stream. Items are handled strictly one after another.
    pub async fn run(&self, scope: CancellationToken) {
        let mut states = self.auth.subscribe();
        loop {
            let state = tokio::select! {
                _ = scope.cancelled() => break,
                state = states.next() => state,
            };
            let Some(user) = state else {
                tracing::debug!("auth state stream ended");
                break;
            };

            tokio::select! {
                _ = scope.cancelled() => break,
                _ = self.handle_auth_state(user) => {}
            }
        }
        tracing::debug!("auth bridge stopped");
    }

    /// Handles one auth state item. Returns `true` if a session was installed.
    pub async fn handle_auth_state(&self, user: Option<AuthUser>) -> bool {
        let user = match user {
            Some(user) if user.email_verified => user,
            Some(user) => {
                tracing::debug!(email = %user.email, "ignoring unverified user");
                return false;
            }
            None => {
                tracing::debug!("auth provider reports no user");
                return false;
            }
        };

        match self.hydrate(&user).await {
            Ok(session) => {
                tracing::info!(user_id = %session.user_id(), "session established");
                self.store.dispatch(SessionAction::LoggedIn(session));
                true
            }
            Err(e) => {
                tracing::error!(email = %user.email, error = %e, "failed to load current user");
                false
            }
        }
    }

    async fn hydrate(&self, user: &AuthUser) -> Result<Session> {
        let profile = self.backend.current_user(&user.access_token).await?;
        Ok(Session::new(user.access_token.clone(), profile))
    }
}
