//! Account settings: display name, reading speed, password and logout.

use astro_core::auth::{AuthProvider, PasswordUpdateFailure};
use astro_core::backend::BackendApi;
use astro_core::error::{AstroError, Result};
use astro_core::session::{ProfilePatch, SessionAction, SessionStore};
use astro_core::toast::{Toast, ToastPresenter};
use astro_core::user::TextSpeed;
use std::sync::Arc;

pub const TEXT_SPEED_UPDATED_TITLE: &str = "Your cosmic reading speed has been adjusted";
pub const TEXT_SPEED_UPDATED_BODY: &str =
    "Navigate through the cosmos at your own pace. Enjoy the journey, Commander!";
pub const PASSWORD_UPDATED_TITLE: &str = "Launch credentials updated successfully";
pub const RECENT_LOGIN_TITLE: &str = "Recent sign-in is required";
pub const RECENT_LOGIN_BODY: &str = "Please sign in again to proceed with the password update.";
pub const UPDATE_FAILED_TITLE: &str = "Update Failed";
pub const UPDATE_FAILED_BODY: &str = "An error occurred during password update.";

pub struct AccountUseCase {
    auth: Arc<dyn AuthProvider>,
    backend: Arc<dyn BackendApi>,
    store: Arc<SessionStore>,
    toasts: Arc<dyn ToastPresenter>,
}

impl AccountUseCase {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        backend: Arc<dyn BackendApi>,
        store: Arc<SessionStore>,
        toasts: Arc<dyn ToastPresenter>,
    ) -> Self {
        Self {
            auth,
            backend,
            store,
            toasts,
        }
    }

    /// Current reading speed, if signed in.
    pub fn text_speed(&self) -> Option<TextSpeed> {
        self.store
            .snapshot()
            .map(|session| TextSpeed::from_millis(session.profile.text_speed))
    }

    pub async fn update_name(&self, name: &str) -> Result<()> {
        let session = self.store.snapshot().ok_or(AstroError::NoSession)?;
        let stored = self
            .backend
            .update_user_name(&session.token, session.user_id(), name)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to update name"))?;

        self.store.dispatch(SessionAction::PatchProfile {
            user_id: session.user_id().to_string(),
            patch: ProfilePatch::name(stored),
        });
        Ok(())
    }

    pub async fn update_text_speed(&self, speed: TextSpeed) -> Result<()> {
        let session = self.store.snapshot().ok_or(AstroError::NoSession)?;
        let millis = self
            .backend
            .update_text_speed(&session.token, session.user_id(), speed)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to update text speed"))?;

        self.store.dispatch(SessionAction::PatchProfile {
            user_id: session.user_id().to_string(),
            patch: ProfilePatch::text_speed(millis),
        });
        self.toasts.show_toast(Toast::success(
            TEXT_SPEED_UPDATED_TITLE,
            TEXT_SPEED_UPDATED_BODY,
        ));
        Ok(())
    }

    /// Changes the password through the auth provider. Every outcome is
    /// reported as a toast; the error is also returned.
    pub async fn update_password(&self, new_password: &str) -> Result<()> {
        match self.auth.update_password(new_password).await {
            Ok(()) => {
                let name = self
                    .store
                    .snapshot()
                    .map(|session| session.profile.name.clone())
                    .unwrap_or_default();
                self.toasts.show_toast(Toast::success(
                    PASSWORD_UPDATED_TITLE,
                    format!(
                        "Your account is now fortified with a new password. Safe travels, Commander {}!",
                        name
                    ),
                ));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "password update failed");
                let toast = match PasswordUpdateFailure::classify(&e) {
                    PasswordUpdateFailure::RecentLoginRequired => {
                        Toast::error(RECENT_LOGIN_TITLE, RECENT_LOGIN_BODY)
                    }
                    PasswordUpdateFailure::Other(message) => Toast::error(
                        UPDATE_FAILED_TITLE,
                        message.unwrap_or_else(|| UPDATE_FAILED_BODY.to_string()),
                    ),
                };
                self.toasts.show_toast(toast);
                Err(e)
            }
        }
    }

    /// Signs out with the provider, then clears the session.
    pub async fn logout(&self) -> Result<()> {
        self.auth.sign_out().await?;
        self.store.dispatch(SessionAction::LoggedOut);
        tracing::info!("logged out");
        Ok(())
    }
}
