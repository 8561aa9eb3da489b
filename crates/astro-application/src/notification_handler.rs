//! Handles inbound social notification events.

use astro_core::backend::BackendApi;
use astro_core::error::{AstroError, Result};
use astro_core::notification::{Notification, NotificationEvent, Snackbar};
use astro_core::session::{SessionAction, SessionStore};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::realtime_channel::RealtimeEventHandler;

/// Outcome of one handled event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// The list was replaced and `message` is showing.
    Shown { message: String, count: usize },
    /// The backend returned an empty list; the stored list is now empty and
    /// nothing is shown.
    Empty,
    /// The scope was cancelled, or the session changed, before the backend
    /// answered. Nothing was stored or shown.
    Abandoned,
}

/// Records a notification with the backend, stores the returned list and
/// surfaces the newest message in the snackbar.
pub struct NotificationHandler {
    backend: Arc<dyn BackendApi>,
    store: Arc<SessionStore>,
    snackbar: Arc<Snackbar>,
    scope: CancellationToken,
}

impl NotificationHandler {
    pub fn new(
        backend: Arc<dyn BackendApi>,
        store: Arc<SessionStore>,
        snackbar: Arc<Snackbar>,
        scope: CancellationToken,
    ) -> Self {
        Self {
            backend,
            store,
            snackbar,
            scope,
        }
    }

    pub async fn handle_event(&self, source_user_id: &str, message: &str) -> Result<HandleOutcome> {
        let session = self.store.snapshot().ok_or(AstroError::NoSession)?;
        let self_id = session.user_id().to_string();

        let call = self.backend.increment_notifications(
            &session.token,
            &self_id,
            source_user_id,
            message,
        );
        let notifications: Vec<Notification> = tokio::select! {
            _ = self.scope.cancelled() => {
                tracing::debug!(source_user_id, "notification update abandoned");
                return Ok(HandleOutcome::Abandoned);
            }
            result = call => result?,
        };

        // The response belongs to the session that issued the call.
        let still_current = self
            .store
            .snapshot()
            .is_some_and(|current| current.user_id() == self_id && current.token == session.token);
        if !still_current {
            tracing::debug!(source_user_id, "session changed, notification update abandoned");
            return Ok(HandleOutcome::Abandoned);
        }

        let latest = notifications.last().map(|n| n.message.clone());
        let count = notifications.len();
        self.store.dispatch(SessionAction::ReplaceNotifications {
            user_id: self_id,
            notifications,
        });

        match latest {
            Some(message) => {
                self.snackbar.show(message.clone());
                Ok(HandleOutcome::Shown { message, count })
            }
            None => Ok(HandleOutcome::Empty),
        }
    }
}

#[async_trait]
impl RealtimeEventHandler for NotificationHandler {
    async fn on_event(&self, event: NotificationEvent) {
        match self.handle_event(&event.source_user_id, &event.message).await {
            Ok(outcome) => {
                tracing::debug!(kind = %event.kind.wire_name(), ?outcome, "notification handled");
            }
            Err(AstroError::NoSession) => {
                tracing::warn!(kind = %event.kind.wire_name(), "notification dropped, no session");
            }
            Err(e) => {
                tracing::error!(kind = %event.kind.wire_name(), error = %e, "notification update failed");
            }
        }
    }
}
