//! Realtime event channel.
//!
//! Follows the session store: a new session (or a changed token) replaces
//! the connection, a logout closes it. At most one connection is live at any
//! time and it is owned by a [`ConnectionHandle`].

use astro_core::notification::NotificationEvent;
use astro_core::realtime::{RealtimeEndpoint, RealtimeTransport, SETUP_EVENT};
use astro_core::session::{SessionSnapshot, SessionStore};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Receives decoded events. Each call runs on its own task.
#[async_trait]
pub trait RealtimeEventHandler: Send + Sync {
    async fn on_event(&self, event: NotificationEvent);
}

/// Identity a connection was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ConnectionKey {
    token: String,
    user_id: String,
}

impl ConnectionKey {
    fn from_snapshot(snapshot: &SessionSnapshot) -> Option<Self> {
        snapshot.as_ref().map(|session| Self {
            token: session.token.clone(),
            user_id: session.user_id().to_string(),
        })
    }
}

/// The live connection task and the means to stop it.
struct ConnectionHandle {
    key: ConnectionKey,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ConnectionHandle {
    /// Stops the connection task and waits for it to close the socket.
    async fn close(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!(user_id = %self.key.user_id, error = %e, "connection task failed");
        }
    }
}

pub struct RealtimeChannel {
    transport: Arc<dyn RealtimeTransport>,
    endpoint: RealtimeEndpoint,
    store: Arc<SessionStore>,
    handler: Arc<dyn RealtimeEventHandler>,
    tracker: TaskTracker,
}

impl RealtimeChannel {
    pub fn new(
        transport: Arc<dyn RealtimeTransport>,
        endpoint: RealtimeEndpoint,
        store: Arc<SessionStore>,
        handler: Arc<dyn RealtimeEventHandler>,
        tracker: TaskTracker,
    ) -> Self {
        Self {
            transport,
            endpoint,
            store,
            handler,
            tracker,
        }
    }

    /// Tracks the session until `scope` is cancelled, then closes whatever
    /// connection is open.
    pub async fn run(&self, scope: CancellationToken) {
        let mut sessions = self.store.subscribe();
        let mut current: Option<ConnectionHandle> = None;

        loop {
            let wanted = ConnectionKey::from_snapshot(&sessions.borrow_and_update());
            let keep = matches!((&current, &wanted), (Some(handle), Some(key)) if handle.key == *key);
            if !keep {
                if let Some(handle) = current.take() {
                    tracing::info!(user_id = %handle.key.user_id, "closing realtime connection");
                    handle.close().await;
                }
                if let Some(key) = wanted {
                    current = Some(self.open(key, scope.child_token()));
                }
            }

            tokio::select! {
                _ = scope.cancelled() => break,
                changed = sessions.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        if let Some(handle) = current.take() {
            handle.close().await;
        }
        tracing::debug!("realtime channel stopped");
    }

    fn open(&self, key: ConnectionKey, cancel: CancellationToken) -> ConnectionHandle {
        tracing::info!(user_id = %key.user_id, "opening realtime connection");
        let task = tokio::spawn(run_connection(
            self.transport.clone(),
            self.endpoint.clone(),
            key.user_id.clone(),
            self.handler.clone(),
            self.tracker.clone(),
            cancel.clone(),
        ));
        ConnectionHandle { key, cancel, task }
    }
}

async fn run_connection(
    transport: Arc<dyn RealtimeTransport>,
    endpoint: RealtimeEndpoint,
    user_id: String,
    handler: Arc<dyn RealtimeEventHandler>,
    tracker: TaskTracker,
    cancel: CancellationToken,
) {
    let connected = tokio::select! {
        _ = cancel.cancelled() => return,
        connected = transport.connect(&endpoint) => connected,
    };
    let mut connection = match connected {
        Ok(connection) => connection,
        Err(e) => {
            tracing::error!(%user_id, error = %e, "realtime connect failed");
            return;
        }
    };

    if let Err(e) = connection
        .emit(SETUP_EVENT, Value::String(user_id.clone()))
        .await
    {
        tracing::error!(%user_id, error = %e, "realtime setup failed");
    }

    loop {
        let next = tokio::select! {
            _ = cancel.cancelled() => break,
            next = connection.next_event() => next,
        };
        match next {
            Some(Ok(raw)) => match NotificationEvent::from_wire(&raw.name, &raw.payload) {
                Some(event) => {
                    let handler = handler.clone();
                    tracker.spawn(async move { handler.on_event(event).await });
                }
                None => {
                    tracing::debug!(event = %raw.name, "ignoring unrecognized event");
                }
            },
            Some(Err(e)) => {
                tracing::warn!(%user_id, error = %e, "realtime receive failed");
                break;
            }
            None => {
                tracing::info!(%user_id, "realtime connection ended by server");
                break;
            }
        }
    }

    if let Err(e) = connection.close().await {
        tracing::debug!(%user_id, error = %e, "realtime close failed");
    }
}
