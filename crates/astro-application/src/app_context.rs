//! Application root.
//!
//! Owns the session store, the snackbar and the cancellation scope every
//! background task runs under, and wires the components to the external
//! ports.

use astro_core::auth::AuthProvider;
use astro_core::backend::BackendApi;
use astro_core::config::AppConfig;
use astro_core::navigation::Navigator;
use astro_core::notification::Snackbar;
use astro_core::realtime::RealtimeTransport;
use astro_core::session::SessionStore;
use astro_core::toast::ToastPresenter;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::account_usecase::AccountUseCase;
use crate::achievement_router::AchievementRouter;
use crate::auth_bridge::AuthBridge;
use crate::notification_handler::NotificationHandler;
use crate::realtime_channel::RealtimeChannel;

/// External collaborators the pipeline talks to.
#[derive(Clone)]
pub struct Ports {
    pub auth: Arc<dyn AuthProvider>,
    pub backend: Arc<dyn BackendApi>,
    pub transport: Arc<dyn RealtimeTransport>,
    pub navigator: Arc<dyn Navigator>,
    pub toasts: Arc<dyn ToastPresenter>,
}

pub struct AppContext {
    store: Arc<SessionStore>,
    snackbar: Arc<Snackbar>,
    scope: CancellationToken,
    tracker: TaskTracker,
    auth_bridge: Arc<AuthBridge>,
    channel: Arc<RealtimeChannel>,
    notifications: Arc<NotificationHandler>,
    achievements: AchievementRouter,
    account: AccountUseCase,
}

impl AppContext {
    pub fn new(config: &AppConfig, ports: Ports) -> Self {
        let store = Arc::new(SessionStore::new());
        let scope = CancellationToken::new();
        let tracker = TaskTracker::new();
        let snackbar = Arc::new(Snackbar::new(config.ui.snackbar_window(), scope.clone()));

        let notifications = Arc::new(NotificationHandler::new(
            ports.backend.clone(),
            store.clone(),
            snackbar.clone(),
            scope.clone(),
        ));
        let auth_bridge = Arc::new(AuthBridge::new(
            ports.auth.clone(),
            ports.backend.clone(),
            store.clone(),
        ));
        let channel = Arc::new(RealtimeChannel::new(
            ports.transport.clone(),
            config.realtime.endpoint(),
            store.clone(),
            notifications.clone(),
            tracker.clone(),
        ));
        let achievements = AchievementRouter::new(
            ports.backend.clone(),
            store.clone(),
            ports.navigator.clone(),
            config.achievements.fallback_screen.clone(),
        );
        let account = AccountUseCase::new(ports.auth, ports.backend, store.clone(), ports.toasts);

        Self {
            store,
            snackbar,
            scope,
            tracker,
            auth_bridge,
            channel,
            notifications,
            achievements,
            account,
        }
    }

    /// Spawns the auth bridge and the realtime channel.
    pub fn start(&self) {
        let bridge = self.auth_bridge.clone();
        let scope = self.scope.child_token();
        self.tracker.spawn(async move { bridge.run(scope).await });

        let channel = self.channel.clone();
        let scope = self.scope.child_token();
        self.tracker.spawn(async move { channel.run(scope).await });
        tracing::info!("astro pipeline started");
    }

    /// Cancels all background work and waits for it to finish. Results that
    /// arrive afterwards are dropped.
    pub async fn shutdown(&self) {
        self.scope.cancel();
        self.tracker.close();
        self.tracker.wait().await;
        tracing::info!("astro pipeline stopped");
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn snackbar(&self) -> &Arc<Snackbar> {
        &self.snackbar
    }

    pub fn scope(&self) -> &CancellationToken {
        &self.scope
    }

    pub fn notifications(&self) -> &Arc<NotificationHandler> {
        &self.notifications
    }

    pub fn achievements(&self) -> &AchievementRouter {
        &self.achievements
    }

    pub fn account(&self) -> &AccountUseCase {
        &self.account
    }
}
