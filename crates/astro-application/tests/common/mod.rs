#![allow(dead_code)]

use astro_core::achievement::Achievement;
use astro_core::auth::{AuthProvider, AuthStateStream, AuthUser};
use astro_core::backend::BackendApi;
use astro_core::error::{AstroError, Result};
use astro_core::navigation::{NavigationTarget, Navigator};
use astro_core::notification::{Notification, NotificationEvent};
use astro_core::realtime::{RawEvent, RealtimeConnection, RealtimeEndpoint, RealtimeTransport};
use astro_core::session::Session;
use astro_core::toast::{Toast, ToastPresenter};
use astro_core::user::{Role, TextSpeed, UserProfile};
use astro_application::RealtimeEventHandler;
use async_trait::async_trait;
use futures::StreamExt;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

pub fn profile(id: &str, role: Role) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        name: "Vega".to_string(),
        role,
        text_speed: 50,
        ..Default::default()
    }
}

pub fn session(id: &str, token: &str, role: Role) -> Session {
    Session::new(token, profile(id, role))
}

pub fn verified(token: &str) -> AuthUser {
    AuthUser {
        access_token: token.to_string(),
        email: "commander@example.com".to_string(),
        email_verified: true,
    }
}

/// Polls `condition` until it holds or a second has passed.
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

/// Lets spawned tasks run without advancing time.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

// Mock BackendApi for testing
#[derive(Default)]
pub struct MockBackend {
    /// Profiles served by `current_user`, keyed by token.
    pub profiles: Mutex<HashMap<String, UserProfile>>,
    /// Server-side notification list; `increment_notifications` appends to it.
    pub notifications: Mutex<Vec<Notification>>,
    /// When set, `increment_notifications` returns this instead.
    pub notifications_override: Mutex<Option<Vec<Notification>>>,
    pub notification_delay: Mutex<Option<Duration>>,
    /// Per-call delays, consumed in call order before `notification_delay`.
    pub notification_delays: Mutex<VecDeque<Duration>>,
    pub fail_current_user: Mutex<bool>,
    pub fail_notifications: Mutex<bool>,
    pub fail_unlock: Mutex<bool>,
    pub fail_update: Mutex<bool>,
    pub current_user_calls: AtomicUsize,
    pub increment_calls: AtomicUsize,
    pub unlock_calls: AtomicUsize,
}

impl MockBackend {
    pub fn with_profile(token: &str, profile: UserProfile) -> Self {
        let backend = Self::default();
        backend
            .profiles
            .lock()
            .unwrap()
            .insert(token.to_string(), profile);
        backend
    }

    pub fn fail_unlock(&self) {
        *self.fail_unlock.lock().unwrap() = true;
    }

    pub fn fail_notifications(&self) {
        *self.fail_notifications.lock().unwrap() = true;
    }
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn current_user(&self, token: &str) -> Result<UserProfile> {
        self.current_user_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_current_user.lock().unwrap() {
            return Err(AstroError::backend(500, "boom"));
        }
        self.profiles
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| AstroError::backend(401, "unknown token"))
    }

    async fn increment_notifications(
        &self,
        _token: &str,
        _self_id: &str,
        source_user_id: &str,
        message: &str,
    ) -> Result<Vec<Notification>> {
        self.increment_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self
            .notification_delays
            .lock()
            .unwrap()
            .pop_front()
            .or(*self.notification_delay.lock().unwrap());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_notifications.lock().unwrap() {
            return Err(AstroError::network("connection reset"));
        }
        if let Some(list) = self.notifications_override.lock().unwrap().clone() {
            return Ok(list);
        }
        let mut list = self.notifications.lock().unwrap();
        list.push(Notification::new(source_user_id, message));
        Ok(list.clone())
    }

    async fn unlock_badge(
        &self,
        _token: &str,
        _self_id: &str,
        _achievement: Achievement,
    ) -> Result<bool> {
        self.unlock_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_unlock.lock().unwrap() {
            return Err(AstroError::backend(503, "unavailable"));
        }
        Ok(true)
    }

    async fn update_user_name(&self, _token: &str, _self_id: &str, name: &str) -> Result<String> {
        if *self.fail_update.lock().unwrap() {
            return Err(AstroError::backend(500, "boom"));
        }
        Ok(name.trim().to_string())
    }

    async fn update_text_speed(
        &self,
        _token: &str,
        _self_id: &str,
        speed: TextSpeed,
    ) -> Result<u32> {
        if *self.fail_update.lock().unwrap() {
            return Err(AstroError::backend(500, "boom"));
        }
        Ok(match speed {
            TextSpeed::Slow => TextSpeed::SLOW_MILLIS,
            TextSpeed::Medium => TextSpeed::MEDIUM_MILLIS,
            TextSpeed::Fast => 10,
        })
    }
}

// Mock AuthProvider for testing
pub struct MockAuth {
    state: watch::Sender<Option<AuthUser>>,
    pub password_error: Mutex<Option<AstroError>>,
    pub sign_out_calls: AtomicUsize,
}

impl MockAuth {
    pub fn new(initial: Option<AuthUser>) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            password_error: Mutex::new(None),
            sign_out_calls: AtomicUsize::new(0),
        }
    }

    pub fn emit(&self, user: Option<AuthUser>) {
        self.state.send_replace(user);
    }
}

#[async_trait]
impl AuthProvider for MockAuth {
    fn subscribe(&self) -> AuthStateStream {
        let rx = self.state.subscribe();
        futures::stream::unfold((rx, true), |(mut rx, first)| async move {
            if !first {
                rx.changed().await.ok()?;
            }
            let user = rx.borrow_and_update().clone();
            Some((user, (rx, false)))
        })
        .boxed()
    }

    async fn update_password(&self, _new_password: &str) -> Result<()> {
        match self.password_error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn sign_out(&self) -> Result<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(None);
        Ok(())
    }
}

/// Shared record of what the mock transport saw.
#[derive(Default)]
pub struct TransportLog {
    pub connects: AtomicUsize,
    pub closes: AtomicUsize,
    pub emits: Mutex<Vec<(usize, String, Value)>>,
    /// Server side of each connection, by connection index.
    pub servers: Mutex<Vec<mpsc::UnboundedSender<RawEvent>>>,
}

impl TransportLog {
    pub fn live(&self) -> usize {
        self.connects.load(Ordering::SeqCst) - self.closes.load(Ordering::SeqCst)
    }

    pub fn push(&self, connection: usize, event: RawEvent) {
        let servers = self.servers.lock().unwrap();
        servers[connection].send(event).unwrap();
    }

    pub fn emits(&self) -> Vec<(usize, String, Value)> {
        self.emits.lock().unwrap().clone()
    }
}

// Mock RealtimeTransport for testing
#[derive(Default)]
pub struct MockTransport {
    pub log: Arc<TransportLog>,
}

#[async_trait]
impl RealtimeTransport for MockTransport {
    async fn connect(&self, _endpoint: &RealtimeEndpoint) -> Result<Box<dyn RealtimeConnection>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let index = {
            let mut servers = self.log.servers.lock().unwrap();
            servers.push(tx);
            servers.len() - 1
        };
        self.log.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockConnection {
            index,
            inbound: rx,
            log: self.log.clone(),
        }))
    }
}

struct MockConnection {
    index: usize,
    inbound: mpsc::UnboundedReceiver<RawEvent>,
    log: Arc<TransportLog>,
}

#[async_trait]
impl RealtimeConnection for MockConnection {
    async fn emit(&mut self, event: &str, payload: Value) -> Result<()> {
        self.log
            .emits
            .lock()
            .unwrap()
            .push((self.index, event.to_string(), payload));
        Ok(())
    }

    async fn next_event(&mut self) -> Option<Result<RawEvent>> {
        self.inbound.recv().await.map(Ok)
    }

    async fn close(&mut self) -> Result<()> {
        self.log.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub targets: Mutex<Vec<NavigationTarget>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: NavigationTarget) {
        self.targets.lock().unwrap().push(target);
    }
}

#[derive(Default)]
pub struct RecordingToasts {
    pub toasts: Mutex<Vec<Toast>>,
}

impl RecordingToasts {
    pub fn last(&self) -> Option<Toast> {
        self.toasts.lock().unwrap().last().cloned()
    }
}

impl ToastPresenter for RecordingToasts {
    fn show_toast(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

#[derive(Default)]
pub struct RecordingHandler {
    pub events: Mutex<Vec<NotificationEvent>>,
}

#[async_trait]
impl RealtimeEventHandler for RecordingHandler {
    async fn on_event(&self, event: NotificationEvent) {
        self.events.lock().unwrap().push(event);
    }
}
