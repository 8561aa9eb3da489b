//! Transient acknowledgment shown when a notification arrives.
//!
//! The snackbar is a two-state machine driven through one serialized dispatch
//! point (the watch channel's write lock). A newer message always replaces an
//! older one and restarts the display window; an expiry timer only clears the
//! message it was armed for.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Default display window.
pub const DEFAULT_SNACKBAR_WINDOW: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransientState {
    #[default]
    Idle,
    Showing {
        message: String,
        generation: u64,
        expires_at: Instant,
    },
}

impl TransientState {
    pub fn is_visible(&self) -> bool {
        matches!(self, TransientState::Showing { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            TransientState::Showing { message, .. } => Some(message),
            TransientState::Idle => None,
        }
    }
}

pub struct Snackbar {
    state: watch::Sender<TransientState>,
    generation: AtomicU64,
    window: Duration,
    scope: CancellationToken,
}

impl Snackbar {
    /// Creates a snackbar whose expiry timers stop when `scope` is cancelled.
    pub fn new(window: Duration, scope: CancellationToken) -> Self {
        let (state, _) = watch::channel(TransientState::Idle);
        Self {
            state,
            generation: AtomicU64::new(0),
            window,
            scope,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Stages `message` and makes it visible for one window.
    ///
    /// Must be called from within a Tokio runtime. Returns the generation
    /// assigned to this display.
    pub fn show(&self, message: impl Into<String>) -> u64 {
        let message = message.into();
        let expires_at = Instant::now() + self.window;
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
            *state = TransientState::Showing {
                message,
                generation,
                expires_at,
            };
        });
        tracing::debug!(generation, "snackbar shown");

        let state = self.state.clone();
        let scope = self.scope.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = scope.cancelled() => {}
                _ = tokio::time::sleep_until(expires_at) => {
                    state.send_if_modified(|current| match current {
                        TransientState::Showing { generation: shown, .. } if *shown == generation => {
                            *current = TransientState::Idle;
                            true
                        }
                        _ => false,
                    });
                }
            }
        });

        generation
    }

    /// Hides whatever is showing.
    pub fn dismiss(&self) {
        self.state.send_if_modified(|current| {
            let was_visible = current.is_visible();
            *current = TransientState::Idle;
            was_visible
        });
    }

    pub fn current(&self) -> TransientState {
        self.state.borrow().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().is_visible()
    }

    pub fn subscribe(&self) -> watch::Receiver<TransientState> {
        self.state.subscribe()
    }
}
