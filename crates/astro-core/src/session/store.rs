//! Reducer-style session store.
//!
//! The store is one watch slot holding an immutable snapshot. Every mutation
//! goes through [`SessionStore::dispatch`], which applies [`reduce`] under the
//! slot's write lock, so concurrent writers are serialized and readers never
//! observe a half-applied update.

use std::sync::Arc;
use tokio::sync::watch;

use super::model::{ProfilePatch, Session};
use crate::achievement::Achievement;
use crate::notification::Notification;

/// Current session snapshot, `None` when logged out.
pub type SessionSnapshot = Option<Arc<Session>>;

/// State transitions of the session store.
///
/// Partial updates name the user they were computed for; they are dropped if
/// a different user (or nobody) is signed in by the time they are applied.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Replace the whole session.
    LoggedIn(Session),
    LoggedOut,
    /// Overwrite the notification list with the backend's authoritative copy.
    ReplaceNotifications {
        user_id: String,
        notifications: Vec<Notification>,
    },
    SetAchievement {
        user_id: String,
        achievement: Achievement,
        unlocked: bool,
    },
    PatchProfile {
        user_id: String,
        patch: ProfilePatch,
    },
}

impl SessionAction {
    fn kind(&self) -> &'static str {
        match self {
            SessionAction::LoggedIn(_) => "logged_in",
            SessionAction::LoggedOut => "logged_out",
            SessionAction::ReplaceNotifications { .. } => "replace_notifications",
            SessionAction::SetAchievement { .. } => "set_achievement",
            SessionAction::PatchProfile { .. } => "patch_profile",
        }
    }
}

/// Pure transition function: produces the next snapshot from the current one.
pub fn reduce(state: &SessionSnapshot, action: SessionAction) -> SessionSnapshot {
    match action {
        SessionAction::LoggedIn(session) => Some(Arc::new(session)),
        SessionAction::LoggedOut => None,
        SessionAction::ReplaceNotifications {
            user_id,
            notifications,
        } => update_for(state, &user_id, |session| {
            session.profile.notifications = notifications;
        }),
        SessionAction::SetAchievement {
            user_id,
            achievement,
            unlocked,
        } => update_for(state, &user_id, |session| {
            session.profile.achievements.set(achievement, unlocked);
        }),
        SessionAction::PatchProfile { user_id, patch } => update_for(state, &user_id, |session| {
            patch.apply(&mut session.profile);
        }),
    }
}

fn update_for(
    state: &SessionSnapshot,
    user_id: &str,
    update: impl FnOnce(&mut Session),
) -> SessionSnapshot {
    match state {
        Some(current) if current.user_id() == user_id => {
            let mut next = Session::clone(current);
            update(&mut next);
            Some(Arc::new(next))
        }
        _ => state.clone(),
    }
}

/// Owner of the single active session.
#[derive(Debug)]
pub struct SessionStore {
    state: watch::Sender<SessionSnapshot>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }

    /// Applies `action`. Returns `true` if the snapshot changed.
    ///
    /// Subscribers are only woken when the resulting session differs from the
    /// previous one.
    pub fn dispatch(&self, action: SessionAction) -> bool {
        let kind = action.kind();
        let changed = self.state.send_if_modified(|current| {
            let next = reduce(current, action);
            let changed = match (&*current, &next) {
                (None, None) => false,
                (Some(a), Some(b)) => **a != **b,
                _ => true,
            };
            if changed {
                *current = next;
            }
            changed
        });
        tracing::debug!(action = kind, changed, "session action dispatched");
        changed
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }
}
