//! Session domain model.

use serde::{Deserialize, Serialize};

use crate::achievement::Achievement;
use crate::notification::Notification;
use crate::user::{Role, UserProfile};

/// The authenticated user for the current run of the app.
///
/// Created on successful authentication and replaced wholesale on every
/// profile refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for backend calls
    pub token: String,
    pub profile: UserProfile,
}

impl Session {
    pub fn new(token: impl Into<String>, profile: UserProfile) -> Self {
        Self {
            token: token.into(),
            profile,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.profile.id
    }

    pub fn role(&self) -> &Role {
        &self.profile.role
    }

    pub fn is_guest(&self) -> bool {
        self.profile.role.is_guest()
    }

    /// Notification list, newest last.
    pub fn notifications(&self) -> &[Notification] {
        &self.profile.notifications
    }

    pub fn has_achievement(&self, achievement: Achievement) -> bool {
        self.profile.achievements.is_unlocked(achievement)
    }
}

/// Partial profile update returned by settings endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub text_speed: Option<u32>,
}

impl ProfilePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn text_speed(millis: u32) -> Self {
        Self {
            text_speed: Some(millis),
            ..Self::default()
        }
    }

    pub(crate) fn apply(&self, profile: &mut UserProfile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(text_speed) = self.text_speed {
            profile.text_speed = text_speed;
        }
    }
}
