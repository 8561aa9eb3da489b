//! UserProfile domain model.
//!
//! The hydrated user record returned by the backend's "current user" call.
//! Field names follow the backend's JSON, including its historical spellings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::achievement::AchievementFlags;
use crate::notification::Notification;

/// Account role.
///
/// Guests have no backend-persisted account: their progress lives in local
/// state only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Subscriber,
    Guest,
    /// A role this client does not know about, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl Role {
    pub fn is_guest(&self) -> bool {
        matches!(self, Role::Guest)
    }
}

/// User profile domain model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    /// Push notification token registered for this device
    #[serde(rename = "noficationToken", default, skip_serializing_if = "Option::is_none")]
    pub notification_token: Option<String>,
    /// Read notification history
    #[serde(rename = "nofications", default)]
    pub notification_history: Vec<Notification>,
    /// Unread notifications, newest last
    #[serde(rename = "newNotificationsCount", default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub days_in_space: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub allies: Vec<String>,
    #[serde(default)]
    pub explorers: Vec<String>,
    #[serde(default)]
    pub blockeds: Vec<String>,
    /// Dialogue reveal delay in milliseconds per character
    #[serde(default)]
    pub text_speed: u32,
    #[serde(default)]
    pub viewed_rovers: Vec<String>,
    #[serde(default)]
    pub viewed_rover_cameras: Vec<String>,
    #[serde(default)]
    pub viewed_rover_date_types: Vec<String>,
    #[serde(flatten)]
    pub achievements: AchievementFlags,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievement::Achievement;

    #[test]
    fn test_deserialize_backend_record() {
        let json = serde_json::json!({
            "_id": "u-1",
            "email": "vega@example.com",
            "role": "subscriber",
            "noficationToken": "push-1",
            "nofications": [],
            "newNotificationsCount": [{"userId": "u-2", "message": "liked your post"}],
            "xp": 420,
            "rank": "Cadet",
            "bio": "",
            "profileImage": null,
            "lastLoginDate": "2024-03-01T10:00:00.000Z",
            "daysInSpace": 12,
            "name": "Vega",
            "allies": ["u-2"],
            "textSpeed": 50,
            "viewedRovers": ["curiosity"],
            "achievedRedPlanetVoyager": true,
            "achievedCosmicCadet": false,
            "__v": 0
        });

        let profile: UserProfile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.id, "u-1");
        assert_eq!(profile.role, Role::Subscriber);
        assert_eq!(profile.notification_token.as_deref(), Some("push-1"));
        assert_eq!(profile.notifications.len(), 1);
        assert_eq!(profile.notifications[0].message, "liked your post");
        assert_eq!(profile.days_in_space, 12);
        assert!(profile.last_login_date.is_some());
        assert!(profile.achievements.is_unlocked(Achievement::RedPlanetVoyager));
        assert!(!profile.achievements.is_unlocked(Achievement::CosmicCadet));
    }

    #[test]
    fn test_unknown_role_is_preserved() {
        let role: Role = serde_json::from_value(serde_json::json!("moderator")).unwrap();
        assert_eq!(role, Role::Other("moderator".to_string()));
        assert!(!role.is_guest());
        let guest: Role = serde_json::from_value(serde_json::json!("guest")).unwrap();
        assert!(guest.is_guest());
    }
}
