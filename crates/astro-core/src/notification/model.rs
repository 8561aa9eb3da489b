//! Notification domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A notification entry as stored on the user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// User whose action produced the notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: Some(user_id.into()),
            message: message.into(),
            created_at: None,
        }
    }
}

/// Kinds of server-pushed social events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::AsRefStr, strum::EnumIter)]
pub enum EventKind {
    #[strum(serialize = "post liked")]
    PostLiked,
    #[strum(serialize = "comment added")]
    CommentAdded,
}

impl EventKind {
    /// Event name on the realtime channel.
    pub fn wire_name(self) -> &'static str {
        match self {
            EventKind::PostLiked => "post liked",
            EventKind::CommentAdded => "comment added",
        }
    }

    /// Human-readable text appended after the source user's name.
    pub fn message(self) -> &'static str {
        match self {
            EventKind::PostLiked => "liked your post",
            EventKind::CommentAdded => "commented on your post",
        }
    }
}

/// A decoded realtime event. Consumed immediately, never persisted locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub source_user_id: String,
    pub kind: EventKind,
    pub message: String,
}

impl NotificationEvent {
    pub fn new(kind: EventKind, source_user_id: impl Into<String>) -> Self {
        Self {
            source_user_id: source_user_id.into(),
            kind,
            message: kind.message().to_string(),
        }
    }

    /// Decodes a named channel event carrying the originating user id.
    ///
    /// Returns `None` for event names outside the known set or payloads
    /// without a user id.
    pub fn from_wire(name: &str, payload: &serde_json::Value) -> Option<Self> {
        let kind = EventKind::from_str(name).ok()?;
        let user_id = match payload {
            serde_json::Value::String(id) => id.clone(),
            serde_json::Value::Array(args) => args.first()?.as_str()?.to_string(),
            serde_json::Value::Object(fields) => fields.get("userId")?.as_str()?.to_string(),
            _ => return None,
        };
        Some(Self::new(kind, user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        use strum::IntoEnumIterator;
        for kind in EventKind::iter() {
            assert_eq!(EventKind::from_str(kind.wire_name()).unwrap(), kind);
            assert_eq!(kind.as_ref(), kind.wire_name());
        }
    }

    #[test]
    fn test_from_wire() {
        let event = NotificationEvent::from_wire("post liked", &json!("u-2")).unwrap();
        assert_eq!(event.kind, EventKind::PostLiked);
        assert_eq!(event.source_user_id, "u-2");
        assert_eq!(event.message, "liked your post");

        let event = NotificationEvent::from_wire("comment added", &json!(["u-3"])).unwrap();
        assert_eq!(event.message, "commented on your post");
    }

    #[test]
    fn test_from_wire_rejects_unknown_or_malformed() {
        assert!(NotificationEvent::from_wire("post shared", &json!("u-2")).is_none());
        assert!(NotificationEvent::from_wire("post liked", &json!(42)).is_none());
        assert!(NotificationEvent::from_wire("post liked", &json!([])).is_none());
    }

    #[test]
    fn test_notification_wire_shape() {
        let n: Notification = serde_json::from_value(json!({
            "_id": "n-1",
            "userId": "u-2",
            "message": "liked your post",
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(n.id.as_deref(), Some("n-1"));
        assert_eq!(n.user_id.as_deref(), Some("u-2"));
        assert!(n.created_at.is_some());
    }
}
