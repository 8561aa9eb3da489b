//! Backend API boundary.
//!
//! Each call is an independent round trip authorized by the session's bearer
//! token. The backend is authoritative: responses replace local state rather
//! than being merged into it.

use async_trait::async_trait;

use crate::achievement::Achievement;
use crate::error::Result;
use crate::notification::Notification;
use crate::user::{TextSpeed, UserProfile};

#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Exchanges an access token for the hydrated user record.
    async fn current_user(&self, token: &str) -> Result<UserProfile>;

    /// Appends a notification from `source_user_id` to `self_id`'s list and
    /// returns the whole updated list, newest last.
    async fn increment_notifications(
        &self,
        token: &str,
        self_id: &str,
        source_user_id: &str,
        message: &str,
    ) -> Result<Vec<Notification>>;

    /// Persists an unlocked badge and returns the stored flag value.
    async fn unlock_badge(&self, token: &str, self_id: &str, achievement: Achievement)
    -> Result<bool>;

    /// Returns the stored name.
    async fn update_user_name(&self, token: &str, self_id: &str, name: &str) -> Result<String>;

    /// Returns the stored delay in milliseconds.
    async fn update_text_speed(&self, token: &str, self_id: &str, speed: TextSpeed)
    -> Result<u32>;
}
