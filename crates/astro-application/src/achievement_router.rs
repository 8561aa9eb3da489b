//! Achievement chain router.
//!
//! Completing an achievement screen records the badge, then moves on to the
//! next pending achievement screen or, when none is left, to the fallback
//! screen.

use astro_core::achievement::{Achievement, AchievementQueue};
use astro_core::backend::BackendApi;
use astro_core::navigation::{NavigationTarget, Navigator, ScreenId};
use astro_core::session::{SessionAction, SessionStore};
use std::sync::Arc;

pub struct AchievementRouter {
    backend: Arc<dyn BackendApi>,
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    fallback: ScreenId,
}

impl AchievementRouter {
    pub fn new(
        backend: Arc<dyn BackendApi>,
        store: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        fallback: ScreenId,
    ) -> Self {
        Self {
            backend,
            store,
            navigator,
            fallback,
        }
    }

    pub fn fallback(&self) -> &ScreenId {
        &self.fallback
    }

    /// Records `achievement` and navigates onward. Navigation happens whether
    /// or not the badge could be stored.
    pub async fn complete_achievement(
        &self,
        achievement: Achievement,
        pending_queue: AchievementQueue,
    ) -> NavigationTarget {
        self.record(achievement).await;

        let target = pending_queue.advance(&self.fallback);
        tracing::info!(
            achievement = achievement.flag_name(),
            screen = %target.screen,
            remaining = target.pending_queue.len(),
            "achievement completed"
        );
        self.navigator.navigate(target.clone());
        target
    }

    async fn record(&self, achievement: Achievement) {
        let Some(session) = self.store.snapshot() else {
            tracing::warn!(achievement = achievement.flag_name(), "no session, badge not recorded");
            return;
        };
        let user_id = session.user_id().to_string();

        if session.is_guest() {
            self.store.dispatch(SessionAction::SetAchievement {
                user_id,
                achievement,
                unlocked: true,
            });
            return;
        }

        match self
            .backend
            .unlock_badge(&session.token, &user_id, achievement)
            .await
        {
            Ok(unlocked) => {
                self.store.dispatch(SessionAction::SetAchievement {
                    user_id,
                    achievement,
                    unlocked,
                });
            }
            Err(e) => {
                tracing::error!(
                    achievement = achievement.flag_name(),
                    error = %e,
                    "failed to unlock badge"
                );
            }
        }
    }
}
