mod common;

use astro_application::AchievementRouter;
use astro_core::achievement::{Achievement, AchievementQueue};
use astro_core::navigation::{NavigationTarget, ScreenId};
use astro_core::session::{SessionAction, SessionStore};
use astro_core::user::Role;
use common::{MockBackend, RecordingNavigator, session};
use std::sync::Arc;
use std::sync::atomic::Ordering;

const FALLBACK: &str = "MarsRoverImagesScreen";

struct Fixture {
    backend: Arc<MockBackend>,
    store: Arc<SessionStore>,
    navigator: Arc<RecordingNavigator>,
    router: AchievementRouter,
}

fn fixture(role: Option<Role>) -> Fixture {
    let backend = Arc::new(MockBackend::default());
    let store = Arc::new(SessionStore::new());
    if let Some(role) = role {
        store.dispatch(SessionAction::LoggedIn(session("u-1", "t-1", role)));
    }
    let navigator = Arc::new(RecordingNavigator::default());
    let router = AchievementRouter::new(
        backend.clone(),
        store.clone(),
        navigator.clone(),
        ScreenId::new(FALLBACK),
    );
    Fixture {
        backend,
        store,
        navigator,
        router,
    }
}

fn unlocked(store: &SessionStore, achievement: Achievement) -> bool {
    store
        .snapshot()
        .map(|s| s.has_achievement(achievement))
        .unwrap_or(false)
}

#[tokio::test]
async fn test_badge_chain_then_fallback() {
    let f = fixture(Some(Role::Subscriber));

    // On BadgeA with BadgeB pending.
    let target = f
        .router
        .complete_achievement(
            Achievement::RedPlanetVoyager,
            AchievementQueue::new(["BadgeB"]),
        )
        .await;
    assert_eq!(target, NavigationTarget::screen("BadgeB"));
    assert!(unlocked(&f.store, Achievement::RedPlanetVoyager));

    // On BadgeB with nothing pending.
    let target = f
        .router
        .complete_achievement(Achievement::MarsRoverMaestro, target.pending_queue)
        .await;
    assert_eq!(target, NavigationTarget::screen(FALLBACK));
    assert!(unlocked(&f.store, Achievement::MarsRoverMaestro));

    assert_eq!(f.backend.unlock_calls.load(Ordering::SeqCst), 2);
    assert_eq!(f.navigator.targets.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_queue_visits_every_entry_in_order() {
    let f = fixture(Some(Role::Subscriber));
    let mut queue = AchievementQueue::new(["A", "B", "C"]);
    let mut visited = Vec::new();

    loop {
        let target = f
            .router
            .complete_achievement(Achievement::CosmicCadet, queue)
            .await;
        visited.push(target.screen.to_string());
        if target.screen.as_str() == FALLBACK {
            break;
        }
        queue = target.pending_queue;
    }

    assert_eq!(visited, vec!["A", "B", "C", FALLBACK]);
}

#[tokio::test]
async fn test_empty_queue_goes_straight_to_fallback() {
    let f = fixture(Some(Role::Subscriber));
    let target = f
        .router
        .complete_achievement(Achievement::CosmicCadet, AchievementQueue::default())
        .await;
    assert_eq!(target, NavigationTarget::screen(FALLBACK));
}

#[tokio::test]
async fn test_pending_queue_carries_remainder() {
    let f = fixture(Some(Role::Subscriber));
    let target = f
        .router
        .complete_achievement(Achievement::StarNavigator, AchievementQueue::new(["A", "B", "C"]))
        .await;
    assert_eq!(target.screen.as_str(), "A");
    let remaining: Vec<_> = target.pending_queue.iter().map(ScreenId::as_str).collect();
    assert_eq!(remaining, vec!["B", "C"]);
    assert_eq!(f.navigator.targets.lock().unwrap()[0], target);
}

#[tokio::test]
async fn test_guest_sets_flag_without_backend() {
    let f = fixture(Some(Role::Guest));
    f.router
        .complete_achievement(Achievement::CosmicPioneer, AchievementQueue::default())
        .await;

    assert!(unlocked(&f.store, Achievement::CosmicPioneer));
    assert_eq!(f.backend.unlock_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_backend_failure_leaves_flag_unset_but_navigates() {
    let f = fixture(Some(Role::Subscriber));
    f.backend.fail_unlock();

    let target = f
        .router
        .complete_achievement(Achievement::GalacticSage, AchievementQueue::new(["Next"]))
        .await;

    assert!(!unlocked(&f.store, Achievement::GalacticSage));
    assert_eq!(f.backend.unlock_calls.load(Ordering::SeqCst), 1);
    assert_eq!(target.screen.as_str(), "Next");
    assert_eq!(f.navigator.targets.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_without_session_still_navigates() {
    let f = fixture(None);
    let target = f
        .router
        .complete_achievement(Achievement::NovaScholar, AchievementQueue::default())
        .await;

    assert_eq!(target.screen.as_str(), FALLBACK);
    assert!(f.store.snapshot().is_none());
    assert_eq!(f.backend.unlock_calls.load(Ordering::SeqCst), 0);
}
