//! Application layer for the Astro client.
//!
//! Coordinates the auth provider, backend, realtime channel and UI ports
//! around the shared session store.

pub mod account_usecase;
pub mod achievement_router;
pub mod app_context;
pub mod auth_bridge;
pub mod notification_handler;
pub mod realtime_channel;

pub use account_usecase::AccountUseCase;
pub use achievement_router::AchievementRouter;
pub use app_context::{AppContext, Ports};
pub use auth_bridge::AuthBridge;
pub use notification_handler::{HandleOutcome, NotificationHandler};
pub use realtime_channel::{RealtimeChannel, RealtimeEventHandler};
