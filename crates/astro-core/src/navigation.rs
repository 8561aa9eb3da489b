//! Navigation boundary.
//!
//! Screens are addressed by name. Achievement screens accept a pending queue
//! of further achievement screens as transition state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::achievement::AchievementQueue;

/// Identifier of a navigable screen (`MarsRoverImagesScreen`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenId(String);

impl ScreenId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScreenId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ScreenId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Where to go next, and what to carry along.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTarget {
    pub screen: ScreenId,
    #[serde(default)]
    pub pending_queue: AchievementQueue,
}

impl NavigationTarget {
    pub fn new(screen: impl Into<ScreenId>, pending_queue: AchievementQueue) -> Self {
        Self {
            screen: screen.into(),
            pending_queue,
        }
    }

    /// A target with nothing pending.
    pub fn screen(screen: impl Into<ScreenId>) -> Self {
        Self::new(screen, AchievementQueue::default())
    }
}

/// Performs screen transitions on behalf of the pipeline.
///
/// The navigation stack itself lives in the UI layer; implementations only
/// forward the target.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: NavigationTarget);
}
