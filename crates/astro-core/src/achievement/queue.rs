//! Pending achievement screens carried across navigation transitions.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::navigation::{NavigationTarget, ScreenId};

/// FIFO of achievement screens still to be shown.
///
/// Created when one user action unlocks several achievements at once and
/// drained one screen per completion. An empty queue ends the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementQueue(VecDeque<ScreenId>);

impl AchievementQueue {
    pub fn new<I, S>(screens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ScreenId>,
    {
        Self(screens.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScreenId> {
        self.0.iter()
    }

    /// Consumes the queue and decides the next screen.
    ///
    /// - more than one entry: go to the first, carry the rest;
    /// - exactly one: go to it with nothing pending;
    /// - none: go to `fallback`.
    pub fn advance(mut self, fallback: &ScreenId) -> NavigationTarget {
        match self.0.pop_front() {
            Some(next) => NavigationTarget::new(next, self),
            None => NavigationTarget::screen(fallback.clone()),
        }
    }
}

impl<S: Into<ScreenId>> FromIterator<S> for AchievementQueue {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
