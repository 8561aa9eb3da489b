//! Achievement domain module.
//!
//! - `model`: the achievement catalogue and the unlocked-flag set
//! - `queue`: pending achievement screens and chain advancement

mod model;
mod queue;

pub use model::{Achievement, AchievementFlags};
pub use queue::AchievementQueue;
