//! User domain module.
//!
//! - `model`: hydrated user profile and account role
//! - `text_speed`: dialogue speed preference

mod model;
mod text_speed;

pub use model::{Role, UserProfile};
pub use text_speed::TextSpeed;
