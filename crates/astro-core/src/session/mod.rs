//! Session domain module.
//!
//! - `model`: the active session and partial profile updates
//! - `store`: the reducer and the single-slot store that owns the session

mod model;
mod store;

pub use model::{ProfilePatch, Session};
pub use store::{SessionAction, SessionSnapshot, SessionStore, reduce};
