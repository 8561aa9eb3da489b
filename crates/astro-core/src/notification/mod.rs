//! Notification domain module.
//!
//! - `model`: stored notifications and decoded realtime events
//! - `snackbar`: the transient acknowledgment state machine

mod model;
mod snackbar;

pub use model::{EventKind, Notification, NotificationEvent};
pub use snackbar::{DEFAULT_SNACKBAR_WINDOW, Snackbar, TransientState};
