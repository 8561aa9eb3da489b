//! Domain layer for the Astro client.
//!
//! Models, the session store, and the traits through which the application
//! layer talks to the auth provider, backend, realtime channel and UI.

pub mod achievement;
pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod navigation;
pub mod notification;
pub mod realtime;
pub mod session;
pub mod toast;
pub mod user;

// Re-export common error type
pub use error::{AstroError, Result};
