//! Realtime push channel boundary.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Outbound event registering the session with the server.
pub const SETUP_EVENT: &str = "setup";

/// Where the push channel lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeEndpoint {
    /// Server origin, e.g. `https://push.example.com`
    pub url: String,
    /// Mount path of the channel, e.g. `/socket.io`
    pub path: String,
}

impl RealtimeEndpoint {
    pub fn new(url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
        }
    }
}

/// A named event received from the server with its first argument.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub name: String,
    pub payload: Value,
}

impl RawEvent {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

#[async_trait]
pub trait RealtimeTransport: Send + Sync {
    async fn connect(&self, endpoint: &RealtimeEndpoint) -> Result<Box<dyn RealtimeConnection>>;
}

/// One open connection. Owned by exactly one task.
#[async_trait]
pub trait RealtimeConnection: Send {
    async fn emit(&mut self, event: &str, payload: Value) -> Result<()>;

    /// Next inbound event. `None` once the connection is closed.
    async fn next_event(&mut self) -> Option<Result<RawEvent>>;

    async fn close(&mut self) -> Result<()>;
}
