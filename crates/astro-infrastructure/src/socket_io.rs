//! Socket.IO client over a raw WebSocket.
//!
//! Connects with the `websocket` transport directly (no long-polling upgrade),
//! joins the default namespace and exposes named events to the realtime
//! channel.

use astro_core::error::{AstroError, Result};
use astro_core::realtime::{RawEvent, RealtimeConnection, RealtimeEndpoint, RealtimeTransport};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;
use uuid::Uuid;

use crate::engine_io::Packet;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens Socket.IO connections.
#[derive(Debug, Clone)]
pub struct SocketIoTransport {
    connect_timeout: Duration,
}

impl Default for SocketIoTransport {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_TIMEOUT)
    }
}

impl SocketIoTransport {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    async fn handshake(&self, socket: &mut Socket) -> Result<()> {
        match next_packet(socket).await {
            Some(Ok(Packet::Open(info))) => {
                tracing::debug!(sid = ?info.get("sid"), "engine.io open");
            }
            Some(Ok(other)) => {
                return Err(AstroError::transport(format!(
                    "expected Engine.IO open, got {:?}",
                    other
                )));
            }
            Some(Err(e)) => return Err(e),
            None => return Err(AstroError::transport("connection closed during handshake")),
        }

        send_packet(socket, &Packet::Connect(None)).await?;

        loop {
            match next_packet(socket).await {
                Some(Ok(Packet::Connect(_))) => return Ok(()),
                Some(Ok(Packet::Ping)) => send_packet(socket, &Packet::Pong).await?,
                Some(Ok(Packet::ConnectError(data))) => {
                    return Err(AstroError::transport(format!(
                        "namespace connect refused: {}",
                        data
                    )));
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e),
                None => return Err(AstroError::transport("connection closed during handshake")),
            }
        }
    }
}

#[async_trait]
impl RealtimeTransport for SocketIoTransport {
    async fn connect(&self, endpoint: &RealtimeEndpoint) -> Result<Box<dyn RealtimeConnection>> {
        let url = websocket_url(endpoint)?;
        let connection_id = Uuid::new_v4();
        tracing::info!(%connection_id, url = %url, "connecting realtime channel");

        let (mut socket, _response) = timeout(self.connect_timeout, connect_async(url.as_str()))
            .await
            .map_err(|_| AstroError::transport("WebSocket connect timeout"))?
            .map_err(|e| AstroError::transport(format!("WebSocket connect failed: {e}")))?;

        timeout(self.connect_timeout, self.handshake(&mut socket))
            .await
            .map_err(|_| AstroError::transport("Socket.IO handshake timeout"))??;

        tracing::debug!(%connection_id, "realtime channel connected");
        Ok(Box::new(SocketIoConnection {
            connection_id,
            socket,
            closed: false,
        }))
    }
}

pub struct SocketIoConnection {
    connection_id: Uuid,
    socket: Socket,
    closed: bool,
}

#[async_trait]
impl RealtimeConnection for SocketIoConnection {
    async fn emit(&mut self, event: &str, payload: Value) -> Result<()> {
        if self.closed {
            return Err(AstroError::transport("emit on closed connection"));
        }
        tracing::debug!(connection_id = %self.connection_id, event, "emit");
        send_packet(&mut self.socket, &Packet::event(event, payload)).await
    }

    async fn next_event(&mut self) -> Option<Result<RawEvent>> {
        if self.closed {
            return None;
        }
        loop {
            match next_packet(&mut self.socket).await? {
                Ok(Packet::Ping) => {
                    if let Err(e) = send_packet(&mut self.socket, &Packet::Pong).await {
                        return Some(Err(e));
                    }
                }
                Ok(Packet::Event { name, args }) => {
                    let payload = args.into_iter().next().unwrap_or(Value::Null);
                    return Some(Ok(RawEvent::new(name, payload)));
                }
                Ok(Packet::Disconnect) | Ok(Packet::Close) => {
                    tracing::info!(connection_id = %self.connection_id, "server closed realtime channel");
                    self.closed = true;
                    return None;
                }
                Ok(_) => continue,
                Err(e) if e.is_serialization() => {
                    tracing::warn!(connection_id = %self.connection_id, error = %e, "skipping malformed frame");
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        // Best effort: the peer may already be gone.
        let _ = send_packet(&mut self.socket, &Packet::Disconnect).await;
        self.socket
            .close(None)
            .await
            .map_err(|e| AstroError::transport(format!("WebSocket close failed: {e}")))?;
        tracing::debug!(connection_id = %self.connection_id, "realtime channel closed");
        Ok(())
    }
}

/// `https://host` + `/socket.io` -> `wss://host/socket.io/?EIO=4&transport=websocket`
pub fn websocket_url(endpoint: &RealtimeEndpoint) -> Result<Url> {
    let mut url = Url::parse(&endpoint.url)
        .map_err(|e| AstroError::config(format!("invalid realtime url '{}': {e}", endpoint.url)))?;

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(AstroError::config(format!(
                "unsupported realtime url scheme '{}'",
                other
            )));
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| AstroError::config("cannot set websocket scheme"))?;

    let path = format!("/{}/", endpoint.path.trim_matches('/'));
    url.set_path(&path);
    url.set_query(Some("EIO=4&transport=websocket"));
    Ok(url)
}

async fn send_packet(socket: &mut Socket, packet: &Packet) -> Result<()> {
    socket
        .send(Message::Text(packet.encode()))
        .await
        .map_err(|e| AstroError::transport(format!("WebSocket send failed: {e}")))
}

/// Reads frames until one decodes to a packet. `None` on close.
async fn next_packet(socket: &mut Socket) -> Option<Result<Packet>> {
    loop {
        match socket.next().await? {
            Ok(Message::Text(text)) => return Some(Packet::parse(&text)),
            Ok(Message::Close(_)) => return None,
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => continue,
            Ok(Message::Binary(_)) | Ok(Message::Frame(_)) => continue,
            Err(e) => {
                return Some(Err(AstroError::transport(format!(
                    "WebSocket receive failed: {e}"
                ))));
            }
        }
    }
}
