//! Engine.IO v4 / Socket.IO v4 text framing.
//!
//! Only the subset used over a plain WebSocket transport is handled:
//!
//! ```text
//! 0{"sid":..,"pingInterval":..}   engine open
//! 1                               engine close
//! 2 / 3                           ping / pong
//! 40 / 40{"sid":..}               socket connect (default namespace)
//! 41                              socket disconnect
//! 42["event", arg, ...]           socket event
//! 44{"message":..}                socket connect error
//! ```

use astro_core::error::{AstroError, Result};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Open(Value),
    Close,
    Ping,
    Pong,
    Connect(Option<Value>),
    Disconnect,
    Event { name: String, args: Vec<Value> },
    ConnectError(Value),
    /// Engine or socket packet types that carry nothing for this client.
    Noop,
}

impl Packet {
    pub fn event(name: impl Into<String>, arg: Value) -> Self {
        Packet::Event {
            name: name.into(),
            args: vec![arg],
        }
    }

    pub fn encode(&self) -> String {
        match self {
            Packet::Open(data) => format!("0{}", data),
            Packet::Close => "1".to_string(),
            Packet::Ping => "2".to_string(),
            Packet::Pong => "3".to_string(),
            Packet::Connect(None) => "40".to_string(),
            Packet::Connect(Some(data)) => format!("40{}", data),
            Packet::Disconnect => "41".to_string(),
            Packet::Event { name, args } => {
                let mut frame = Vec::with_capacity(args.len() + 1);
                frame.push(Value::String(name.clone()));
                frame.extend(args.iter().cloned());
                format!("42{}", Value::Array(frame))
            }
            Packet::ConnectError(data) => format!("44{}", data),
            Packet::Noop => "6".to_string(),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut chars = text.chars();
        let engine_type = chars
            .next()
            .ok_or_else(|| AstroError::transport("empty Engine.IO frame"))?;
        let rest = chars.as_str();

        match engine_type {
            '0' => Ok(Packet::Open(parse_json(rest)?)),
            '1' => Ok(Packet::Close),
            '2' => Ok(Packet::Ping),
            '3' => Ok(Packet::Pong),
            '4' => parse_socket(rest),
            '5' | '6' => Ok(Packet::Noop),
            other => Err(AstroError::transport(format!(
                "unknown Engine.IO packet type '{}'",
                other
            ))),
        }
    }
}

fn parse_socket(text: &str) -> Result<Packet> {
    let mut chars = text.chars();
    let socket_type = chars
        .next()
        .ok_or_else(|| AstroError::transport("empty Socket.IO packet"))?;
    let Some(body) = default_namespace_body(chars.as_str()) else {
        // Only the default namespace is joined.
        return Ok(Packet::Noop);
    };

    match socket_type {
        '0' if body.is_empty() => Ok(Packet::Connect(None)),
        '0' => Ok(Packet::Connect(Some(parse_json(body)?))),
        '1' => Ok(Packet::Disconnect),
        '2' => {
            // Acknowledgement ids precede the array; this client never asks for acks.
            let body = body.trim_start_matches(|c: char| c.is_ascii_digit());
            let frame = parse_json(body)?;
            let mut items = match frame {
                Value::Array(items) if !items.is_empty() => items.into_iter(),
                _ => {
                    return Err(AstroError::transport(
                        "Socket.IO event is not a non-empty array",
                    ));
                }
            };
            let name = match items.next() {
                Some(Value::String(name)) => name,
                _ => return Err(AstroError::transport("Socket.IO event name is not a string")),
            };
            Ok(Packet::Event {
                name,
                args: items.collect(),
            })
        }
        '4' => Ok(Packet::ConnectError(parse_json(body)?)),
        _ => Ok(Packet::Noop),
    }
}

/// Returns the packet body when it addresses the default namespace `/`,
/// with any `/,` prefix removed. `None` for every other namespace.
fn default_namespace_body(body: &str) -> Option<&str> {
    if !body.starts_with('/') {
        return Some(body);
    }
    let (namespace, rest) = match body.find(',') {
        Some(idx) => (&body[..idx], &body[idx + 1..]),
        None => (body, ""),
    };
    (namespace == "/").then_some(rest)
}

fn parse_json(text: &str) -> Result<Value> {
    if text.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(AstroError::from)
}
