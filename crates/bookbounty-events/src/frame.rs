//! Engine.IO v4 and Socket.IO v5 text frame codec.
//!
//! # Design
//! - Text transport only: binary attachments are rejected, not buffered.
//! - Engine packets wrap socket packets; `EnginePacket::Message` carries the
//!   still-encoded socket body so callers decide when to decode it.
//! - Encoding is infallible; JSON bodies are rendered through `Value`.

use crate::error::FrameError;
use serde::Deserialize;
use serde_json::Value;

/// Namespace used when a packet omits one.
pub const DEFAULT_NAMESPACE: &str = "/";

/// Handshake body sent by the server in the Engine.IO `open` packet.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OpenHandshake {
    /// Engine session id.
    pub sid: String,
    /// Transports the server would upgrade to.
    #[serde(default)]
    pub upgrades: Vec<String>,
    /// Server ping interval in milliseconds.
    pub ping_interval: u64,
    /// Time the server waits for a pong, in milliseconds.
    pub ping_timeout: u64,
    /// Largest payload the server accepts, when advertised.
    #[serde(default)]
    pub max_payload: Option<u64>,
}

/// Engine.IO transport-level packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnginePacket {
    /// Session opened.
    Open(OpenHandshake),
    /// Transport closing.
    Close,
    /// Heartbeat probe, optionally carrying a probe payload.
    Ping(Option<String>),
    /// Heartbeat reply.
    Pong(Option<String>),
    /// Socket.IO packet body.
    Message(String),
    /// Transport upgrade.
    Upgrade,
    /// No-op filler.
    Noop,
}

impl EnginePacket {
    /// Decode one text frame.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError`] when the frame is empty, carries an unknown
    /// packet type, or the open handshake is not valid JSON.
    pub fn decode(raw: &str) -> Result<Self, FrameError> {
        let mut chars = raw.chars();
        let tag = chars.next().ok_or(FrameError::Empty)?;
        let rest = chars.as_str();
        let optional = || (!rest.is_empty()).then(|| rest.to_string());
        match tag {
            '0' => serde_json::from_str(rest)
                .map(Self::Open)
                .map_err(|err| FrameError::json("open", err)),
            '1' => Ok(Self::Close),
            '2' => Ok(Self::Ping(optional())),
            '3' => Ok(Self::Pong(optional())),
            '4' => Ok(Self::Message(rest.to_string())),
            '5' => Ok(Self::Upgrade),
            '6' => Ok(Self::Noop),
            other => Err(FrameError::UnknownEnginePacket { tag: other }),
        }
    }

    /// Encode the packet as a text frame.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Open(handshake) => {
                let body = serde_json::json!({
                    "sid": handshake.sid,
                    "upgrades": handshake.upgrades,
                    "pingInterval": handshake.ping_interval,
                    "pingTimeout": handshake.ping_timeout,
                    "maxPayload": handshake.max_payload,
                });
                format!("0{body}")
            }
            Self::Close => "1".to_string(),
            Self::Ping(probe) => format!("2{}", probe.as_deref().unwrap_or_default()),
            Self::Pong(probe) => format!("3{}", probe.as_deref().unwrap_or_default()),
            Self::Message(body) => format!("4{body}"),
            Self::Upgrade => "5".to_string(),
            Self::Noop => "6".to_string(),
        }
    }
}

/// Socket.IO packet carried inside an Engine.IO message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketPacket {
    /// Namespace connect request or acknowledgement.
    Connect {
        /// Target namespace.
        namespace: String,
        /// Auth payload (client) or `{sid}` (server).
        data: Option<Value>,
    },
    /// Namespace disconnect.
    Disconnect {
        /// Target namespace.
        namespace: String,
    },
    /// Named event with positional arguments.
    Event {
        /// Target namespace.
        namespace: String,
        /// Acknowledgement id requested by the sender.
        ack_id: Option<u64>,
        /// Event name.
        name: String,
        /// Positional event arguments.
        args: Vec<Value>,
    },
    /// Acknowledgement for an earlier event.
    Ack {
        /// Target namespace.
        namespace: String,
        /// Acknowledged id.
        ack_id: Option<u64>,
        /// Acknowledgement arguments.
        args: Vec<Value>,
    },
    /// Namespace connection refused.
    ConnectError {
        /// Target namespace.
        namespace: String,
        /// Server-supplied error payload.
        data: Value,
    },
}

impl SocketPacket {
    /// Build an event on the default namespace.
    #[must_use]
    pub fn event(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self::Event {
            namespace: DEFAULT_NAMESPACE.to_string(),
            ack_id: None,
            name: name.into(),
            args,
        }
    }

    /// Build a connect request for the default namespace.
    #[must_use]
    pub fn connect() -> Self {
        Self::Connect {
            namespace: DEFAULT_NAMESPACE.to_string(),
            data: None,
        }
    }

    /// Decode a Socket.IO packet body (the part after the Engine.IO `4`).
    ///
    /// # Errors
    ///
    /// Returns [`FrameError`] for unknown or binary packet types, malformed
    /// JSON, or event packets without a name.
    pub fn decode(body: &str) -> Result<Self, FrameError> {
        let mut chars = body.chars();
        let tag = chars.next().ok_or(FrameError::Empty)?;
        let rest = chars.as_str();
        if matches!(tag, '5' | '6') {
            return Err(FrameError::UnsupportedBinary);
        }
        if !matches!(tag, '0'..='4') {
            return Err(FrameError::UnknownSocketPacket { tag });
        }

        let (namespace, rest) = split_namespace(rest);
        let (ack_id, rest) = split_ack_id(rest);
        let data = if rest.is_empty() {
            None
        } else {
            Some(
                serde_json::from_str::<Value>(rest)
                    .map_err(|err| FrameError::json("socket", err))?,
            )
        };

        match tag {
            '0' => Ok(Self::Connect { namespace, data }),
            '1' => Ok(Self::Disconnect { namespace }),
            '2' => {
                let Some(Value::Array(mut items)) = data else {
                    return Err(FrameError::MissingEventName);
                };
                if items.is_empty() {
                    return Err(FrameError::MissingEventName);
                }
                let Value::String(name) = items.remove(0) else {
                    return Err(FrameError::MissingEventName);
                };
                Ok(Self::Event {
                    namespace,
                    ack_id,
                    name,
                    args: items,
                })
            }
            '3' => {
                let args = match data {
                    Some(Value::Array(items)) => items,
                    Some(other) => vec![other],
                    None => Vec::new(),
                };
                Ok(Self::Ack {
                    namespace,
                    ack_id,
                    args,
                })
            }
            _ => Ok(Self::ConnectError {
                namespace,
                data: data.unwrap_or(Value::Null),
            }),
        }
    }

    /// Encode the packet body without the Engine.IO prefix.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::new();
        match self {
            Self::Connect { namespace, data } => {
                out.push('0');
                push_namespace(&mut out, namespace, data.is_some());
                if let Some(data) = data {
                    out.push_str(&data.to_string());
                }
            }
            Self::Disconnect { namespace } => {
                out.push('1');
                push_namespace(&mut out, namespace, false);
            }
            Self::Event {
                namespace,
                ack_id,
                name,
                args,
            } => {
                out.push('2');
                push_namespace(&mut out, namespace, true);
                if let Some(id) = ack_id {
                    out.push_str(&id.to_string());
                }
                let mut items = Vec::with_capacity(args.len() + 1);
                items.push(Value::String(name.clone()));
                items.extend(args.iter().cloned());
                out.push_str(&Value::Array(items).to_string());
            }
            Self::Ack {
                namespace,
                ack_id,
                args,
            } => {
                out.push('3');
                push_namespace(&mut out, namespace, true);
                if let Some(id) = ack_id {
                    out.push_str(&id.to_string());
                }
                out.push_str(&Value::Array(args.clone()).to_string());
            }
            Self::ConnectError { namespace, data } => {
                out.push('4');
                push_namespace(&mut out, namespace, true);
                out.push_str(&data.to_string());
            }
        }
        out
    }

    /// Encode the packet as a complete Engine.IO message frame.
    #[must_use]
    pub fn to_frame(&self) -> String {
        EnginePacket::Message(self.encode()).encode()
    }
}

fn split_namespace(rest: &str) -> (String, &str) {
    if !rest.starts_with('/') {
        return (DEFAULT_NAMESPACE.to_string(), rest);
    }
    match rest.split_once(',') {
        Some((namespace, tail)) => (namespace.to_string(), tail),
        None => (rest.to_string(), ""),
    }
}

fn split_ack_id(rest: &str) -> (Option<u64>, &str) {
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return (None, rest);
    }
    let (id, tail) = rest.split_at(digits);
    (id.parse().ok(), tail)
}

fn push_namespace(out: &mut String, namespace: &str, separated: bool) {
    if namespace == DEFAULT_NAMESPACE {
        return;
    }
    out.push_str(namespace);
    if separated {
        out.push(',');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn open_handshake_decodes_server_fields() -> Result<(), FrameError> {
        let raw = r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;
        let EnginePacket::Open(handshake) = EnginePacket::decode(raw)? else {
            panic!("expected open packet");
        };
        assert_eq!(handshake.sid, "abc");
        assert_eq!(handshake.ping_interval, 25_000);
        assert_eq!(handshake.ping_timeout, 20_000);
        assert_eq!(handshake.max_payload, Some(1_000_000));
        Ok(())
    }

    #[test]
    fn heartbeat_packets_round_trip_probe() -> Result<(), FrameError> {
        assert_eq!(EnginePacket::decode("2")?, EnginePacket::Ping(None));
        assert_eq!(
            EnginePacket::decode("2probe")?,
            EnginePacket::Ping(Some("probe".to_string()))
        );
        assert_eq!(EnginePacket::Pong(None).encode(), "3");
        Ok(())
    }

    #[test]
    fn unknown_engine_tag_is_rejected() {
        assert!(matches!(
            EnginePacket::decode("9"),
            Err(FrameError::UnknownEnginePacket { tag: '9' })
        ));
        assert!(matches!(EnginePacket::decode(""), Err(FrameError::Empty)));
    }

    #[test]
    fn event_packet_splits_name_and_args() -> Result<(), FrameError> {
        let packet = SocketPacket::decode(r#"2["new_toast_msg",{"title":"T","message":"M"}]"#)?;
        assert_eq!(
            packet,
            SocketPacket::Event {
                namespace: "/".to_string(),
                ack_id: None,
                name: "new_toast_msg".to_string(),
                args: vec![json!({"title": "T", "message": "M"})],
            }
        );
        Ok(())
    }

    #[test]
    fn namespace_and_ack_id_are_parsed() -> Result<(), FrameError> {
        let packet = SocketPacket::decode(r#"2/admin,12["ping"]"#)?;
        let SocketPacket::Event {
            namespace,
            ack_id,
            name,
            args,
        } = packet
        else {
            panic!("expected event");
        };
        assert_eq!(namespace, "/admin");
        assert_eq!(ack_id, Some(12));
        assert_eq!(name, "ping");
        assert!(args.is_empty());
        Ok(())
    }

    #[test]
    fn event_without_name_is_an_error() {
        assert!(matches!(
            SocketPacket::decode("2[]"),
            Err(FrameError::MissingEventName)
        ));
        assert!(matches!(
            SocketPacket::decode("2[1]"),
            Err(FrameError::MissingEventName)
        ));
    }

    #[test]
    fn binary_packets_are_unsupported() {
        assert!(matches!(
            SocketPacket::decode(r#"51-["upload",{"_placeholder":true,"num":0}]"#),
            Err(FrameError::UnsupportedBinary)
        ));
    }

    #[test]
    fn encoded_event_matches_socketio_wire_format() {
        let frame = SocketPacket::event("add_to_download_list", vec![json!([0, 2])]).to_frame();
        assert_eq!(frame, r#"42["add_to_download_list",[0,2]]"#);
        let bare = SocketPacket::event("readarr_get_wanted", Vec::new()).to_frame();
        assert_eq!(bare, r#"42["readarr_get_wanted"]"#);
    }

    #[test]
    fn connect_frames_for_default_and_custom_namespaces() {
        assert_eq!(SocketPacket::connect().to_frame(), "40");
        let custom = SocketPacket::Connect {
            namespace: "/jobs".to_string(),
            data: Some(json!({"token": "x"})),
        };
        assert_eq!(custom.encode(), r#"0/jobs,{"token":"x"}"#);
    }

    #[test]
    fn connect_error_keeps_payload() -> Result<(), FrameError> {
        let packet = SocketPacket::decode(r#"4{"message":"Not authorized"}"#)?;
        assert_eq!(
            packet,
            SocketPacket::ConnectError {
                namespace: "/".to_string(),
                data: json!({"message": "Not authorized"}),
            }
        );
        Ok(())
    }
}
