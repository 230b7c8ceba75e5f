//! Client side of the Socket.IO handshake and heartbeat.
//!
//! # Design
//! - Pure state machine: feed it received text frames, send what it returns.
//! - Events emitted before the namespace is connected are buffered and
//!   flushed in order once the server acknowledges the connect.
//! - Transport ownership (WebSocket, timers) stays with the caller.

use crate::error::FrameError;
use crate::frame::{DEFAULT_NAMESPACE, EnginePacket, OpenHandshake, SocketPacket};
use serde_json::Value;
use std::collections::VecDeque;

/// Connection phase of a [`ClientSession`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the Engine.IO open packet.
    AwaitingOpen,
    /// Engine session open, waiting for the namespace connect reply.
    AwaitingConnect {
        /// Engine session id.
        engine_sid: String,
    },
    /// Namespace connected; events flow.
    Connected {
        /// Engine session id.
        engine_sid: String,
        /// Socket session id issued for the namespace.
        socket_sid: Option<String>,
    },
    /// Session ended by either side.
    Closed,
}

/// Application-visible outcome of a received frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Namespace connected.
    Connected,
    /// Named server event with its positional arguments.
    Event {
        /// Event name.
        name: String,
        /// Positional arguments.
        args: Vec<Value>,
    },
    /// Server refused the namespace connection.
    ConnectRefused(Value),
    /// Server closed the session.
    Disconnected,
}

/// Frames to send and events to surface after feeding one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStep {
    /// Text frames to write to the transport, in order.
    pub outgoing: Vec<String>,
    /// Events for the application.
    pub events: Vec<SessionEvent>,
}

/// Time allowed for the open handshake on a fresh transport.
pub const CONNECT_TIMEOUT_MS: u32 = 20_000;

/// Socket.IO client session bound to the default namespace.
#[derive(Debug)]
pub struct ClientSession {
    state: SessionState,
    handshake: Option<OpenHandshake>,
    pending: VecDeque<String>,
}

impl Default for ClientSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientSession {
    /// Fresh session waiting for the server's open packet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SessionState::AwaitingOpen,
            handshake: None,
            pending: VecDeque::new(),
        }
    }

    /// Current connection phase.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Open handshake received from the server, once known.
    #[must_use]
    pub const fn handshake(&self) -> Option<&OpenHandshake> {
        self.handshake.as_ref()
    }

    /// Whether events are currently delivered immediately.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self.state, SessionState::Connected { .. })
    }

    /// Number of events buffered until the namespace connects.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Queue an event; returns the frame to send now when connected.
    pub fn emit(&mut self, name: &str, args: Vec<Value>) -> Option<String> {
        let frame = SocketPacket::event(name, args).to_frame();
        if self.is_connected() {
            Some(frame)
        } else {
            self.pending.push_back(frame);
            None
        }
    }

    /// Build the frame that politely closes the namespace.
    #[must_use]
    pub fn disconnect(&mut self) -> String {
        self.state = SessionState::Closed;
        SocketPacket::Disconnect {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
        .to_frame()
    }

    /// Forget the transport-level session while keeping buffered events.
    ///
    /// Call as soon as the transport is gone: from then on [`Self::emit`]
    /// buffers instead of returning frames nobody will send.
    pub fn restart(&mut self) {
        self.state = SessionState::AwaitingOpen;
        self.handshake = None;
    }

    /// Put frames that could not be written back in front of the buffer.
    ///
    /// Only event frames are kept; handshake and heartbeat replies belong to
    /// the transport that failed.
    pub fn requeue(&mut self, frames: impl IntoIterator<Item = String>) {
        let events: Vec<String> = frames
            .into_iter()
            .filter(|frame| is_event_frame(frame))
            .collect();
        for frame in events.into_iter().rev() {
            self.pending.push_front(frame);
        }
    }

    /// Silence allowed before the transport is considered dead, in ms.
    ///
    /// Once the handshake is known this is `pingInterval + pingTimeout`;
    /// before that it is [`CONNECT_TIMEOUT_MS`].
    #[must_use]
    pub fn heartbeat_deadline_ms(&self) -> u32 {
        self.handshake.as_ref().map_or(CONNECT_TIMEOUT_MS, |handshake| {
            let total = handshake.ping_interval.saturating_add(handshake.ping_timeout);
            u32::try_from(total).unwrap_or(u32::MAX)
        })
    }

    /// Feed one received text frame.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError`] when the frame cannot be decoded. The session
    /// state is unchanged in that case.
    pub fn receive(&mut self, raw: &str) -> Result<SessionStep, FrameError> {
        let mut step = SessionStep::default();
        match EnginePacket::decode(raw)? {
            EnginePacket::Open(handshake) => {
                self.state = SessionState::AwaitingConnect {
                    engine_sid: handshake.sid.clone(),
                };
                self.handshake = Some(handshake);
                step.outgoing.push(SocketPacket::connect().to_frame());
            }
            EnginePacket::Ping(probe) => {
                step.outgoing.push(EnginePacket::Pong(probe).encode());
            }
            EnginePacket::Close => {
                self.state = SessionState::Closed;
                step.events.push(SessionEvent::Disconnected);
            }
            EnginePacket::Message(body) => {
                self.receive_socket_packet(SocketPacket::decode(&body)?, &mut step);
            }
            EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => {}
        }
        Ok(step)
    }

    fn receive_socket_packet(&mut self, packet: SocketPacket, step: &mut SessionStep) {
        match packet {
            SocketPacket::Connect { namespace, data } if namespace == DEFAULT_NAMESPACE => {
                let engine_sid = match &self.state {
                    SessionState::AwaitingConnect { engine_sid }
                    | SessionState::Connected { engine_sid, .. } => engine_sid.clone(),
                    SessionState::AwaitingOpen | SessionState::Closed => String::new(),
                };
                let socket_sid = data
                    .as_ref()
                    .and_then(|value| value.get("sid"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                self.state = SessionState::Connected {
                    engine_sid,
                    socket_sid,
                };
                step.outgoing.extend(self.pending.drain(..));
                step.events.push(SessionEvent::Connected);
            }
            SocketPacket::Event {
                namespace,
                name,
                args,
                ..
            } if namespace == DEFAULT_NAMESPACE => {
                step.events.push(SessionEvent::Event { name, args });
            }
            SocketPacket::Disconnect { namespace } if namespace == DEFAULT_NAMESPACE => {
                self.state = SessionState::Closed;
                step.events.push(SessionEvent::Disconnected);
            }
            SocketPacket::ConnectError { namespace, data } if namespace == DEFAULT_NAMESPACE => {
                self.state = SessionState::Closed;
                step.events.push(SessionEvent::ConnectRefused(data));
            }
            _ => {}
        }
    }
}

fn is_event_frame(frame: &str) -> bool {
    matches!(
        EnginePacket::decode(frame),
        Ok(EnginePacket::Message(body))
            if matches!(SocketPacket::decode(&body), Ok(SocketPacket::Event { .. }))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const OPEN: &str = r#"0{"sid":"eng-1","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#;

    #[test]
    fn open_triggers_namespace_connect() -> Result<(), FrameError> {
        let mut session = ClientSession::new();
        let step = session.receive(OPEN)?;
        assert_eq!(step.outgoing, vec!["40".to_string()]);
        assert_eq!(
            session.state(),
            &SessionState::AwaitingConnect {
                engine_sid: "eng-1".to_string()
            }
        );
        assert_eq!(session.handshake().map(|h| h.ping_interval), Some(25_000));
        Ok(())
    }

    #[test]
    fn buffered_events_flush_after_connect() -> Result<(), FrameError> {
        let mut session = ClientSession::new();
        assert_eq!(session.emit("readarr_get_wanted", Vec::new()), None);
        assert_eq!(session.pending_len(), 1);
        session.receive(OPEN)?;
        let step = session.receive(r#"40{"sid":"sock-9"}"#)?;
        assert_eq!(step.outgoing, vec![r#"42["readarr_get_wanted"]"#.to_string()]);
        assert_eq!(step.events, vec![SessionEvent::Connected]);
        assert_eq!(session.pending_len(), 0);
        assert_eq!(
            session.state(),
            &SessionState::Connected {
                engine_sid: "eng-1".to_string(),
                socket_sid: Some("sock-9".to_string()),
            }
        );
        let direct = session.emit("stop_libgen", Vec::new());
        assert_eq!(direct.as_deref(), Some(r#"42["stop_libgen"]"#));
        Ok(())
    }

    #[test]
    fn ping_is_answered_with_pong() -> Result<(), FrameError> {
        let mut session = ClientSession::new();
        let step = session.receive("2")?;
        assert_eq!(step.outgoing, vec!["3".to_string()]);
        assert!(step.events.is_empty());
        Ok(())
    }

    #[test]
    fn server_events_surface_with_args() -> Result<(), FrameError> {
        let mut session = ClientSession::new();
        session.receive(OPEN)?;
        session.receive("40")?;
        let step = session.receive(r#"42["new_toast_msg",{"title":"T","message":"M"}]"#)?;
        assert_eq!(
            step.events,
            vec![SessionEvent::Event {
                name: "new_toast_msg".to_string(),
                args: vec![json!({"title": "T", "message": "M"})],
            }]
        );
        Ok(())
    }

    #[test]
    fn close_and_disconnect_end_the_session() -> Result<(), FrameError> {
        let mut session = ClientSession::new();
        session.receive(OPEN)?;
        session.receive("40")?;
        let step = session.receive("41")?;
        assert_eq!(step.events, vec![SessionEvent::Disconnected]);
        assert_eq!(session.state(), &SessionState::Closed);

        let mut other = ClientSession::new();
        let step = other.receive("1")?;
        assert_eq!(step.events, vec![SessionEvent::Disconnected]);
        Ok(())
    }

    #[test]
    fn restart_keeps_pending_events() -> Result<(), FrameError> {
        let mut session = ClientSession::new();
        session.receive(OPEN)?;
        session.emit("load_settings", Vec::new());
        session.restart();
        assert_eq!(session.state(), &SessionState::AwaitingOpen);
        assert_eq!(session.pending_len(), 1);
        Ok(())
    }

    #[test]
    fn emits_after_a_lost_transport_survive_reconnect() -> Result<(), FrameError> {
        let mut session = ClientSession::new();
        session.receive(OPEN)?;
        session.receive("40")?;
        assert!(session.is_connected());

        session.restart();
        assert_eq!(session.emit("readarr_get_wanted", Vec::new()), None);
        assert_eq!(session.pending_len(), 1);

        let open = session.receive(OPEN)?;
        assert_eq!(open.outgoing, vec!["40".to_string()]);
        let connected = session.receive("40")?;
        assert_eq!(
            connected.outgoing,
            vec![r#"42["readarr_get_wanted"]"#.to_string()]
        );
        Ok(())
    }

    #[test]
    fn unsent_event_frames_are_requeued_in_order() -> Result<(), FrameError> {
        let mut session = ClientSession::new();
        session.emit("stop_libgen", Vec::new());
        session.receive(OPEN)?;
        let flushed = session.receive("40")?.outgoing;
        assert_eq!(session.pending_len(), 0);

        session.restart();
        session.emit("reset_libgen", Vec::new());
        session.requeue(
            ["3".to_string(), "40".to_string()]
                .into_iter()
                .chain(flushed),
        );
        assert_eq!(session.pending_len(), 2);

        session.receive(OPEN)?;
        let step = session.receive("40")?;
        assert_eq!(
            step.outgoing,
            vec![
                r#"42["stop_libgen"]"#.to_string(),
                r#"42["reset_libgen"]"#.to_string(),
            ]
        );
        Ok(())
    }

    #[test]
    fn heartbeat_deadline_follows_handshake() -> Result<(), FrameError> {
        let mut session = ClientSession::new();
        assert_eq!(session.heartbeat_deadline_ms(), CONNECT_TIMEOUT_MS);
        session.receive(OPEN)?;
        assert_eq!(session.heartbeat_deadline_ms(), 45_000);
        session.restart();
        assert_eq!(session.heartbeat_deadline_ms(), CONNECT_TIMEOUT_MS);
        Ok(())
    }

    #[test]
    fn bad_frames_leave_state_untouched() {
        let mut session = ClientSession::new();
        assert!(session.receive("4not-a-packet").is_err());
        assert_eq!(session.state(), &SessionState::AwaitingOpen);
    }

    #[test]
    fn connect_error_is_surfaced() -> Result<(), FrameError> {
        let mut session = ClientSession::new();
        session.receive(OPEN)?;
        let step = session.receive(r#"44{"message":"nope"}"#)?;
        assert_eq!(
            step.events,
            vec![SessionEvent::ConnectRefused(json!({"message": "nope"}))]
        );
        Ok(())
    }
}
