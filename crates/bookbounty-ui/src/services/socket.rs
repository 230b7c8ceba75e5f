//! Socket.IO connection runner.
//!
//! # Design
//! - One spawned task owns the WebSocket; components talk to it through an
//!   unbounded command channel so emitting never blocks a render.
//! - Commands issued while disconnected are buffered by the session and
//!   flushed once the namespace connects. Frames a failed send did not
//!   deliver go back into that buffer.
//! - A transport that stays silent past `pingInterval + pingTimeout` is
//!   treated as lost.
//! - Reconnect with capped exponential backoff until the handle is closed or
//!   the server refuses the namespace.

use crate::core::config::ClientConfig;
use crate::core::connection::{ConnectionState, backoff_delay_ms};
use bookbounty_events::{ClientSession, Command, ServerEvent, SessionEvent};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::stream::{SplitSink, StreamExt};
use futures::{FutureExt, SinkExt, select};
use gloo::console;
use gloo_net::websocket::{Message, futures::WebSocket};
use gloo_timers::future::TimeoutFuture;
use thiserror::Error;
use yew::Callback;

/// Request sent from the UI to the runner.
#[derive(Debug)]
enum Outbound {
    Emit(Command),
    Close,
}

/// Transport failures that end one connection attempt.
#[derive(Debug, Error)]
enum SocketError {
    #[error("websocket open failed")]
    Open { detail: String },
    #[error("websocket send failed")]
    Send { detail: String },
    #[error("websocket receive failed")]
    Receive { detail: String },
}

impl SocketError {
    fn detail(&self) -> &str {
        match self {
            Self::Open { detail } | Self::Send { detail } | Self::Receive { detail } => detail,
        }
    }
}

/// Why a connection attempt ended.
enum Exit {
    /// Transport dropped; try again.
    Lost,
    /// Handle closed by the UI.
    Closed,
    /// Server refused the namespace.
    Refused,
}

/// Cloneable handle to the running socket task.
#[derive(Clone, Debug)]
pub(crate) struct SocketHandle {
    outbound: UnboundedSender<Outbound>,
}

impl SocketHandle {
    /// Queue a command for emission.
    pub(crate) fn emit(&self, command: Command) {
        if self.outbound.unbounded_send(Outbound::Emit(command)).is_err() {
            console::warn!("socket runner stopped; command dropped");
        }
    }

    /// Disconnect and stop reconnecting.
    pub(crate) fn close(&self) {
        // Runner may already be gone after a refused connect.
        let _ = self.outbound.unbounded_send(Outbound::Close);
        self.outbound.close_channel();
    }
}

/// Spawn the socket runner and return its handle.
pub(crate) fn connect_socket(
    config: ClientConfig,
    on_event: Callback<ServerEvent>,
    on_state: Callback<ConnectionState>,
) -> SocketHandle {
    let (outbound, commands) = mpsc::unbounded();
    yew::platform::spawn_local(run_socket_loop(config, commands, on_event, on_state));
    SocketHandle { outbound }
}

async fn run_socket_loop(
    config: ClientConfig,
    mut commands: UnboundedReceiver<Outbound>,
    on_event: Callback<ServerEvent>,
    on_state: Callback<ConnectionState>,
) {
    let mut session = ClientSession::new();
    let mut attempt = 0u32;
    on_state.emit(ConnectionState::Connecting);

    loop {
        let exit = run_connection(
            &config,
            &mut session,
            &mut commands,
            &mut attempt,
            &on_event,
            &on_state,
        )
        .await;
        match exit {
            Ok(Exit::Closed | Exit::Refused) => {
                on_state.emit(ConnectionState::Closed);
                return;
            }
            Ok(Exit::Lost) => console::warn!("socket connection lost"),
            Err(err) => console::warn!(err.to_string(), err.detail().to_string()),
        }
        session.restart();

        let retry_in_ms = backoff_delay_ms(attempt);
        attempt = attempt.saturating_add(1);
        on_state.emit(ConnectionState::Reconnecting {
            attempt,
            retry_in_ms,
        });
        if !wait_for_retry(retry_in_ms, &config, &mut session, &mut commands).await {
            on_state.emit(ConnectionState::Closed);
            return;
        }
    }
}

/// Sleep before the next attempt, buffering commands meanwhile.
///
/// Returns `false` when the handle was closed during the wait.
async fn wait_for_retry(
    retry_in_ms: u32,
    config: &ClientConfig,
    session: &mut ClientSession,
    commands: &mut UnboundedReceiver<Outbound>,
) -> bool {
    let mut timer = TimeoutFuture::new(retry_in_ms).fuse();
    loop {
        select! {
            () = timer => return true,
            command = commands.next() => match command {
                Some(Outbound::Emit(command)) => {
                    let frame = session.emit(
                        command.event_name(config.contract),
                        command.args(config.contract),
                    );
                    debug_assert!(frame.is_none(), "session restarted before waiting");
                    session.requeue(frame);
                }
                Some(Outbound::Close) | None => return false,
            },
        }
    }
}

enum Wake {
    Frame(Option<Result<Message, gloo_net::websocket::WebSocketError>>),
    Command(Option<Outbound>),
    Silent,
}

async fn run_connection(
    config: &ClientConfig,
    session: &mut ClientSession,
    commands: &mut UnboundedReceiver<Outbound>,
    attempt: &mut u32,
    on_event: &Callback<ServerEvent>,
    on_state: &Callback<ConnectionState>,
) -> Result<Exit, SocketError> {
    let socket = WebSocket::open(&config.socket_url).map_err(|err| SocketError::Open {
        detail: err.to_string(),
    })?;
    let (mut sink, stream) = socket.split();
    let mut stream = stream.fuse();
    session.restart();
    let mut silence = TimeoutFuture::new(session.heartbeat_deadline_ms()).fuse();

    loop {
        let wake = select! {
            frame = stream.next() => Wake::Frame(frame),
            command = commands.next() => Wake::Command(command),
            () = silence => Wake::Silent,
        };
        match wake {
            Wake::Frame(Some(Ok(Message::Text(raw)))) => {
                let received = session.receive(&raw);
                silence = TimeoutFuture::new(session.heartbeat_deadline_ms()).fuse();
                let step = match received {
                    Ok(step) => step,
                    Err(err) => {
                        console::warn!("dropping socket frame", err.to_string());
                        continue;
                    }
                };
                send_frames(&mut sink, session, step.outgoing).await?;
                for event in step.events {
                    match event {
                        SessionEvent::Connected => {
                            *attempt = 0;
                            on_state.emit(ConnectionState::Connected);
                        }
                        SessionEvent::Event { name, args } => {
                            match ServerEvent::decode(config.contract, &name, &args) {
                                Ok(event) => on_event.emit(event),
                                Err(err) => {
                                    console::warn!("ignoring socket event", err.to_string());
                                }
                            }
                        }
                        SessionEvent::ConnectRefused(detail) => {
                            console::error!("socket namespace refused", detail.to_string());
                            return Ok(Exit::Refused);
                        }
                        SessionEvent::Disconnected => return Ok(Exit::Lost),
                    }
                }
            }
            Wake::Frame(Some(Ok(Message::Bytes(_)))) => {
                silence = TimeoutFuture::new(session.heartbeat_deadline_ms()).fuse();
                console::warn!("ignoring binary socket frame");
            }
            Wake::Frame(Some(Err(err))) => {
                return Err(SocketError::Receive {
                    detail: err.to_string(),
                });
            }
            Wake::Frame(None) => return Ok(Exit::Lost),
            Wake::Command(Some(Outbound::Emit(command))) => {
                let frame = session.emit(
                    command.event_name(config.contract),
                    command.args(config.contract),
                );
                send_frames(&mut sink, session, frame).await?;
            }
            Wake::Command(Some(Outbound::Close) | None) => {
                let frame = session.disconnect();
                // Best effort; the page may be unloading.
                let _ = sink.send(Message::Text(frame)).await;
                let _ = sink.close().await;
                return Ok(Exit::Closed);
            }
            Wake::Silent => {
                console::warn!("socket heartbeat missed");
                return Ok(Exit::Lost);
            }
        }
    }
}

/// Write frames in order; on failure the undelivered ones go back to the session.
async fn send_frames(
    sink: &mut SplitSink<WebSocket, Message>,
    session: &mut ClientSession,
    frames: impl IntoIterator<Item = String>,
) -> Result<(), SocketError> {
    let mut frames = frames.into_iter();
    while let Some(frame) = frames.next() {
        if let Err(err) = sink.send(Message::Text(frame.clone())).await {
            session.requeue(std::iter::once(frame).chain(frames));
            return Err(SocketError::Send {
                detail: err.to_string(),
            });
        }
    }
    Ok(())
}
