//! Wire contract for the BookBounty realtime channel.
//!
//! The backend speaks Socket.IO over a WebSocket. This crate owns everything
//! the browser needs to talk to it without touching the DOM:
//!
//! - [`frame`] encodes and decodes Engine.IO/Socket.IO text frames.
//! - [`session`] drives the client side of the handshake and heartbeat.
//! - [`routing`] maps UI commands and server events onto event names for both
//!   backend contract versions.
//! - [`payloads`] holds the normalized payload types the UI reduces over.
#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![warn(missing_docs, unreachable_pub)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod frame;
pub mod payloads;
pub mod routing;
pub mod session;

pub use error::{ContractError, FrameError};
pub use payloads::{
    FetchOutcome, JobProgress, JobStatus, ProgressEntry, SettingsRecord, StatusMessage,
    ToastMessage, WantedEntry, WantedUpdate,
};
pub use routing::{Command, ContractVersion, InboundKind, SelectedItem, ServerEvent};
pub use session::{CONNECT_TIMEOUT_MS, ClientSession, SessionEvent, SessionState, SessionStep};
