//! # Design
//!
//! - Constant-message errors; context lives in fields, not in the message.
//! - Codec failures and contract failures stay separate so the transport can
//!   drop a bad frame without tearing down the connection.

use thiserror::Error;

/// Errors produced while decoding or encoding realtime frames.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The frame carried no packet type.
    #[error("empty frame")]
    Empty,
    /// Unknown Engine.IO packet type.
    #[error("unknown engine packet type")]
    UnknownEnginePacket {
        /// Leading character of the frame.
        tag: char,
    },
    /// Unknown Socket.IO packet type.
    #[error("unknown socket packet type")]
    UnknownSocketPacket {
        /// Leading character of the message body.
        tag: char,
    },
    /// Binary Socket.IO packets are not supported over the text transport.
    #[error("binary socket packets are unsupported")]
    UnsupportedBinary,
    /// Event packet body did not contain an event name.
    #[error("event packet without a name")]
    MissingEventName,
    /// JSON body failed to parse.
    #[error("frame json failure")]
    Json {
        /// Packet kind being decoded.
        packet: &'static str,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl FrameError {
    pub(crate) const fn json(packet: &'static str, source: serde_json::Error) -> Self {
        Self::Json { packet, source }
    }
}

/// Errors produced while mapping realtime events onto the typed contract.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The server emitted an event this contract version does not know.
    #[error("unknown inbound event")]
    UnknownEvent {
        /// Event name as received.
        name: String,
    },
    /// A known event arrived without its payload argument.
    #[error("inbound event missing payload")]
    MissingPayload {
        /// Event name as received.
        name: &'static str,
    },
    /// The payload did not match the expected shape.
    #[error("inbound payload decode failure")]
    Payload {
        /// Event name as received.
        name: &'static str,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn json_errors_keep_their_source() {
        let source = serde_json::from_str::<serde_json::Value>("{")
            .err()
            .map(|err| FrameError::json("open", err));
        let Some(err) = source else {
            panic!("expected a json failure");
        };
        assert_eq!(err.to_string(), "frame json failure");
        assert!(err.source().is_some());
    }

    #[test]
    fn contract_errors_use_constant_messages() {
        let err = ContractError::UnknownEvent {
            name: "surprise".to_string(),
        };
        assert_eq!(err.to_string(), "unknown inbound event");
        let err = ContractError::MissingPayload {
            name: "readarr_update",
        };
        assert_eq!(err.to_string(), "inbound event missing payload");
    }
}
