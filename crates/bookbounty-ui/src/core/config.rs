//! Client configuration resolved from the page location.
//!
//! # Design
//! - Derive the socket endpoint from the page origin so the UI works behind
//!   whatever host/port serves it.
//! - Contract version: `?contract=` query parameter, then the stored choice,
//!   then v1.

use bookbounty_events::ContractVersion;

/// Path of the Socket.IO endpoint with the WebSocket-only transport.
pub const SOCKET_PATH: &str = "/socket.io/?EIO=4&transport=websocket";

/// Query parameter selecting the backend contract version.
pub const CONTRACT_PARAM: &str = "contract";

/// Runtime configuration for the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket URL of the Socket.IO endpoint.
    pub socket_url: String,
    /// Backend contract version.
    pub contract: ContractVersion,
}

impl ClientConfig {
    /// Resolve the configuration from location parts.
    ///
    /// `protocol` is `location.protocol` (`http:`), `host` is `location.host`
    /// (host plus optional port) and `search` is `location.search`.
    #[must_use]
    pub fn resolve(protocol: &str, host: &str, search: &str, stored: Option<&str>) -> Self {
        let contract = contract_from_query(search)
            .or_else(|| stored.and_then(ContractVersion::from_tag))
            .unwrap_or_default();
        Self {
            socket_url: socket_url(protocol, host),
            contract,
        }
    }
}

/// Build the WebSocket URL for a page served from `protocol`//`host`.
#[must_use]
pub fn socket_url(protocol: &str, host: &str) -> String {
    let scheme = if protocol.trim_end_matches(':').eq_ignore_ascii_case("https") {
        "wss"
    } else {
        "ws"
    };
    let host = if host.is_empty() { "localhost:5000" } else { host };
    format!("{scheme}://{host}{SOCKET_PATH}")
}

/// Read the contract version from a `?a=b&c=d` query string.
#[must_use]
pub fn contract_from_query(search: &str) -> Option<ContractVersion> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == CONTRACT_PARAM)
        .and_then(|(_, value)| ContractVersion::from_tag(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_url_follows_page_scheme() {
        assert_eq!(
            socket_url("http:", "192.168.1.2:5000"),
            "ws://192.168.1.2:5000/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            socket_url("https:", "books.example"),
            "wss://books.example/socket.io/?EIO=4&transport=websocket"
        );
        assert!(socket_url("http:", "").starts_with("ws://localhost:5000/"));
    }

    #[test]
    fn query_beats_storage() {
        let config = ClientConfig::resolve("http:", "h", "?x=1&contract=v2", Some("v1"));
        assert_eq!(config.contract, ContractVersion::V2);
    }

    #[test]
    fn storage_is_used_without_query() {
        let config = ClientConfig::resolve("http:", "h", "", Some("v2"));
        assert_eq!(config.contract, ContractVersion::V2);
    }

    #[test]
    fn defaults_to_v1() {
        let config = ClientConfig::resolve("http:", "h", "?contract=bogus", Some("nope"));
        assert_eq!(config.contract, ContractVersion::V1);
        assert_eq!(contract_from_query(""), None);
    }
}
