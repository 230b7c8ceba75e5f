//! Realtime connection status shown in the navbar.

/// First reconnect delay.
pub const RECONNECT_BASE_MS: u32 = 1_000;

/// Longest reconnect delay.
pub const RECONNECT_MAX_MS: u32 = 5_000;

/// Socket connection status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// First connection attempt in flight.
    #[default]
    Connecting,
    /// Namespace connected.
    Connected,
    /// Waiting before the next attempt.
    Reconnecting {
        /// Attempt number about to run (1-based).
        attempt: u32,
        /// Delay before that attempt.
        retry_in_ms: u32,
    },
    /// Connection closed for good.
    Closed,
}

impl ConnectionState {
    /// Short label for the status badge.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Connecting => "Connecting".to_string(),
            Self::Connected => "Connected".to_string(),
            Self::Reconnecting { retry_in_ms, .. } => {
                format!("Reconnecting in {}s", retry_in_ms.div_ceil(1_000))
            }
            Self::Closed => "Disconnected".to_string(),
        }
    }

    /// Bootstrap background class for the status badge.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Connecting => "bg-secondary",
            Self::Connected => "bg-success",
            Self::Reconnecting { .. } => "bg-warning",
            Self::Closed => "bg-danger",
        }
    }
}

/// Exponential backoff (1s → 5s) for reconnect attempts.
#[must_use]
pub fn backoff_delay_ms(attempt: u32) -> u32 {
    let capped = attempt.min(5);
    let delay = RECONNECT_BASE_MS.saturating_mul(2u32.saturating_pow(capped));
    delay.clamp(RECONNECT_BASE_MS, RECONNECT_MAX_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_then_caps() {
        assert_eq!(backoff_delay_ms(0), 1_000);
        assert_eq!(backoff_delay_ms(1), 2_000);
        assert_eq!(backoff_delay_ms(2), 4_000);
        assert_eq!(backoff_delay_ms(3), 5_000);
        assert_eq!(backoff_delay_ms(40), 5_000);
    }

    #[test]
    fn reconnect_label_rounds_up_seconds() {
        let state = ConnectionState::Reconnecting {
            attempt: 2,
            retry_in_ms: 1_500,
        };
        assert_eq!(state.label(), "Reconnecting in 2s");
        assert_eq!(state.badge_class(), "bg-warning");
        assert_eq!(ConnectionState::default(), ConnectionState::Connecting);
    }
}
