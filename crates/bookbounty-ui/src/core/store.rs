//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Slices own their reducers; this module only routes inbound events.
//! - Settings replies go through the one-shot listener registry instead of
//!   the store, so an unsolicited reply never overwrites form edits.

use crate::core::connection::ConnectionState;
use crate::core::theme::ThemePreference;
use crate::features::job::state::{JobState, apply_message, apply_progress};
use crate::features::settings::state::SettingsState;
use crate::features::toasts::state::{ToastState, push};
use crate::features::wanted::state::{WantedState, apply_update};
use bookbounty_events::{ContractVersion, ServerEvent};
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Backend contract in use.
    pub contract: ContractVersion,
    /// Wanted-list panel.
    pub wanted: WantedState,
    /// Download job panel.
    pub job: JobState,
    /// Settings modal.
    pub settings: SettingsState,
    /// Toast queue.
    pub toasts: ToastState,
    /// Theme preference.
    pub theme: ThemePreference,
    /// Realtime connection status.
    pub connection: ConnectionState,
}

impl AppStore {
    /// Fresh store for a contract version and restored theme.
    #[must_use]
    pub fn init(contract: ContractVersion, theme: ThemePreference) -> Self {
        Self {
            contract,
            wanted: WantedState::for_contract(contract),
            job: JobState::default(),
            settings: SettingsState::for_contract(contract),
            toasts: ToastState::default(),
            theme,
            connection: ConnectionState::Connecting,
        }
    }
}

/// What applying an inbound event did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Store updated.
    Applied,
    /// Toast appended with this id.
    ToastShown(u64),
    /// Left to registered listeners.
    Deferred,
}

/// Route an inbound event into its slice.
///
/// `timestamp` is only used for toasts.
pub fn apply_server_event(
    store: &mut AppStore,
    event: ServerEvent,
    timestamp: String,
) -> ApplyOutcome {
    match event {
        ServerEvent::Wanted(update) => {
            apply_update(&mut store.wanted, update);
            ApplyOutcome::Applied
        }
        ServerEvent::Progress(progress) => {
            apply_progress(&mut store.job, progress);
            ApplyOutcome::Applied
        }
        ServerEvent::JobMessage(message) => {
            apply_message(&mut store.job, &message);
            ApplyOutcome::Applied
        }
        ServerEvent::Toast(toast) => {
            ApplyOutcome::ToastShown(push(&mut store.toasts, toast, timestamp))
        }
        ServerEvent::SettingsLoaded(_) => ApplyOutcome::Deferred,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookbounty_events::{
        FetchOutcome, JobProgress, JobStatus, SettingsRecord, ToastMessage, WantedEntry,
        WantedUpdate,
    };

    #[test]
    fn init_picks_contract_policy_and_fields() {
        let store = AppStore::init(ContractVersion::V2, ThemePreference::default());
        assert_eq!(store.settings.fields.len(), ContractVersion::V2.settings_fields().len());
        assert_eq!(
            store.wanted.policy,
            crate::features::wanted::state::SelectAllPolicy::ClearOnToggle
        );
        assert_eq!(store.connection, ConnectionState::Connecting);
    }

    #[test]
    fn events_land_in_their_slices() {
        let mut store = AppStore::init(ContractVersion::V1, ThemePreference::default());
        let outcome = apply_server_event(
            &mut store,
            ServerEvent::Wanted(WantedUpdate {
                busy: true,
                items: vec![WantedEntry {
                    label: "Ann Leckie - Ancillary Justice".to_string(),
                    checked: true,
                }],
                outcome: FetchOutcome::Listing,
            }),
            String::new(),
        );
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert!(store.wanted.busy);
        assert!(store.wanted.select_all);

        apply_server_event(
            &mut store,
            ServerEvent::Progress(JobProgress {
                status: JobStatus::Running,
                percent: 25.0,
                rows: Vec::new(),
            }),
            String::new(),
        );
        assert_eq!(store.job.bar.aria_value(), "25");

        let outcome = apply_server_event(
            &mut store,
            ServerEvent::Toast(ToastMessage {
                title: "T".to_string(),
                message: "M".to_string(),
            }),
            "12:00:00".to_string(),
        );
        assert!(matches!(outcome, ApplyOutcome::ToastShown(_)));
        assert_eq!(store.toasts.items[0].timestamp, "12:00:00");
    }

    #[test]
    fn settings_replies_are_left_to_listeners() {
        let mut store = AppStore::init(ContractVersion::V1, ThemePreference::default());
        let before = store.clone();
        let outcome = apply_server_event(
            &mut store,
            ServerEvent::SettingsLoaded(SettingsRecord {
                values: vec![("readarr_address".to_string(), "http://x".to_string())],
            }),
            String::new(),
        );
        assert_eq!(outcome, ApplyOutcome::Deferred);
        assert_eq!(store, before);
    }
}
