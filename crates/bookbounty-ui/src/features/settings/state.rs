//! Settings modal state.

use bookbounty_events::{ContractVersion, SettingsRecord};

/// One labelled form input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingField {
    /// Wire key.
    pub key: &'static str,
    /// Form label.
    pub label: &'static str,
    /// Current input text.
    pub value: String,
}

/// Settings modal state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsState {
    /// Modal visible.
    pub open: bool,
    /// Waiting for the settings reply.
    pub loading: bool,
    /// Form fields in display order.
    pub fields: Vec<SettingField>,
    /// Token of the visible save confirmation, if any.
    pub notice: Option<u32>,
    next_token: u32,
}

impl SettingsState {
    /// Empty form with the contract's field set.
    #[must_use]
    pub fn for_contract(version: ContractVersion) -> Self {
        Self {
            fields: version
                .settings_fields()
                .iter()
                .map(|&(key, label)| SettingField {
                    key,
                    label,
                    value: String::new(),
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Whether the save confirmation is visible.
    #[must_use]
    pub const fn notice_visible(&self) -> bool {
        self.notice.is_some()
    }
}

/// Open the modal and wait for the server's values.
pub const fn open_modal(state: &mut SettingsState) {
    state.open = true;
    state.loading = true;
}

/// Close the modal; edits are kept until the next load.
pub const fn close_modal(state: &mut SettingsState) {
    state.open = false;
    state.loading = false;
}

/// Fill the form from a settings reply. Keys missing from the reply keep
/// their current text.
pub fn populate(state: &mut SettingsState, record: &SettingsRecord) {
    for field in &mut state.fields {
        if let Some(value) = record.get(field.key) {
            value.clone_into(&mut field.value);
        }
    }
    state.loading = false;
}

/// Replace one field's text. Unknown keys are ignored.
pub fn edit(state: &mut SettingsState, key: &str, value: String) {
    if let Some(field) = state.fields.iter_mut().find(|field| field.key == key) {
        field.value = value;
    }
}

/// Every field, in form order, as sent on save.
#[must_use]
pub fn to_record(state: &SettingsState) -> SettingsRecord {
    SettingsRecord {
        values: state
            .fields
            .iter()
            .map(|field| (field.key.to_string(), field.value.clone()))
            .collect(),
    }
}

/// Show the save confirmation and return the token that hides it.
pub const fn show_notice(state: &mut SettingsState) -> u32 {
    state.next_token = state.next_token.wrapping_add(1);
    state.notice = Some(state.next_token);
    state.next_token
}

/// Hide the confirmation if `token` is still the latest one.
pub fn hide_notice(state: &mut SettingsState, token: u32) {
    if state.notice == Some(token) {
        state.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> SettingsRecord {
        SettingsRecord {
            values: pairs
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect(),
        }
    }

    #[test]
    fn field_set_follows_contract() {
        let v1 = SettingsState::for_contract(ContractVersion::V1);
        let v2 = SettingsState::for_contract(ContractVersion::V2);
        assert_eq!(v1.fields[0].key, "readarr_address");
        assert!(v2.fields.iter().any(|field| field.key == "libgenSearchBase"));
        assert!(v1.fields.iter().all(|field| field.value.is_empty()));
    }

    #[test]
    fn load_edit_save_round_trip() {
        let mut state = SettingsState::for_contract(ContractVersion::V1);
        open_modal(&mut state);
        assert!(state.loading);
        populate(
            &mut state,
            &record(&[
                ("readarr_address", "http://readarr:8787"),
                ("sync_schedule", "2, 14"),
            ]),
        );
        assert!(!state.loading);
        edit(&mut state, "sleep_interval", "30".to_string());
        edit(&mut state, "not_a_field", "x".to_string());

        let saved = to_record(&state);
        assert_eq!(saved.values.len(), state.fields.len());
        assert_eq!(saved.get("readarr_address"), Some("http://readarr:8787"));
        assert_eq!(saved.get("sync_schedule"), Some("2, 14"));
        assert_eq!(saved.get("sleep_interval"), Some("30"));
        assert_eq!(saved.get("not_a_field"), None);
    }

    #[test]
    fn only_latest_notice_token_hides() {
        let mut state = SettingsState::default();
        let first = show_notice(&mut state);
        let second = show_notice(&mut state);
        hide_notice(&mut state, first);
        assert!(state.notice_visible());
        hide_notice(&mut state, second);
        assert!(!state.notice_visible());
    }

    #[test]
    fn close_keeps_values() {
        let mut state = SettingsState::for_contract(ContractVersion::V2);
        open_modal(&mut state);
        edit(&mut state, "readarrApiKey", "abc".to_string());
        close_modal(&mut state);
        assert!(!state.open);
        assert_eq!(to_record(&state).get("readarrApiKey"), Some("abc"));
    }
}
