//! Wanted-list state and reducers.

use bookbounty_events::{ContractVersion, FetchOutcome, SelectedItem, WantedUpdate};

/// How a single checkbox change affects the select-all checkbox.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectAllPolicy {
    /// Select-all is the AND of every item after each change.
    #[default]
    Recompute,
    /// Any individual change unchecks select-all.
    ClearOnToggle,
}

impl SelectAllPolicy {
    /// Policy the given backend contract's page used.
    #[must_use]
    pub const fn for_contract(version: ContractVersion) -> Self {
        match version {
            ContractVersion::V1 => Self::Recompute,
            ContractVersion::V2 => Self::ClearOnToggle,
        }
    }
}

/// One rendered wanted-list checkbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WantedItem {
    /// Display label.
    pub label: String,
    /// Checkbox state.
    pub checked: bool,
}

/// Wanted-list panel state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WantedState {
    /// Rendered items, in server order.
    pub items: Vec<WantedItem>,
    /// Select-all checkbox state.
    pub select_all: bool,
    /// Select-all is hidden until the first update arrives.
    pub select_all_visible: bool,
    /// Retrieval in progress: spinner shown, trigger disabled.
    pub busy: bool,
    /// Server error shown verbatim under the list.
    pub status_line: Option<String>,
    /// Select-all behaviour on individual toggles.
    pub policy: SelectAllPolicy,
}

impl WantedState {
    /// Empty state for a contract version.
    #[must_use]
    pub fn for_contract(version: ContractVersion) -> Self {
        Self {
            policy: SelectAllPolicy::for_contract(version),
            ..Self::default()
        }
    }
}

/// Start a retrieval: busy, list cleared.
pub fn begin_fetch(state: &mut WantedState) {
    state.busy = true;
    state.items.clear();
    state.status_line = None;
}

/// Stop requested: drop the busy indicator without waiting for the server.
pub const fn stop_fetch(state: &mut WantedState) {
    state.busy = false;
}

/// Reset requested: clear the list and the busy indicator.
pub fn reset_fetch(state: &mut WantedState) {
    state.items.clear();
    state.busy = false;
    state.select_all = false;
    state.status_line = None;
}

/// Select-all changed: mirror it onto every item.
pub fn toggle_all(state: &mut WantedState, checked: bool) {
    state.select_all = checked;
    for item in &mut state.items {
        item.checked = checked;
    }
}

/// One item changed.
pub fn toggle_item(state: &mut WantedState, index: usize, checked: bool) {
    let Some(item) = state.items.get_mut(index) else {
        return;
    };
    item.checked = checked;
    state.select_all = match state.policy {
        SelectAllPolicy::Recompute => all_checked(&state.items),
        SelectAllPolicy::ClearOnToggle => false,
    };
}

/// Rebuild the list from a server update.
pub fn apply_update(state: &mut WantedState, update: WantedUpdate) {
    state.busy = update.busy;
    state.select_all_visible = true;
    match update.outcome {
        FetchOutcome::Listing => {
            state.items = update
                .items
                .into_iter()
                .map(|entry| WantedItem {
                    label: entry.label,
                    checked: entry.checked,
                })
                .collect();
            state.status_line = None;
        }
        FetchOutcome::Failed { code, message } => {
            state.items.clear();
            state.status_line = Some(if code.is_empty() {
                message
            } else {
                format!("Error {code}: {message}")
            });
        }
        FetchOutcome::Cancelled => {
            state.items.clear();
            state.status_line = None;
        }
    }
    state.select_all = match state.policy {
        SelectAllPolicy::Recompute => all_checked(&state.items),
        SelectAllPolicy::ClearOnToggle => false,
    };
}

/// Checked items with their positions.
#[must_use]
pub fn selected_items(state: &WantedState) -> Vec<SelectedItem> {
    state
        .items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.checked)
        .map(|(index, item)| SelectedItem {
            index,
            label: item.label.clone(),
        })
        .collect()
}

/// AND over every checkbox; true for an empty list.
#[must_use]
pub fn all_checked(items: &[WantedItem]) -> bool {
    items.iter().all(|item| item.checked)
}
