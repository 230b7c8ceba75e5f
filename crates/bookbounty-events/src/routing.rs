//! Event names and payload shapes per backend contract version.
//!
//! # Design
//! - One [`ContractVersion`] picks names, casing and selection encoding.
//! - Outbound [`Command`]s and inbound [`ServerEvent`]s are version-agnostic.
//! - Wire structs stay private to this module.

use crate::error::ContractError;
use crate::payloads::{
    FetchOutcome, JobProgress, JobStatus, ProgressEntry, SettingsRecord, StatusMessage,
    ToastMessage, WantedEntry, WantedUpdate, display_value,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Backend contract version the client talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContractVersion {
    /// snake_case events (`readarr_get_wanted`, `readarr_update`, ...).
    #[default]
    V1,
    /// PascalCase payloads (`readarr`, `readarr_status`, `{Data: [...]}`).
    V2,
}

impl ContractVersion {
    /// Parse a version tag such as `v1` or `2`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Some(Self::V1),
            "v2" | "2" => Some(Self::V2),
            _ => None,
        }
    }

    /// Stable tag used in URLs and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }

    /// Settings fields in form order: `(wire key, label)`.
    #[must_use]
    pub const fn settings_fields(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::V1 => &[
                ("readarr_address", "Readarr Address"),
                ("readarr_api_key", "Readarr API Key"),
                ("search_type", "Search Type"),
                ("sleep_interval", "Sleep Interval"),
                ("sync_schedule", "Sync Schedule"),
                ("minimum_match_ratio", "Minimum Match Ratio"),
            ],
            Self::V2 => &[
                ("readarrApiKey", "Readarr API Key"),
                ("readarrMaxTags", "Readarr Max Tags"),
                ("readarrApiTimeout", "Readarr API Timeout"),
                ("libgenSearchBase", "Libgen Search Base"),
                ("libgenSearchType", "Libgen Search Type"),
                ("libgenSleepInterval", "Libgen Sleep Interval"),
            ],
        }
    }

    fn settings_keys(self) -> Vec<&'static str> {
        self.settings_fields().iter().map(|(key, _)| *key).collect()
    }
}

/// A checked wanted-list item selected for download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedItem {
    /// Position in the rendered list.
    pub index: usize,
    /// Display label.
    pub label: String,
}

/// User action forwarded to the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start retrieving the wanted list.
    FetchWanted,
    /// Stop the wanted-list retrieval.
    StopWanted,
    /// Reset the wanted-list retrieval.
    ResetWanted,
    /// Queue the selected items for download.
    SubmitSelection(Vec<SelectedItem>),
    /// Stop the download job.
    StopDownloads,
    /// Reset the download job.
    ResetDownloads,
    /// Request the current settings.
    LoadSettings,
    /// Persist edited settings.
    SaveSettings(SettingsRecord),
}

impl Command {
    /// Event name for this command.
    #[must_use]
    pub const fn event_name(&self, version: ContractVersion) -> &'static str {
        match (version, self) {
            (ContractVersion::V1, Self::FetchWanted) => "readarr_get_wanted",
            (ContractVersion::V1, Self::StopWanted) => "stop_readarr",
            (ContractVersion::V1, Self::ResetWanted) => "reset_readarr",
            (ContractVersion::V1, Self::SubmitSelection(_)) => "add_to_download_list",
            (ContractVersion::V1, Self::StopDownloads) => "stop_libgen",
            (ContractVersion::V1, Self::ResetDownloads) => "reset_libgen",
            (ContractVersion::V1, Self::LoadSettings) => "load_settings",
            (ContractVersion::V1, Self::SaveSettings(_)) => "update_settings",
            (ContractVersion::V2, Self::FetchWanted) => "readarr",
            (ContractVersion::V2, Self::StopWanted | Self::StopDownloads) => "stopper",
            (ContractVersion::V2, Self::ResetWanted | Self::ResetDownloads) => "reset",
            (ContractVersion::V2, Self::SubmitSelection(_)) => "libgen",
            (ContractVersion::V2, Self::LoadSettings) => "loadSettings",
            (ContractVersion::V2, Self::SaveSettings(_)) => "updateSettings",
        }
    }

    /// Positional arguments for this command.
    #[must_use]
    pub fn args(&self, version: ContractVersion) -> Vec<Value> {
        match self {
            Self::SubmitSelection(items) => match version {
                ContractVersion::V1 => {
                    let indices = items.iter().map(|item| item.index).collect::<Vec<_>>();
                    vec![json!(indices)]
                }
                ContractVersion::V2 => {
                    let labels = items.iter().map(|item| item.label.as_str()).collect::<Vec<_>>();
                    vec![json!({ "Data": labels })]
                }
            },
            Self::SaveSettings(record) => vec![record.to_object()],
            Self::FetchWanted
            | Self::StopWanted
            | Self::ResetWanted
            | Self::StopDownloads
            | Self::ResetDownloads
            | Self::LoadSettings => Vec::new(),
        }
    }
}

/// Discriminant of inbound events, used to key listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InboundKind {
    /// Wanted-list update.
    Wanted,
    /// Job progress snapshot.
    Progress,
    /// Job status message.
    JobMessage,
    /// Settings reply.
    SettingsLoaded,
    /// Toast notification.
    Toast,
}

/// Typed inbound event.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerEvent {
    /// Wanted-list update.
    Wanted(WantedUpdate),
    /// Job progress snapshot.
    Progress(JobProgress),
    /// Job status message.
    JobMessage(StatusMessage),
    /// Settings reply.
    SettingsLoaded(SettingsRecord),
    /// Toast notification.
    Toast(ToastMessage),
}

impl ServerEvent {
    /// Listener key for this event.
    #[must_use]
    pub const fn kind(&self) -> InboundKind {
        match self {
            Self::Wanted(_) => InboundKind::Wanted,
            Self::Progress(_) => InboundKind::Progress,
            Self::JobMessage(_) => InboundKind::JobMessage,
            Self::SettingsLoaded(_) => InboundKind::SettingsLoaded,
            Self::Toast(_) => InboundKind::Toast,
        }
    }

    /// Decode a named inbound event for `version`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the name is unknown for the version,
    /// the payload argument is missing, or it does not match the expected
    /// shape.
    pub fn decode(
        version: ContractVersion,
        name: &str,
        args: &[Value],
    ) -> Result<Self, ContractError> {
        match (version, name) {
            (_, "new_toast_msg") => {
                let toast: ToastMessage = payload("new_toast_msg", args)?;
                Ok(Self::Toast(toast))
            }
            (ContractVersion::V1, "readarr_update") => {
                let wire: WantedV1 = payload("readarr_update", args)?;
                Ok(Self::Wanted(wire.into()))
            }
            (ContractVersion::V1, "libgen_update") => {
                let wire: ProgressV1 = payload("libgen_update", args)?;
                Ok(Self::Progress(wire.into()))
            }
            (ContractVersion::V1, "settings_loaded") => {
                let object: serde_json::Map<String, Value> = payload("settings_loaded", args)?;
                Ok(Self::SettingsLoaded(SettingsRecord::from_object(
                    &version.settings_keys(),
                    &object,
                )))
            }
            (ContractVersion::V2, "readarr_status") => {
                let wire: WantedV2 = payload("readarr_status", args)?;
                Ok(Self::Wanted(wire.into()))
            }
            (ContractVersion::V2, "progress_status") => {
                let wire: ProgressV2 = payload("progress_status", args)?;
                Ok(Self::Progress(wire.into()))
            }
            (ContractVersion::V2, "libgen_status") => {
                let wire: StatusV2 = payload("libgen_status", args)?;
                Ok(Self::JobMessage(StatusMessage {
                    status: wire.status,
                    detail: wire.data.as_ref().map(display_value),
                }))
            }
            (ContractVersion::V2, "settingsLoaded") => {
                let object: serde_json::Map<String, Value> = payload("settingsLoaded", args)?;
                Ok(Self::SettingsLoaded(SettingsRecord::from_object(
                    &version.settings_keys(),
                    &object,
                )))
            }
            _ => Err(ContractError::UnknownEvent {
                name: name.to_string(),
            }),
        }
    }
}

fn payload<T: DeserializeOwned>(name: &'static str, args: &[Value]) -> Result<T, ContractError> {
    let value = args
        .first()
        .cloned()
        .ok_or(ContractError::MissingPayload { name })?;
    serde_json::from_value(value).map_err(|source| ContractError::Payload { name, source })
}

fn author_title(author: &str, book_name: &str) -> String {
    format!("{author} - {book_name}")
}

#[derive(Deserialize)]
struct WantedV1 {
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: Vec<WantedItemV1>,
}

#[derive(Deserialize)]
struct WantedItemV1 {
    author: String,
    book_name: String,
    #[serde(default)]
    checked: bool,
}

impl From<WantedV1> for WantedUpdate {
    fn from(wire: WantedV1) -> Self {
        Self {
            busy: wire.status == "busy",
            items: wire
                .data
                .into_iter()
                .map(|item| WantedEntry {
                    label: author_title(&item.author, &item.book_name),
                    checked: item.checked,
                })
                .collect(),
            outcome: FetchOutcome::Listing,
        }
    }
}

#[derive(Deserialize)]
struct ProgressV1 {
    #[serde(default)]
    status: String,
    #[serde(default)]
    percent_completion: f64,
    #[serde(default)]
    data: Vec<ProgressItemV1>,
}

#[derive(Deserialize)]
struct ProgressItemV1 {
    author: String,
    book_name: String,
    #[serde(default)]
    status: String,
}

impl From<ProgressV1> for JobProgress {
    fn from(wire: ProgressV1) -> Self {
        Self {
            status: JobStatus::parse(&wire.status),
            percent: wire.percent_completion,
            rows: wire
                .data
                .into_iter()
                .map(|item| ProgressEntry {
                    label: author_title(&item.author, &item.book_name),
                    status: item.status,
                })
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct WantedV2 {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Code", default)]
    code: Option<Value>,
    #[serde(rename = "Data", default)]
    data: Value,
}

impl From<WantedV2> for WantedUpdate {
    fn from(wire: WantedV2) -> Self {
        if wire.status.eq_ignore_ascii_case("success") {
            let items = match wire.data {
                Value::Array(items) => items
                    .iter()
                    .map(|item| WantedEntry {
                        label: display_value(item),
                        checked: false,
                    })
                    .collect(),
                _ => Vec::new(),
            };
            return Self {
                busy: false,
                items,
                outcome: FetchOutcome::Listing,
            };
        }
        let code = wire.code.as_ref().map(display_value).unwrap_or_default();
        let message = display_value(&wire.data);
        let outcome = if code.is_empty() && message.is_empty() {
            FetchOutcome::Cancelled
        } else {
            FetchOutcome::Failed { code, message }
        };
        Self {
            busy: false,
            items: Vec::new(),
            outcome,
        }
    }
}

#[derive(Deserialize)]
struct ProgressV2 {
    #[serde(rename = "Status", default)]
    status: String,
    #[serde(rename = "Percent_Completion", default)]
    percent_completion: f64,
    #[serde(rename = "Data", default)]
    data: Vec<ProgressItemV2>,
}

#[derive(Deserialize)]
struct ProgressItemV2 {
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Status", default)]
    status: String,
}

impl From<ProgressV2> for JobProgress {
    fn from(wire: ProgressV2) -> Self {
        Self {
            status: JobStatus::parse(&wire.status),
            percent: wire.percent_completion,
            rows: wire
                .data
                .into_iter()
                .map(|item| ProgressEntry {
                    label: item.item,
                    status: item.status,
                })
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct StatusV2 {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Data", default)]
    data: Option<Value>,
}
