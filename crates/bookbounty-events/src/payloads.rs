//! Normalized payloads shared by both backend contract versions.
//!
//! The wire structs for each version live in [`crate::routing`]; they are
//! converted into these types immediately after decoding so the UI never
//! sees version-specific casing.

use serde_json::{Map, Value};

/// One entry of a wanted-list update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WantedEntry {
    /// Display label (`Author - Title` or the opaque server string).
    pub label: String,
    /// Server-side checked flag; always `false` for contracts without one.
    pub checked: bool,
}

/// How a wanted-list retrieval ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The payload carries the current list.
    Listing,
    /// Retrieval failed; code and message are shown verbatim.
    Failed {
        /// Server or HTTP status code as text.
        code: String,
        /// Server-supplied message.
        message: String,
    },
    /// Retrieval was stopped before it produced a list.
    Cancelled,
}

/// Wanted-list state pushed by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WantedUpdate {
    /// Whether the server is still retrieving.
    pub busy: bool,
    /// Full replacement list.
    pub items: Vec<WantedEntry>,
    /// Result classification.
    pub outcome: FetchOutcome,
}

/// Lifecycle label of the download job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobStatus {
    /// Job is processing items.
    Running,
    /// Job was stopped by the user.
    Stopped,
    /// Nothing queued.
    Idle,
    /// Every queued item was processed.
    Complete,
    /// Job aborted on an error.
    Failed,
    /// Label this client does not recognise, kept verbatim.
    Other(String),
}

impl JobStatus {
    /// Parse a status label, ignoring case.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "running" => Self::Running,
            "stopped" => Self::Stopped,
            "idle" => Self::Idle,
            "complete" | "completed" => Self::Complete,
            "failed" => Self::Failed,
            _ => Self::Other(label.to_string()),
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Running => "Running",
            Self::Stopped => "Stopped",
            Self::Idle => "Idle",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
            Self::Other(label) => label,
        }
    }
}

/// One row of the job progress table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressEntry {
    /// Item label.
    pub label: String,
    /// Per-item status text, rendered verbatim.
    pub status: String,
}

/// Job progress snapshot pushed by the server.
#[derive(Clone, Debug, PartialEq)]
pub struct JobProgress {
    /// Overall job status.
    pub status: JobStatus,
    /// Completion percentage as reported (not yet clamped).
    pub percent: f64,
    /// Full replacement table.
    pub rows: Vec<ProgressEntry>,
}

/// Free-form job status reply (`libgen_status`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    /// Status label as sent (`Success`, `Error`, ...).
    pub status: String,
    /// Optional detail text.
    pub detail: Option<String>,
}

impl StatusMessage {
    /// Whether the server reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }

    /// Single line rendered in the job panel.
    #[must_use]
    pub fn display(&self) -> String {
        match self.detail.as_deref() {
            Some(detail) if !detail.is_empty() => format!("{}: {detail}", self.status),
            _ => self.status.clone(),
        }
    }
}

/// Toast notification pushed by the server.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct ToastMessage {
    /// Toast header.
    pub title: String,
    /// Toast body.
    pub message: String,
}

/// Flat settings record as edited in the settings form.
///
/// Values are kept as display strings in the order of the contract's field
/// list; nothing is validated client-side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsRecord {
    /// `(wire key, value)` pairs.
    pub values: Vec<(String, String)>,
}

impl SettingsRecord {
    /// Build a record from a decoded JSON object, keeping only `keys`.
    ///
    /// Numbers are rendered with their JSON text, lists are joined with
    /// `", "`, and missing or null fields become empty strings.
    #[must_use]
    pub fn from_object(keys: &[&str], object: &Map<String, Value>) -> Self {
        let values = keys
            .iter()
            .map(|key| {
                let value = object.get(*key).map(display_value).unwrap_or_default();
                ((*key).to_string(), value)
            })
            .collect();
        Self { values }
    }

    /// Look up a value by wire key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    /// Render the record as the outbound JSON object.
    #[must_use]
    pub fn to_object(&self) -> Value {
        let map = self
            .values
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect::<Map<String, Value>>();
        Value::Object(map)
    }
}

pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn job_status_parses_both_casings() {
        assert_eq!(JobStatus::parse("running"), JobStatus::Running);
        assert_eq!(JobStatus::parse("Running"), JobStatus::Running);
        assert_eq!(JobStatus::parse("Complete"), JobStatus::Complete);
        assert_eq!(
            JobStatus::parse("Paused"),
            JobStatus::Other("Paused".to_string())
        );
        assert_eq!(JobStatus::parse("Paused").label(), "Paused");
    }

    #[test]
    fn settings_record_flattens_lists_and_numbers() {
        let object = json!({
            "readarr_address": "http://192.168.1.2:8787",
            "sleep_interval": 0,
            "sync_schedule": [2, 14],
            "minimum_match_ratio": 90.5,
            "ignored": true,
        });
        let Value::Object(object) = object else {
            panic!("fixture is an object");
        };
        let record = SettingsRecord::from_object(
            &[
                "readarr_address",
                "sleep_interval",
                "sync_schedule",
                "minimum_match_ratio",
                "search_type",
            ],
            &object,
        );
        assert_eq!(record.get("readarr_address"), Some("http://192.168.1.2:8787"));
        assert_eq!(record.get("sleep_interval"), Some("0"));
        assert_eq!(record.get("sync_schedule"), Some("2, 14"));
        assert_eq!(record.get("minimum_match_ratio"), Some("90.5"));
        assert_eq!(record.get("search_type"), Some(""));
        assert_eq!(record.get("ignored"), None);
    }

    #[test]
    fn settings_record_sends_raw_strings() {
        let record = SettingsRecord {
            values: vec![
                ("sleep_interval".to_string(), "abc".to_string()),
                ("sync_schedule".to_string(), "2, 14".to_string()),
            ],
        };
        assert_eq!(
            record.to_object(),
            json!({"sleep_interval": "abc", "sync_schedule": "2, 14"})
        );
    }

    #[test]
    fn status_message_display_includes_detail() {
        let message = StatusMessage {
            status: "Error".to_string(),
            detail: Some("Stopping".to_string()),
        };
        assert!(!message.is_success());
        assert_eq!(message.display(), "Error: Stopping");
        let bare = StatusMessage {
            status: "Success".to_string(),
            detail: None,
        };
        assert!(bare.is_success());
        assert_eq!(bare.display(), "Success");
    }
}
