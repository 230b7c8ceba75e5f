//! Download job state: progress bar, table rows and status line.

use bookbounty_events::{JobProgress, JobStatus, ProgressEntry, StatusMessage};

/// Mutually exclusive colour of the progress bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BarTone {
    /// Idle, and the initial tone.
    #[default]
    Primary,
    /// Running.
    Success,
    /// Stopped.
    Warning,
    /// Complete.
    Dark,
    /// Failed.
    Danger,
}

impl BarTone {
    /// Bootstrap background class.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Primary => "bg-primary",
            Self::Success => "bg-success",
            Self::Warning => "bg-warning",
            Self::Dark => "bg-dark",
            Self::Danger => "bg-danger",
        }
    }

    /// Tone for a known status; `None` for labels this client does not know.
    #[must_use]
    pub const fn for_status(status: &JobStatus) -> Option<Self> {
        match status {
            JobStatus::Running => Some(Self::Success),
            JobStatus::Stopped => Some(Self::Warning),
            JobStatus::Idle => Some(Self::Primary),
            JobStatus::Complete => Some(Self::Dark),
            JobStatus::Failed => Some(Self::Danger),
            JobStatus::Other(_) => None,
        }
    }
}

/// Rendered progress bar.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressBar {
    /// Width in percent, clamped to 0-100.
    pub percent: f64,
    /// Colour class.
    pub tone: BarTone,
    /// Striped animation, on only while running.
    pub animated: bool,
}

impl ProgressBar {
    /// Apply a status and completion percentage.
    ///
    /// Unknown statuses move the width but keep the current colour and
    /// animation.
    pub fn apply(&mut self, status: &JobStatus, percent: f64) {
        self.percent = clamp_percent(percent);
        if let Some(tone) = BarTone::for_status(status) {
            self.tone = tone;
            self.animated = matches!(status, JobStatus::Running);
        }
    }

    /// Full class list for the bar element.
    #[must_use]
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["progress-bar", "progress-bar-striped", self.tone.class()];
        if self.animated {
            classes.push("progress-bar-animated");
        }
        classes
    }

    /// Inline `width` style.
    #[must_use]
    pub fn width_style(&self) -> String {
        format!("width: {}%", self.percent)
    }

    /// `aria-valuenow` attribute value.
    #[must_use]
    pub fn aria_value(&self) -> String {
        self.percent.to_string()
    }
}

/// Clamp a reported percentage; non-finite values become 0.
#[must_use]
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Job panel state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobState {
    /// Progress table rows.
    pub rows: Vec<ProgressEntry>,
    /// Last reported status, `None` before the first update.
    pub status: Option<JobStatus>,
    /// Progress bar.
    pub bar: ProgressBar,
    /// Status line from free-form job messages.
    pub message: Option<String>,
    /// Submit button disabled while a selection is being queued.
    pub submitting: bool,
}

/// Replace the table and move the bar.
pub fn apply_progress(state: &mut JobState, progress: JobProgress) {
    state.bar.apply(&progress.status, progress.percent);
    state.rows = progress.rows;
    state.status = Some(progress.status);
}

/// Reset requested: clear the table right away.
pub fn reset_job(state: &mut JobState) {
    state.rows.clear();
    state.message = None;
}

/// Show a free-form job message.
pub fn apply_message(state: &mut JobState, message: &StatusMessage) {
    state.message = Some(message.display());
}

/// Selection is being queued.
pub const fn begin_submit(state: &mut JobState) {
    state.submitting = true;
}

/// Selection queued.
pub const fn end_submit(state: &mut JobState) {
    state.submitting = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(status: &str, percent: f64, rows: &[(&str, &str)]) -> JobProgress {
        JobProgress {
            status: JobStatus::parse(status),
            percent,
            rows: rows
                .iter()
                .map(|(label, status)| ProgressEntry {
                    label: (*label).to_string(),
                    status: (*status).to_string(),
                })
                .collect(),
        }
    }

    fn tone_classes(bar: &ProgressBar) -> Vec<&'static str> {
        bar.classes()
            .into_iter()
            .filter(|class| class.starts_with("bg-"))
            .collect()
    }

    #[test]
    fn initial_bar_is_empty_primary() {
        let state = JobState::default();
        assert_eq!(state.bar.aria_value(), "0");
        assert_eq!(state.bar.width_style(), "width: 0%");
        assert_eq!(tone_classes(&state.bar), vec!["bg-primary"]);
    }

    #[test]
    fn running_has_exactly_success_and_animation() {
        let mut state = JobState::default();
        apply_progress(&mut state, progress("stopped", 10.0, &[]));
        apply_progress(&mut state, progress("running", 40.0, &[]));
        let classes = state.bar.classes();
        assert_eq!(tone_classes(&state.bar), vec!["bg-success"]);
        assert!(classes.contains(&"progress-bar-animated"));
        assert!(classes.contains(&"progress-bar-striped"));
        assert_eq!(state.bar.aria_value(), "40");
    }

    #[test]
    fn statuses_map_to_single_tone() {
        let cases = [
            ("stopped", "bg-warning"),
            ("idle", "bg-primary"),
            ("Complete", "bg-dark"),
            ("failed", "bg-danger"),
        ];
        for (status, class) in cases {
            let mut state = JobState::default();
            apply_progress(&mut state, progress("running", 0.0, &[]));
            apply_progress(&mut state, progress(status, 50.0, &[]));
            assert_eq!(tone_classes(&state.bar), vec![class], "{status}");
            assert!(!state.bar.classes().contains(&"progress-bar-animated"));
        }
    }

    #[test]
    fn unknown_status_keeps_tone() {
        let mut state = JobState::default();
        apply_progress(&mut state, progress("running", 20.0, &[]));
        apply_progress(&mut state, progress("paused", 30.0, &[]));
        assert_eq!(tone_classes(&state.bar), vec!["bg-success"]);
        assert_eq!(state.status.as_ref().map(JobStatus::label), Some("paused"));
        assert_eq!(state.bar.aria_value(), "30");
    }

    #[test]
    fn percent_is_clamped() {
        assert!((clamp_percent(140.0) - 100.0).abs() < f64::EPSILON);
        assert!(clamp_percent(-3.0).abs() < f64::EPSILON);
        assert!(clamp_percent(f64::NAN).abs() < f64::EPSILON);
    }

    #[test]
    fn rows_are_replaced_and_reset_clears() {
        let mut state = JobState::default();
        apply_progress(&mut state, progress("running", 5.0, &[("A - One", "Queued")]));
        apply_progress(
            &mut state,
            progress("running", 50.0, &[("A - One", "Done"), ("B - Two", "Searching")]),
        );
        assert_eq!(state.rows.len(), 2);
        assert_eq!(state.rows[0].status, "Done");
        reset_job(&mut state);
        assert!(state.rows.is_empty());
    }

    #[test]
    fn messages_and_submit_flag() {
        let mut state = JobState::default();
        apply_message(
            &mut state,
            &StatusMessage {
                status: "Error".to_string(),
                detail: Some("Stopping".to_string()),
            },
        );
        assert_eq!(state.message.as_deref(), Some("Error: Stopping"));
        begin_submit(&mut state);
        assert!(state.submitting);
        end_submit(&mut state);
        assert!(!state.submitting);
    }
}
