//! Toast queue.

use bookbounty_events::ToastMessage;

/// Visibility phase of a toast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastPhase {
    /// Fully visible.
    #[default]
    Shown,
    /// Fade-out transition running; removed when it ends.
    Hiding,
}

/// One toast notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Queue-unique identifier.
    pub id: u64,
    /// Header text.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Locale timestamp captured on arrival.
    pub timestamp: String,
    /// Visibility phase.
    pub phase: ToastPhase,
}

/// Toasts currently in the container, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    next_id: u64,
    /// Active toasts.
    pub items: Vec<Toast>,
}

/// Append a toast and return its id.
pub fn push(state: &mut ToastState, message: ToastMessage, timestamp: String) -> u64 {
    let id = state.next_id;
    state.next_id = state.next_id.wrapping_add(1);
    state.items.push(Toast {
        id,
        title: message.title,
        message: message.message,
        timestamp,
        phase: ToastPhase::Shown,
    });
    id
}

/// Start the hide transition. Returns `false` if the toast is already gone
/// or already hiding.
pub fn begin_hide(state: &mut ToastState, id: u64) -> bool {
    match state.items.iter_mut().find(|toast| toast.id == id) {
        Some(toast) if toast.phase == ToastPhase::Shown => {
            toast.phase = ToastPhase::Hiding;
            true
        }
        _ => false,
    }
}

/// Drop a toast from the container.
pub fn remove(state: &mut ToastState, id: u64) {
    state.items.retain(|toast| toast.id != id);
}
