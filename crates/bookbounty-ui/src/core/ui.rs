//! Fixed UI timings.

/// How long the "settings saved" confirmation stays visible.
pub const SAVE_NOTICE_MS: u32 = 1_000;

/// How long a toast stays visible before it starts hiding.
pub const TOAST_AUTOHIDE_MS: u32 = 5_000;

/// Length of the toast fade-out transition; the toast is removed after it.
pub const TOAST_FADE_MS: u32 = 150;
