//! Reusable Bootstrap-styled components.

pub(crate) mod checkbox;
pub(crate) mod modal;
pub(crate) mod navbar;
pub(crate) mod progress;
pub(crate) mod toast;
