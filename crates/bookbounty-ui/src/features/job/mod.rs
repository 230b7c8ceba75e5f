//! Download job panel: progress bar, per-item table and status line.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
