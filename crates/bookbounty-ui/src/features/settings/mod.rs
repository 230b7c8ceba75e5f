//! Settings modal.
//!
//! # Design
//! - Keep form inputs as strings; the server owns parsing.
//! - Field list comes from the contract version, not from the reply.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
