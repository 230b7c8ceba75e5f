//! Wanted-list panel.
//!
//! # Design
//! - The list is rebuilt from every server update; only checkbox state is
//!   edited locally.
//! - Select-all follows the contract's [`state::SelectAllPolicy`].

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
