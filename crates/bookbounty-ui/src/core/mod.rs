//! Core, DOM-free primitives and helpers for the Web UI.
pub mod config;
pub mod connection;
pub mod listeners;
pub mod preferences;
pub mod store;
pub mod theme;
pub mod ui;
