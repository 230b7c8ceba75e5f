//! Dashboard feature slices: state and reducers, plus wasm-only views.
pub mod job;
pub mod settings;
pub mod toasts;
pub mod wanted;
