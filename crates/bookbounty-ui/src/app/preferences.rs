//! Persistence and environment helpers for the app shell.

use crate::core::config::ClientConfig;
use crate::core::preferences::{CONTRACT_KEY, PreferenceStore};
use crate::core::theme::ThemeMode;
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::{document, window};
use js_sys::Date;
use wasm_bindgen::JsValue;

/// `localStorage` holding raw, unquoted strings.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserStore;

impl PreferenceStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log_storage_error("get", key, &err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::raw().set_item(key, value) {
            log_storage_error("set", key, &err);
        }
    }
}

/// Resolve the client configuration from the page location.
pub(crate) fn load_config() -> ClientConfig {
    let location = window().location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location.host().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    let stored = BrowserStore.get(CONTRACT_KEY);
    ClientConfig::resolve(&protocol, &host, &search, stored.as_deref())
}

/// Set `data-bs-theme` on the root element.
pub(crate) fn apply_theme(mode: ThemeMode) {
    if let Some(root) = document().document_element() {
        if let Err(err) = root.set_attribute("data-bs-theme", mode.as_str()) {
            console::error!("theme attribute update failed", err);
        }
    }
}

/// Current time in the browser's locale.
pub(crate) fn now_timestamp() -> String {
    Date::new_0()
        .to_locale_string("default", &JsValue::UNDEFINED)
        .into()
}

fn log_storage_error(operation: &'static str, key: &str, err: &JsValue) {
    console::error!("storage operation failed", operation, key.to_string(), err.clone());
}
