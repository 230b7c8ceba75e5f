//! Preference persistence seam.
//!
//! Values are raw strings so the keys stay readable by the server-rendered
//! page (`theme` holds `light`/`dark`, `switchPosition` holds `true`/`false`).

use std::collections::HashMap;

/// Local-storage key for the theme attribute value.
pub const THEME_KEY: &str = "theme";

/// Local-storage key for the theme switch position.
pub const SWITCH_POSITION_KEY: &str = "switchPosition";

/// Local-storage key for the remembered contract version.
pub const CONTRACT_KEY: &str = "bookbounty.contract";

/// String key/value store backing user preferences.
pub trait PreferenceStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value.
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for native tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Store pre-seeded with `pairs`.
    #[must_use]
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        Self {
            values: pairs
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect(),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}
