//! Light/dark theme preference.

use crate::core::preferences::{PreferenceStore, SWITCH_POSITION_KEY, THEME_KEY};

/// Value of the root `data-bs-theme` attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    /// Light theme mode.
    #[default]
    Light,
    /// Dark theme mode.
    Dark,
}

impl ThemeMode {
    /// String identifier used in the root attribute and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Theme attribute plus the navbar switch position.
///
/// The two are stored separately and restored independently, so a switch
/// position may disagree with the mode if storage was edited by hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemePreference {
    /// Active theme.
    pub mode: ThemeMode,
    /// Checked state of the theme switch.
    pub switch_on: bool,
}

impl ThemePreference {
    /// Restore whichever of the two values are present in `store`.
    #[must_use]
    pub fn load(store: &impl PreferenceStore) -> Self {
        let mut preference = Self::default();
        if let Some(position) = store.get(SWITCH_POSITION_KEY) {
            preference.switch_on = position == "true";
        }
        if let Some(mode) = store.get(THEME_KEY).as_deref().and_then(ThemeMode::parse) {
            preference.mode = mode;
        }
        preference
    }

    /// Flip the theme and the switch, then persist both.
    pub fn toggle(&mut self, store: &mut impl PreferenceStore) {
        self.mode = self.mode.toggled();
        self.switch_on = !self.switch_on;
        self.persist(store);
    }

    /// Write both values to `store`.
    pub fn persist(self, store: &mut impl PreferenceStore) {
        store.set(THEME_KEY, self.mode.as_str());
        store.set(SWITCH_POSITION_KEY, if self.switch_on { "true" } else { "false" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::preferences::MemoryStore;

    #[test]
    fn theme_mode_to_str() {
        assert_eq!(ThemeMode::Light.as_str(), "light");
        assert_eq!(ThemeMode::Dark.as_str(), "dark");
        assert_eq!(ThemeMode::parse("sepia"), None);
    }

    #[test]
    fn load_restores_both_values() {
        let store = MemoryStore::with(&[(THEME_KEY, "dark"), (SWITCH_POSITION_KEY, "true")]);
        let preference = ThemePreference::load(&store);
        assert_eq!(preference.mode, ThemeMode::Dark);
        assert!(preference.switch_on);
    }

    #[test]
    fn load_defaults_when_storage_is_empty() {
        let preference = ThemePreference::load(&MemoryStore::default());
        assert_eq!(preference, ThemePreference::default());
    }

    #[test]
    fn toggle_mirrors_into_storage() {
        let mut store = MemoryStore::default();
        let mut preference = ThemePreference::load(&store);
        preference.toggle(&mut store);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(store.get(SWITCH_POSITION_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn toggling_twice_restores_storage_and_attribute() {
        let original = MemoryStore::with(&[(THEME_KEY, "dark"), (SWITCH_POSITION_KEY, "true")]);
        let mut store = original.clone();
        let mut preference = ThemePreference::load(&store);
        let attribute = preference.mode.as_str();

        preference.toggle(&mut store);
        assert_ne!(store, original);
        preference.toggle(&mut store);

        assert_eq!(store, original);
        assert_eq!(preference.mode.as_str(), attribute);
    }
}
