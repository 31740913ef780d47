//! Settings persistence.
//!
//! Page settings survive restarts through eframe's storage as JSON strings.
//! Stored values that fail to parse or validate are replaced with defaults.

use crate::settings::PageSettings;
use serde::{Deserialize, Serialize};

/// Storage key for the page settings.
pub const PAGE_SETTINGS_KEY: &str = "page_settings";

/// Coordinates settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads the page settings, falling back to defaults.
    ///
    /// # Arguments
    /// * `storage` - The eframe storage interface, if persistence is enabled
    pub fn load_page_settings(storage: Option<&dyn eframe::Storage>) -> PageSettings {
        match Self::try_load_setting::<PageSettings>(storage, PAGE_SETTINGS_KEY) {
            Some(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(err) => {
                    tracing::warn!(%err, "stored page settings rejected, using defaults");
                    PageSettings::default()
                }
            },
            None => PageSettings::default(),
        }
    }

    pub fn save_page_settings(storage: &mut dyn eframe::Storage, settings: &PageSettings) {
        Self::save_setting(storage, PAGE_SETTINGS_KEY, settings);
    }

    /// Serializes `value` under `key` and flushes.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json) => {
                storage.set_string(key, json);
                storage.flush();
            }
            Err(err) => tracing::warn!(key, %err, "failed to serialize setting"),
        }
    }

    /// Attempts to load a setting.
    ///
    /// # Returns
    /// Some(value) if found and valid JSON, None otherwise
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let json = storage?.get_string(key)?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(key, %err, "ignoring unreadable setting");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Confidence;
    use eframe::Storage;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self { data: HashMap::new() }
        }
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_page_settings_round_trip() {
        let mut storage = MockStorage::new();
        let settings = PageSettings { frames_per_row: 15, default_zoom: Confidence::Max };
        SettingsCoordinator::save_page_settings(&mut storage, &settings);

        let loaded = SettingsCoordinator::load_page_settings(Some(&storage));
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_storage_gives_defaults() {
        assert_eq!(SettingsCoordinator::load_page_settings(None), PageSettings::default());
        let storage = MockStorage::new();
        assert_eq!(SettingsCoordinator::load_page_settings(Some(&storage)), PageSettings::default());
    }

    #[test]
    fn test_invalid_stored_settings_are_rejected() {
        let mut storage = MockStorage::new();
        storage.set_string(PAGE_SETTINGS_KEY, r#"{"frames_per_row":6,"default_zoom":"max"}"#.to_string());
        assert_eq!(SettingsCoordinator::load_page_settings(Some(&storage)), PageSettings::default());

        storage.set_string(PAGE_SETTINGS_KEY, "not json".to_string());
        assert_eq!(SettingsCoordinator::load_page_settings(Some(&storage)), PageSettings::default());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let mut storage = MockStorage::new();
        storage.set_string(PAGE_SETTINGS_KEY, r#"{"frames_per_row":7}"#.to_string());
        let loaded = SettingsCoordinator::load_page_settings(Some(&storage));
        assert_eq!(loaded.frames_per_row, 7);
        assert_eq!(loaded.default_zoom, Confidence::Mid);
    }

    #[test]
    fn test_try_load_setting() {
        let mut storage = MockStorage::new();
        let result: Option<u32> = SettingsCoordinator::try_load_setting(Some(&storage), "missing");
        assert_eq!(result, None);

        SettingsCoordinator::save_setting(&mut storage, "queue", &123u32);
        let result: Option<u32> = SettingsCoordinator::try_load_setting(Some(&storage), "queue");
        assert_eq!(result, Some(123));
    }
}
