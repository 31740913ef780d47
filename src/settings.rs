//! Page settings and review configuration.

use crate::catalog::SelectedPlacement;
use crate::frame::Confidence;
use crate::generator::BATCH_SIZE;
use serde::{Deserialize, Serialize};

/// Column counts the grid supports.
pub const FRAMES_PER_ROW_OPTIONS: [usize; 4] = [5, 7, 10, 15];

/// Initial number of batches waiting in the review queue.
pub const DEFAULT_QUEUE: u32 = 199;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("unsupported frames per row: {0} (expected one of 5, 7, 10, 15)")]
    UnsupportedColumns(usize),

    #[error("batch size must be at least 1")]
    EmptyBatch,
}

/// User-adjustable layout and zoom settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub frames_per_row: usize,
    pub default_zoom: Confidence,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self { frames_per_row: 5, default_zoom: Confidence::Mid }
    }
}

impl PageSettings {
    /// Builds validated settings.
    pub fn new(frames_per_row: usize, default_zoom: Confidence) -> Result<Self, SettingsError> {
        let settings = Self { frames_per_row, default_zoom };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !FRAMES_PER_ROW_OPTIONS.contains(&self.frames_per_row) {
            return Err(SettingsError::UnsupportedColumns(self.frames_per_row));
        }
        Ok(())
    }

    /// Returns these settings if valid, the defaults otherwise.
    pub fn sanitized(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(_) => Self::default(),
        }
    }
}

/// Which label family feeds the quick-label bar and the batch label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelMode {
    /// Recently used sponsors, seeded with the auto-populated list.
    Sponsor,
    /// Placement types of one rightsholder placement.
    Placement(SelectedPlacement),
}

impl Default for LabelMode {
    fn default() -> Self {
        LabelMode::Placement(SelectedPlacement::default())
    }
}

/// Session-level configuration fixed at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewConfig {
    pub initial_queue: u32,
    pub batch_size: usize,
    pub mode: LabelMode,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            initial_queue: DEFAULT_QUEUE,
            batch_size: BATCH_SIZE,
            mode: LabelMode::default(),
        }
    }
}

impl ReviewConfig {
    pub fn sponsor_mode() -> Self {
        Self { mode: LabelMode::Sponsor, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.batch_size == 0 {
            return Err(SettingsError::EmptyBatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_settings_validation() {
        assert!(PageSettings::new(7, Confidence::Max).is_ok());
        assert_eq!(PageSettings::new(6, Confidence::Max), Err(SettingsError::UnsupportedColumns(6)));
    }

    #[test]
    fn test_sanitized_falls_back_to_defaults() {
        let bad = PageSettings { frames_per_row: 3, default_zoom: Confidence::Min };
        assert_eq!(bad.sanitized(), PageSettings::default());
        let good = PageSettings { frames_per_row: 15, default_zoom: Confidence::Min };
        assert_eq!(good.sanitized(), good);
    }

    #[test]
    fn test_page_settings_json_round_trip() {
        let settings = PageSettings { frames_per_row: 10, default_zoom: Confidence::Max };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: PageSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: PageSettings = serde_json::from_str(r#"{"frames_per_row":7}"#).unwrap();
        assert_eq!(parsed, PageSettings { frames_per_row: 7, default_zoom: Confidence::Mid });
    }

    #[test]
    fn test_review_config_defaults() {
        let config = ReviewConfig::default();
        assert_eq!(config.initial_queue, 199);
        assert_eq!(config.batch_size, 20);
        assert!(matches!(config.mode, LabelMode::Placement(_)));
        assert_eq!(ReviewConfig { batch_size: 0, ..config }.validate(), Err(SettingsError::EmptyBatch));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SettingsError::UnsupportedColumns(4).to_string(),
            "unsupported frames per row: 4 (expected one of 5, 7, 10, 15)"
        );
    }
}
