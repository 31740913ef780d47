//! Centralized review session state.
//!
//! `ReviewState` composes focused state components that each manage one
//! aspect of the session:
//! - Frame store (the frames of the current batch)
//! - Drag engine, view flags and label choices
//! - Lifecycle controller (row animations, batch progress, timers)
//! - Page settings and the derived-row cache
//!
//! All mutation goes through `ReviewCoordinator`; the presentation layer
//! reads from here.

use crate::app::lifecycle::{BatchProgress, LifecycleController};
use crate::cache::RowCache;
use crate::domain::rows::{self, OrganizedRow};
use crate::domain::summary::{FrameCounts, ValidationSummary};
use crate::frame::Frame;
use crate::generator::BatchGenerator;
use crate::settings::{PageSettings, ReviewConfig};
use crate::state::{DragEngine, FrameStore, LabelState, ViewState};
use std::collections::VecDeque;

/// Maximum queued notices; older ones are dropped first.
const NOTICE_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Short user-facing message about the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub detail: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, title: title.into(), detail: detail.into() }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, title: title.into(), detail: detail.into() }
    }
}

/// Review session state composed of focused components.
#[derive(Debug)]
pub struct ReviewState {
    // ===== Focused State Components =====
    /// Frames of the current batch
    pub store: FrameStore,

    /// Rubber-band drag in progress
    pub drag: DragEngine,

    /// Focus, dropdown, modals, active tab
    pub view: ViewState,

    /// Quick labels and batch-wide label
    pub labels: LabelState,

    /// Row animations, batch progress and timers
    pub lifecycle: LifecycleController,

    // ===== Top-Level State =====
    settings: PageSettings,
    generator: BatchGenerator,
    row_cache: RowCache,
    notices: VecDeque<Notice>,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self::new(ReviewConfig::default(), PageSettings::default())
    }
}

impl ReviewState {
    /// Creates a session on batch 1.
    ///
    /// Invalid settings fall back to defaults.
    pub fn new(config: ReviewConfig, settings: PageSettings) -> Self {
        let settings = settings.sanitized();
        let generator = BatchGenerator::with_config(config.batch_size.max(1), 42);
        let frames = generator.generate(1, settings.default_zoom);
        Self::with_frames(config, settings, frames)
    }

    /// Creates a session on batch 1 with explicit frames.
    pub fn with_frames(config: ReviewConfig, settings: PageSettings, frames: Vec<Frame>) -> Self {
        let generator = BatchGenerator::with_config(config.batch_size.max(1), 42);
        Self {
            store: FrameStore::new(frames),
            drag: DragEngine::new(),
            view: ViewState::new(),
            labels: LabelState::new(config.mode),
            lifecycle: LifecycleController::new(config.initial_queue),
            settings: settings.sanitized(),
            generator,
            row_cache: RowCache::new(),
            notices: VecDeque::new(),
        }
    }

    // ===== Queries =====

    pub fn frames(&self) -> &[Frame] {
        self.store.frames()
    }

    pub fn settings(&self) -> PageSettings {
        self.settings
    }

    pub fn columns(&self) -> usize {
        self.settings.frames_per_row
    }

    pub fn progress(&self) -> BatchProgress {
        self.lifecycle.progress()
    }

    pub fn generator(&self) -> &BatchGenerator {
        &self.generator
    }

    /// Frame counts for the current store version.
    pub fn counts(&mut self) -> FrameCounts {
        let version = self.store.version();
        let columns = self.settings.frames_per_row;
        self.row_cache.counts(self.store.frames(), version, columns)
    }

    /// Completion flag per row for the current store version.
    pub fn row_completion(&mut self) -> Vec<bool> {
        let version = self.store.version();
        let columns = self.settings.frames_per_row;
        self.row_cache.completion(self.store.frames(), version, columns).to_vec()
    }

    /// Rows in display order with their animation phase.
    pub fn organized_rows(&self) -> Vec<OrganizedRow<'_>> {
        rows::organize_rows(self.store.frames(), self.columns(), &self.lifecycle.row_phases())
    }

    pub fn validation_summary(&self) -> ValidationSummary {
        ValidationSummary::of(self.store.frames())
    }

    // ===== Notices =====

    pub fn notify(&mut self, notice: Notice) {
        if self.notices.len() == NOTICE_LIMIT {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    pub fn latest_notice(&self) -> Option<&Notice> {
        self.notices.back()
    }

    /// Takes all queued notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    // ===== Crate-internal Mutators =====

    pub(crate) fn set_settings(&mut self, settings: PageSettings) {
        self.settings = settings;
    }

    pub(crate) fn invalidate_rows(&mut self) {
        self.row_cache.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_on_batch_one() {
        let mut state = ReviewState::default();
        assert_eq!(state.frames().len(), 20);
        assert_eq!(state.progress().current_batch, 1);
        assert_eq!(state.progress().queue_remaining, 199);
        assert_eq!(state.counts().selected, 20);
        assert_eq!(state.row_completion(), vec![false; 4]);
    }

    #[test]
    fn test_invalid_settings_fall_back() {
        let state = ReviewState::new(
            ReviewConfig::default(),
            PageSettings { frames_per_row: 4, default_zoom: crate::frame::Confidence::Max },
        );
        assert_eq!(state.columns(), 5);
    }

    #[test]
    fn test_notice_queue_is_bounded() {
        let mut state = ReviewState::default();
        for i in 0..10 {
            state.notify(Notice::success(format!("n{}", i), ""));
        }
        let drained = state.drain_notices();
        assert_eq!(drained.len(), NOTICE_LIMIT);
        assert_eq!(drained[0].title, "n2");
        assert!(state.latest_notice().is_none());
    }
}
