//! Caching for derived row data.

use crate::domain::rows;
use crate::domain::summary::FrameCounts;
use crate::frame::Frame;

/// Cache for per-render row computations.
///
/// Entries are keyed on the frame store version and the column count. A
/// lookup with a different key recomputes; [`RowCache::invalidate`] forces
/// the next lookup to recompute regardless.
#[derive(Debug, Clone, Default)]
pub struct RowCache {
    key: Option<(u64, usize)>,

    /// Completion flag per row index.
    completion: Vec<bool>,

    /// Frame counts for the whole batch.
    counts: FrameCounts,

    /// Incremented on every recompute or invalidation.
    seq: u64,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops cached data.
    ///
    /// Called when the column count changes or a new batch is loaded.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.completion.clear();
        self.counts = FrameCounts::default();
        self.seq += 1;
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Returns true if the cache holds data for this version and column count.
    pub fn is_valid_for(&self, version: u64, columns: usize) -> bool {
        self.key == Some((version, columns))
    }

    fn refresh(&mut self, frames: &[Frame], version: u64, columns: usize) {
        if self.is_valid_for(version, columns) {
            return;
        }
        self.completion = rows::completion_map(frames, columns);
        self.counts = FrameCounts::of(frames);
        self.key = Some((version, columns));
        self.seq += 1;
    }

    /// Completion flags for every row.
    ///
    /// # Arguments
    /// * `frames` - Current frames
    /// * `version` - Store version `frames` belongs to
    /// * `columns` - Frames per row
    pub fn completion(&mut self, frames: &[Frame], version: u64, columns: usize) -> &[bool] {
        self.refresh(frames, version, columns);
        &self.completion
    }

    pub fn counts(&mut self, frames: &[Frame], version: u64, columns: usize) -> FrameCounts {
        self.refresh(frames, version, columns);
        self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Confidence, Phase};
    use crate::generator::generate_frames;

    #[test]
    fn test_recomputes_only_on_key_change() {
        let mut frames = generate_frames(1, Confidence::Mid);
        let mut cache = RowCache::new();

        assert_eq!(cache.completion(&frames, 0, 5), &[false; 4]);
        let seq = cache.seq();

        // Same key: stale data is served, nothing recomputed.
        for frame in frames.iter_mut().take(5) {
            frame.phase = Phase::Rejected;
        }
        assert_eq!(cache.completion(&frames, 0, 5), &[false; 4]);
        assert_eq!(cache.seq(), seq);

        assert_eq!(cache.completion(&frames, 1, 5), &[true, false, false, false]);
        assert_eq!(cache.counts(&frames, 1, 5).rejected, 5);
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let frames = generate_frames(1, Confidence::Mid);
        let mut cache = RowCache::new();
        cache.completion(&frames, 3, 5);
        assert!(cache.is_valid_for(3, 5));
        cache.invalidate();
        assert!(!cache.is_valid_for(3, 5));
        assert_eq!(cache.completion(&frames, 3, 10).len(), 2);
    }
}
