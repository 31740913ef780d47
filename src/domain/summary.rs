//! Batch counters and the end-of-batch validation summary.

use crate::frame::{Frame, Phase, Selection};

/// Per-phase frame counts for headers and affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameCounts {
    pub total: usize,
    /// Selected or double-selected.
    pub selected: usize,
    pub double_selected: usize,
    pub marked: usize,
    pub confirmed: usize,
    pub rejected: usize,
    pub unprocessed: usize,
    /// Unprocessed frames carrying their own label.
    pub individually_labeled: usize,
}

impl FrameCounts {
    pub fn of(frames: &[Frame]) -> Self {
        let mut counts = Self { total: frames.len(), ..Self::default() };
        for frame in frames {
            match frame.phase {
                Phase::Unprocessed(selection) => {
                    counts.unprocessed += 1;
                    match selection {
                        Selection::Plain => {}
                        Selection::Selected => counts.selected += 1,
                        Selection::DoubleSelected => {
                            counts.selected += 1;
                            counts.double_selected += 1;
                        }
                    }
                }
                Phase::MarkedForRejection => {
                    counts.unprocessed += 1;
                    counts.marked += 1;
                }
                Phase::Confirmed => counts.confirmed += 1,
                Phase::Rejected => counts.rejected += 1,
            }
            if frame.is_unprocessed() && frame.individual_sponsor.is_some() {
                counts.individually_labeled += 1;
            }
        }
        counts
    }

    pub fn processed(&self) -> usize {
        self.confirmed + self.rejected
    }

    /// True when every frame is processed and there is at least one.
    pub fn all_processed(&self) -> bool {
        self.total > 0 && self.unprocessed == 0
    }

    /// Something a confirm would act on.
    pub fn can_confirm(&self) -> bool {
        self.selected > 0 || self.marked > 0
    }

    pub fn can_reject(&self) -> bool {
        self.selected > 0
    }

    pub fn has_selectable_frames(&self) -> bool {
        self.unprocessed > 0
    }
}

/// Summary shown when a batch is finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationSummary {
    pub total_frames: usize,
    pub confirmed_frames: usize,
    pub rejected_frames: usize,
    /// Mean clarity of confirmed frames, 0.0 when none.
    pub average_clarity: f32,
}

impl ValidationSummary {
    pub fn of(frames: &[Frame]) -> Self {
        let confirmed: Vec<&Frame> = frames.iter().filter(|f| f.is_confirmed()).collect();
        let average_clarity = if confirmed.is_empty() {
            0.0
        } else {
            confirmed.iter().map(|f| f32::from(f.clarity_level)).sum::<f32>() / confirmed.len() as f32
        };
        Self {
            total_frames: frames.len(),
            confirmed_frames: confirmed.len(),
            rejected_frames: frames.iter().filter(|f| f.is_rejected()).count(),
            average_clarity,
        }
    }

    /// Confirmed share in whole percent.
    pub fn validation_rate(&self) -> u32 {
        percent(self.confirmed_frames, self.total_frames)
    }

    pub fn rejection_rate(&self) -> u32 {
        percent(self.rejected_frames, self.total_frames)
    }

    /// Confirmed frames sorted by clarity, best first.
    pub fn top_quality(frames: &[Frame], limit: usize) -> Vec<&Frame> {
        let mut confirmed: Vec<&Frame> = frames.iter().filter(|f| f.is_confirmed()).collect();
        confirmed.sort_by(|a, b| b.clarity_level.cmp(&a.clarity_level));
        confirmed.truncate(limit);
        confirmed
    }
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{DetectionBox, DetectionQuality, FrameId};

    fn frame(phase: Phase, clarity: u8) -> Frame {
        Frame::new(
            FrameId::from("f"),
            "",
            DetectionBox { x: 0.0, y: 0.0, width: 1.0, height: 1.0, quality: DetectionQuality::Clear },
            clarity,
        )
        .with_phase(phase)
    }

    #[test]
    fn test_counts() {
        let mut labeled = frame(Phase::SELECTED, 1);
        labeled.individual_sponsor = Some("nike".into());
        let frames = vec![
            frame(Phase::PLAIN, 1),
            labeled,
            frame(Phase::DOUBLE_SELECTED, 1),
            frame(Phase::MarkedForRejection, 1),
            frame(Phase::Confirmed, 1),
            frame(Phase::Rejected, 1),
        ];
        let counts = FrameCounts::of(&frames);
        assert_eq!(counts.total, 6);
        assert_eq!(counts.selected, 2);
        assert_eq!(counts.double_selected, 1);
        assert_eq!(counts.marked, 1);
        assert_eq!(counts.unprocessed, 4);
        assert_eq!(counts.processed(), 2);
        assert_eq!(counts.individually_labeled, 1);
        assert!(counts.can_confirm());
        assert!(!counts.all_processed());
    }

    #[test]
    fn test_empty_batch_is_not_all_processed() {
        assert!(!FrameCounts::of(&[]).all_processed());
        assert!(!FrameCounts::of(&[]).can_confirm());
    }

    #[test]
    fn test_validation_summary() {
        let frames = vec![
            frame(Phase::Confirmed, 5),
            frame(Phase::Confirmed, 2),
            frame(Phase::Rejected, 1),
            frame(Phase::Rejected, 4),
        ];
        let summary = ValidationSummary::of(&frames);
        assert_eq!(summary.confirmed_frames, 2);
        assert_eq!(summary.rejected_frames, 2);
        assert!((summary.average_clarity - 3.5).abs() < f32::EPSILON);
        assert_eq!(summary.validation_rate(), 50);
        let top = ValidationSummary::top_quality(&frames, 1);
        assert_eq!(top[0].clarity_level, 5);
    }
}
