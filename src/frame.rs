//! Frame records and their lifecycle phase.
//!
//! A frame is one reviewable unit of a batch. Its display attributes are fixed
//! at creation; its workflow state lives in a single [`Phase`] value so that
//! contradictory flag combinations cannot be represented.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a frame, unique within and across batches.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(String);

impl FrameId {
    /// Builds the identifier for the `index`-th (zero-based) frame of `batch`.
    pub fn for_batch(batch: u32, index: usize) -> Self {
        Self(format!("frame-{}-{}", batch, index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FrameId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-frame zoom/crop preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Min,
    #[default]
    Mid,
    Max,
}

impl Confidence {
    pub const ALL: [Confidence; 3] = [Confidence::Min, Confidence::Mid, Confidence::Max];

    pub fn label(self) -> &'static str {
        match self {
            Confidence::Min => "Min",
            Confidence::Mid => "Mid",
            Confidence::Max => "Max",
        }
    }
}

/// How confidently the pre-baked detection box covers a logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionQuality {
    Clear,
    Unclear,
}

/// Detection rectangle in percent of the frame image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub quality: DetectionQuality,
}

/// Selection sub-state of an unprocessed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    Plain,
    Selected,
    DoubleSelected,
}

/// Lifecycle phase of a frame.
///
/// `Confirmed` and `Rejected` are terminal for ordinary actions; only an
/// explicit restore leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Unprocessed(Selection),
    MarkedForRejection,
    Confirmed,
    Rejected,
}

impl Phase {
    pub const PLAIN: Phase = Phase::Unprocessed(Selection::Plain);
    pub const SELECTED: Phase = Phase::Unprocessed(Selection::Selected);
    pub const DOUBLE_SELECTED: Phase = Phase::Unprocessed(Selection::DoubleSelected);

    /// True for `Confirmed` and `Rejected`.
    pub fn is_processed(self) -> bool {
        matches!(self, Phase::Confirmed | Phase::Rejected)
    }
}

/// One reviewable frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: FrameId,
    pub image_url: String,
    pub detection_box: DetectionBox,
    pub clarity_level: u8,
    pub phase: Phase,
    pub confidence: Confidence,
    /// Labels committed at confirmation, insertion ordered, without duplicates.
    pub sponsor_annotations: Vec<String>,
    /// Label assigned to this frame alone; wins over the batch-wide label.
    pub individual_sponsor: Option<String>,
}

impl Frame {
    /// Creates a plain, unannotated frame.
    pub fn new(id: FrameId, image_url: impl Into<String>, detection_box: DetectionBox, clarity_level: u8) -> Self {
        Self {
            id,
            image_url: image_url.into(),
            detection_box,
            clarity_level: clarity_level.min(5),
            phase: Phase::PLAIN,
            confidence: Confidence::default(),
            sponsor_annotations: Vec::new(),
            individual_sponsor: None,
        }
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    // ===== Flag Views =====

    pub fn is_processed(&self) -> bool {
        self.phase.is_processed()
    }

    pub fn is_unprocessed(&self) -> bool {
        !self.is_processed()
    }

    pub fn is_selected(&self) -> bool {
        matches!(self.phase, Phase::Unprocessed(Selection::Selected | Selection::DoubleSelected))
    }

    pub fn is_double_selected(&self) -> bool {
        self.phase == Phase::DOUBLE_SELECTED
    }

    /// Selected but not double-selected.
    pub fn is_single_selected(&self) -> bool {
        self.phase == Phase::SELECTED
    }

    pub fn is_marked_for_rejection(&self) -> bool {
        self.phase == Phase::MarkedForRejection
    }

    pub fn is_confirmed(&self) -> bool {
        self.phase == Phase::Confirmed
    }

    pub fn is_rejected(&self) -> bool {
        self.phase == Phase::Rejected
    }

    /// Adds `label` to the annotations unless already present.
    pub(crate) fn annotate(&mut self, label: &str) {
        if !self.sponsor_annotations.iter().any(|existing| existing == label) {
            self.sponsor_annotations.push(label.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Frame {
        Frame::new(
            FrameId::for_batch(1, 0),
            "/images/frame_0.jpg",
            DetectionBox { x: 10.0, y: 15.0, width: 25.0, height: 12.0, quality: DetectionQuality::Clear },
            3,
        )
    }

    #[test]
    fn test_frame_id_format() {
        assert_eq!(FrameId::for_batch(3, 0).as_str(), "frame-3-1");
        assert_eq!(FrameId::for_batch(3, 19).to_string(), "frame-3-20");
    }

    #[test]
    fn test_flag_views_follow_phase() {
        let frame = sample().with_phase(Phase::DOUBLE_SELECTED);
        assert!(frame.is_selected());
        assert!(frame.is_double_selected());
        assert!(!frame.is_single_selected());
        assert!(!frame.is_processed());

        let frame = frame.with_phase(Phase::Rejected);
        assert!(!frame.is_selected());
        assert!(frame.is_rejected());
        assert!(frame.is_processed());
    }

    #[test]
    fn test_annotate_collapses_duplicates() {
        let mut frame = sample();
        frame.annotate("Nike");
        frame.annotate("Pepsi");
        frame.annotate("Nike");
        assert_eq!(frame.sponsor_annotations, vec!["Nike".to_string(), "Pepsi".to_string()]);
    }

    #[test]
    fn test_clarity_level_is_capped() {
        let frame = Frame::new(
            FrameId::from("x"),
            "",
            DetectionBox { x: 0.0, y: 0.0, width: 1.0, height: 1.0, quality: DetectionQuality::Unclear },
            9,
        );
        assert_eq!(frame.clarity_level, 5);
    }
}
