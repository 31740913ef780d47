//! Single-frame selection state machine.
//!
//! Every workflow action on a frame goes through [`try_transition`], a pure
//! function from the current frame and an action to the next frame. Actions
//! that do not apply to the frame's phase return `None`; callers treat that
//! as a no-op. Bulk operations apply the same function to every frame of a
//! target set.

use crate::frame::{Frame, Phase, Selection};

/// An action against a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction<'a> {
    /// Click on an unprocessed frame.
    Toggle,
    /// Explicit reject button or shortcut.
    RejectNow,
    /// Stage a double-selected frame for rejection at the next confirm.
    MarkForRejection,
    /// Commit the frame using its own label or the batch-wide label.
    Confirm { batch_label: Option<&'a str> },
    /// Back out of double selection.
    Escape,
    /// Give a double-selected frame its own label.
    AssignLabel(&'a str),
    /// Bring a rejected frame back to review.
    Restore,
    /// Bring any frame back to review (row restore-all).
    Reopen,
    /// Select-all: every unprocessed frame becomes plainly selected.
    SelectAll,
    /// Deselect-all: selected frames are promoted to double-selected.
    ///
    /// This mirrors the shipped behaviour where "deselect" reuses the double
    /// selection as the marker for the opposite batch operation.
    DeselectAll,
    /// Drag-deselect: drop selection and rejection mark.
    ClearSelection,
    /// Keyboard step onto a frame, leaving it ready for a label key.
    FocusSelect,
}

/// Applies `action` to `frame`, returning the updated frame or `None` when
/// the action does not apply.
pub fn try_transition(frame: &Frame, action: &FrameAction<'_>) -> Option<Frame> {
    let next_phase = match (*action, frame.phase) {
        (FrameAction::Restore, Phase::Rejected) => {
            let mut next = frame.clone();
            next.phase = Phase::SELECTED;
            next.sponsor_annotations.clear();
            return Some(next);
        }
        (FrameAction::Reopen, _) => {
            let mut next = frame.clone();
            next.phase = Phase::SELECTED;
            next.sponsor_annotations.clear();
            return Some(next);
        }
        (_, Phase::Confirmed | Phase::Rejected) => return None,

        (FrameAction::Toggle, Phase::Unprocessed(selection)) => match selection {
            Selection::Plain => Phase::SELECTED,
            Selection::Selected => Phase::DOUBLE_SELECTED,
            Selection::DoubleSelected => Phase::SELECTED,
        },
        (FrameAction::Toggle, Phase::MarkedForRejection) => Phase::SELECTED,

        (FrameAction::RejectNow, _) => {
            let mut next = frame.clone();
            next.phase = Phase::Rejected;
            next.individual_sponsor = None;
            next.sponsor_annotations.clear();
            return Some(next);
        }

        (FrameAction::MarkForRejection, Phase::Unprocessed(Selection::DoubleSelected)) => {
            let mut next = frame.clone();
            next.phase = Phase::MarkedForRejection;
            next.individual_sponsor = None;
            return Some(next);
        }

        (FrameAction::Confirm { batch_label }, Phase::Unprocessed(Selection::Selected | Selection::DoubleSelected)) => {
            let label = frame.individual_sponsor.as_deref().or(batch_label)?;
            let mut next = frame.clone();
            next.annotate(label);
            next.phase = Phase::Confirmed;
            next.individual_sponsor = None;
            return Some(next);
        }
        (FrameAction::Confirm { .. }, Phase::MarkedForRejection) => {
            let mut next = frame.clone();
            next.phase = Phase::Rejected;
            next.individual_sponsor = None;
            next.sponsor_annotations.clear();
            return Some(next);
        }

        (FrameAction::Escape, Phase::Unprocessed(Selection::DoubleSelected)) => Phase::SELECTED,

        (FrameAction::AssignLabel(label), Phase::Unprocessed(Selection::DoubleSelected)) => {
            let mut next = frame.clone();
            next.phase = Phase::SELECTED;
            next.individual_sponsor = Some(label.to_string());
            return Some(next);
        }

        (FrameAction::SelectAll, Phase::Unprocessed(_) | Phase::MarkedForRejection) => Phase::SELECTED,

        (FrameAction::DeselectAll, Phase::Unprocessed(Selection::Selected)) => Phase::DOUBLE_SELECTED,

        (
            FrameAction::ClearSelection,
            Phase::Unprocessed(Selection::Selected | Selection::DoubleSelected) | Phase::MarkedForRejection,
        ) => Phase::PLAIN,

        (FrameAction::FocusSelect, Phase::Unprocessed(_) | Phase::MarkedForRejection) => Phase::DOUBLE_SELECTED,

        _ => return None,
    };

    if next_phase == frame.phase {
        return None;
    }
    let mut next = frame.clone();
    next.phase = next_phase;
    Some(next)
}

/// Applies `action`, returning an unchanged copy when it does not apply.
pub fn transition(frame: &Frame, action: &FrameAction<'_>) -> Frame {
    try_transition(frame, action).unwrap_or_else(|| frame.clone())
}

/// Resolves the label a confirm would commit for `frame`.
pub fn resolved_label<'a>(frame: &'a Frame, batch_label: Option<&'a str>) -> Option<&'a str> {
    frame.individual_sponsor.as_deref().or(batch_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{DetectionBox, DetectionQuality, FrameId};

    fn frame(phase: Phase) -> Frame {
        Frame::new(
            FrameId::from("frame-1-1"),
            "/images/frame_0.jpg",
            DetectionBox { x: 0.0, y: 0.0, width: 10.0, height: 10.0, quality: DetectionQuality::Clear },
            2,
        )
        .with_phase(phase)
    }

    #[test]
    fn test_toggle_cycle() {
        let f = frame(Phase::PLAIN);
        let f = transition(&f, &FrameAction::Toggle);
        assert_eq!(f.phase, Phase::SELECTED);
        let f = transition(&f, &FrameAction::Toggle);
        assert_eq!(f.phase, Phase::DOUBLE_SELECTED);
        let f = transition(&f, &FrameAction::Toggle);
        assert_eq!(f.phase, Phase::SELECTED);
    }

    #[test]
    fn test_toggle_clears_rejection_mark() {
        let f = transition(&frame(Phase::MarkedForRejection), &FrameAction::Toggle);
        assert_eq!(f.phase, Phase::SELECTED);
    }

    #[test]
    fn test_terminal_phases_ignore_ordinary_actions() {
        let actions = [
            FrameAction::Toggle,
            FrameAction::RejectNow,
            FrameAction::MarkForRejection,
            FrameAction::Confirm { batch_label: Some("Nike") },
            FrameAction::Escape,
            FrameAction::AssignLabel("nike"),
            FrameAction::SelectAll,
            FrameAction::DeselectAll,
            FrameAction::ClearSelection,
            FrameAction::FocusSelect,
        ];
        for phase in [Phase::Confirmed, Phase::Rejected] {
            for action in &actions {
                assert!(try_transition(&frame(phase), action).is_none(), "{:?} on {:?}", action, phase);
            }
        }
    }

    #[test]
    fn test_reject_now_clears_labels() {
        let mut f = frame(Phase::DOUBLE_SELECTED);
        f.individual_sponsor = Some("nike".into());
        let f = transition(&f, &FrameAction::RejectNow);
        assert_eq!(f.phase, Phase::Rejected);
        assert!(f.individual_sponsor.is_none());
        assert!(f.sponsor_annotations.is_empty());
    }

    #[test]
    fn test_reject_now_is_idempotent() {
        let rejected = transition(&frame(Phase::SELECTED), &FrameAction::RejectNow);
        assert!(try_transition(&rejected, &FrameAction::RejectNow).is_none());
        assert_eq!(transition(&rejected, &FrameAction::RejectNow), rejected);
    }

    #[test]
    fn test_mark_for_rejection_only_from_double_selected() {
        assert!(try_transition(&frame(Phase::SELECTED), &FrameAction::MarkForRejection).is_none());
        let mut f = frame(Phase::DOUBLE_SELECTED);
        f.individual_sponsor = Some("nike".into());
        let f = transition(&f, &FrameAction::MarkForRejection);
        assert_eq!(f.phase, Phase::MarkedForRejection);
        assert!(f.individual_sponsor.is_none());
    }

    #[test]
    fn test_confirm_prefers_individual_label() {
        let mut f = frame(Phase::SELECTED);
        f.individual_sponsor = Some("mlb-cleats".into());
        let f = transition(&f, &FrameAction::Confirm { batch_label: Some("New York Yankees - Uniform") });
        assert_eq!(f.phase, Phase::Confirmed);
        assert_eq!(f.sponsor_annotations, vec!["mlb-cleats".to_string()]);
        assert!(f.individual_sponsor.is_none());
    }

    #[test]
    fn test_confirm_without_label_is_noop() {
        assert!(try_transition(&frame(Phase::SELECTED), &FrameAction::Confirm { batch_label: None }).is_none());
        assert!(try_transition(&frame(Phase::PLAIN), &FrameAction::Confirm { batch_label: Some("Nike") }).is_none());
    }

    #[test]
    fn test_confirm_resolves_marked_to_rejected() {
        let f = transition(&frame(Phase::MarkedForRejection), &FrameAction::Confirm { batch_label: None });
        assert_eq!(f.phase, Phase::Rejected);
    }

    #[test]
    fn test_confirm_deduplicates_annotation() {
        let mut f = frame(Phase::SELECTED);
        f.sponsor_annotations = vec!["Nike".into()];
        let f = transition(&f, &FrameAction::Confirm { batch_label: Some("Nike") });
        assert_eq!(f.sponsor_annotations, vec!["Nike".to_string()]);
    }

    #[test]
    fn test_escape_demotes_double_selected_only() {
        assert_eq!(transition(&frame(Phase::DOUBLE_SELECTED), &FrameAction::Escape).phase, Phase::SELECTED);
        assert!(try_transition(&frame(Phase::MarkedForRejection), &FrameAction::Escape).is_none());
        assert!(try_transition(&frame(Phase::SELECTED), &FrameAction::Escape).is_none());
    }

    #[test]
    fn test_assign_label_demotes_and_labels() {
        let f = transition(&frame(Phase::DOUBLE_SELECTED), &FrameAction::AssignLabel("coca-cola"));
        assert_eq!(f.phase, Phase::SELECTED);
        assert_eq!(f.individual_sponsor.as_deref(), Some("coca-cola"));
        assert!(try_transition(&frame(Phase::SELECTED), &FrameAction::AssignLabel("coca-cola")).is_none());
    }

    #[test]
    fn test_reject_then_restore_round_trip() {
        let original = frame(Phase::PLAIN);
        let rejected = transition(&original, &FrameAction::RejectNow);
        let restored = transition(&rejected, &FrameAction::Restore);
        assert_eq!(restored.phase, Phase::SELECTED);
        assert!(restored.sponsor_annotations.is_empty());
        assert_eq!(restored.with_phase(Phase::PLAIN), original);
    }

    #[test]
    fn test_restore_requires_rejected() {
        assert!(try_transition(&frame(Phase::Confirmed), &FrameAction::Restore).is_none());
        assert!(try_transition(&frame(Phase::SELECTED), &FrameAction::Restore).is_none());
    }

    #[test]
    fn test_reopen_brings_confirmed_back() {
        let mut f = frame(Phase::Confirmed);
        f.sponsor_annotations = vec!["Nike".into()];
        let f = transition(&f, &FrameAction::Reopen);
        assert_eq!(f.phase, Phase::SELECTED);
        assert!(f.sponsor_annotations.is_empty());
    }

    /// Deselect-all promotes instead of clearing. Kept as shipped pending
    /// product clarification.
    #[test]
    fn test_deselect_all_promotes_selected_to_double_selected() {
        assert_eq!(transition(&frame(Phase::SELECTED), &FrameAction::DeselectAll).phase, Phase::DOUBLE_SELECTED);
        assert!(try_transition(&frame(Phase::PLAIN), &FrameAction::DeselectAll).is_none());
        assert!(try_transition(&frame(Phase::DOUBLE_SELECTED), &FrameAction::DeselectAll).is_none());
    }

    #[test]
    fn test_select_all_and_clear_selection() {
        assert_eq!(transition(&frame(Phase::MarkedForRejection), &FrameAction::SelectAll).phase, Phase::SELECTED);
        assert_eq!(transition(&frame(Phase::DOUBLE_SELECTED), &FrameAction::SelectAll).phase, Phase::SELECTED);
        assert_eq!(transition(&frame(Phase::DOUBLE_SELECTED), &FrameAction::ClearSelection).phase, Phase::PLAIN);
        assert_eq!(transition(&frame(Phase::MarkedForRejection), &FrameAction::ClearSelection).phase, Phase::PLAIN);
    }

    #[test]
    fn test_focus_select_double_selects() {
        assert_eq!(transition(&frame(Phase::PLAIN), &FrameAction::FocusSelect).phase, Phase::DOUBLE_SELECTED);
        assert_eq!(transition(&frame(Phase::MarkedForRejection), &FrameAction::FocusSelect).phase, Phase::DOUBLE_SELECTED);
        assert!(try_transition(&frame(Phase::DOUBLE_SELECTED), &FrameAction::FocusSelect).is_none());
    }
}
