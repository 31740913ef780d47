//! Drag-rectangle selection state.
//!
//! This module tracks an in-progress rubber-band drag over the grid:
//! - Where it started and where the pointer is now
//! - Whether it selects or deselects
//! - Which frames the rectangle currently touches
//! - Which of those are candidates for the bulk action on release

use crate::frame::{Frame, FrameId};
use std::collections::{BTreeSet, HashMap};

/// Bulk action applied on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragAction {
    Select,
    Deselect,
}

/// What the pointer was over when the button went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    EmptyArea,
    Card,
    Control,
}

/// Rectangle membership change reported during a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Entered(FrameId),
    Left(FrameId),
}

/// Result of releasing a drag with a non-empty candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOutcome {
    pub action: DragAction,
    /// Candidates in id order.
    pub ids: Vec<FrameId>,
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    origin: egui::Pos2,
    current: egui::Pos2,
    action: DragAction,
    touching: BTreeSet<FrameId>,
    candidates: BTreeSet<FrameId>,
}

/// Rubber-band drag engine: idle until `begin`, dragging until `end`.
#[derive(Debug, Clone, Default)]
pub struct DragEngine {
    active: Option<ActiveDrag>,
}

impl DragEngine {
    pub fn new() -> Self {
        Self { active: None }
    }

    // ===== Queries =====

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn action(&self) -> Option<DragAction> {
        self.active.as_ref().map(|d| d.action)
    }

    /// Normalized selection rectangle, if dragging.
    pub fn rect(&self) -> Option<egui::Rect> {
        self.active.as_ref().map(|d| egui::Rect::from_two_pos(d.origin, d.current))
    }

    pub fn is_candidate(&self, id: &FrameId) -> bool {
        self.active.as_ref().is_some_and(|d| d.candidates.contains(id))
    }

    pub fn candidate_count(&self) -> usize {
        self.active.as_ref().map_or(0, |d| d.candidates.len())
    }

    // ===== Lifecycle =====

    /// Starts a drag if the press landed on empty grid area and no modal is open.
    ///
    /// # Arguments
    /// * `pos` - Pointer position in grid coordinates
    /// * `shift` - Shift held: deselect instead of select
    /// * `target` - What was under the pointer
    /// * `modal_open` - Video viewer or settings dialog is showing
    ///
    /// # Returns
    /// `true` if a drag started
    pub fn begin(&mut self, pos: egui::Pos2, shift: bool, target: HitTarget, modal_open: bool) -> bool {
        if modal_open || target != HitTarget::EmptyArea {
            tracing::debug!(?target, modal_open, "drag not started");
            return false;
        }
        let action = if shift { DragAction::Deselect } else { DragAction::Select };
        self.active = Some(ActiveDrag {
            origin: pos,
            current: pos,
            action,
            touching: BTreeSet::new(),
            candidates: BTreeSet::new(),
        });
        true
    }

    /// Moves the far corner and re-intersects against the frame bounds.
    ///
    /// Frames entering the rectangle become candidates only while
    /// unprocessed; frames leaving it stop being candidates.
    ///
    /// # Arguments
    /// * `pos` - New pointer position
    /// * `bounds` - Current on-screen bounds of each visible frame
    /// * `frames` - Current frames, for the processed check
    ///
    /// # Returns
    /// Enter/leave events in the order they were detected
    pub fn update(&mut self, pos: egui::Pos2, bounds: &[(FrameId, egui::Rect)], frames: &[Frame]) -> Vec<DragEvent> {
        let Some(drag) = self.active.as_mut() else {
            return Vec::new();
        };
        drag.current = pos;
        let selection = egui::Rect::from_two_pos(drag.origin, drag.current);

        let processed: HashMap<&FrameId, bool> = frames.iter().map(|f| (&f.id, f.is_processed())).collect();
        let mut events = Vec::new();

        for (id, rect) in bounds {
            let inside = rects_touch(selection, *rect);
            let was_inside = drag.touching.contains(id);
            if inside && !was_inside {
                drag.touching.insert(id.clone());
                if !processed.get(id).copied().unwrap_or(true) {
                    drag.candidates.insert(id.clone());
                }
                events.push(DragEvent::Entered(id.clone()));
            } else if !inside && was_inside {
                drag.touching.remove(id);
                drag.candidates.remove(id);
                events.push(DragEvent::Left(id.clone()));
            }
        }
        events
    }

    /// Ends the drag and discards its state.
    ///
    /// # Returns
    /// The bulk action to apply, or `None` when nothing was swept
    pub fn end(&mut self) -> Option<DragOutcome> {
        let drag = self.active.take()?;
        if drag.candidates.is_empty() {
            return None;
        }
        Some(DragOutcome {
            action: drag.action,
            ids: drag.candidates.into_iter().collect(),
        })
    }

    /// Drops an in-progress drag without applying anything.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

/// Axis-aligned overlap test; touching edges count as overlap.
pub fn rects_touch(a: egui::Rect, b: egui::Rect) -> bool {
    !(b.max.x < a.min.x || b.min.x > a.max.x || b.max.y < a.min.y || b.min.y > a.max.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Confidence, Phase};
    use crate::generator::generate_frames;
    use egui::{pos2, Rect};

    fn card(col: usize) -> Rect {
        let x = col as f32 * 110.0;
        Rect::from_min_max(pos2(x, 0.0), pos2(x + 100.0, 80.0))
    }

    fn layout(frames: &[Frame]) -> Vec<(FrameId, Rect)> {
        frames.iter().take(5).enumerate().map(|(i, f)| (f.id.clone(), card(i))).collect()
    }

    #[test]
    fn test_begin_requires_empty_area_and_no_modal() {
        let mut drag = DragEngine::new();
        assert!(!drag.begin(pos2(0.0, 0.0), false, HitTarget::Card, false));
        assert!(!drag.begin(pos2(0.0, 0.0), false, HitTarget::Control, false));
        assert!(!drag.begin(pos2(0.0, 0.0), false, HitTarget::EmptyArea, true));
        assert!(!drag.is_dragging());
        assert!(drag.begin(pos2(0.0, 0.0), true, HitTarget::EmptyArea, false));
        assert_eq!(drag.action(), Some(DragAction::Deselect));
    }

    #[test]
    fn test_enter_and_leave_bookkeeping() {
        let frames = generate_frames(1, Confidence::Mid);
        let bounds = layout(&frames);
        let mut drag = DragEngine::new();
        drag.begin(pos2(-5.0, 90.0), false, HitTarget::EmptyArea, false);

        let events = drag.update(pos2(215.0, 40.0), &bounds, &frames);
        assert_eq!(
            events,
            vec![DragEvent::Entered(frames[0].id.clone()), DragEvent::Entered(frames[1].id.clone())]
        );
        assert_eq!(drag.candidate_count(), 2);

        let events = drag.update(pos2(50.0, 40.0), &bounds, &frames);
        assert_eq!(events, vec![DragEvent::Left(frames[1].id.clone())]);
        assert_eq!(drag.candidate_count(), 1);
    }

    #[test]
    fn test_touching_edge_intersects() {
        let frames = generate_frames(1, Confidence::Mid);
        let bounds = layout(&frames);
        let mut drag = DragEngine::new();
        drag.begin(pos2(105.0, 0.0), false, HitTarget::EmptyArea, false);
        drag.update(pos2(110.0, 10.0), &bounds, &frames);
        assert!(drag.is_candidate(&frames[1].id));
        assert!(!drag.is_candidate(&frames[0].id));
    }

    #[test]
    fn test_processed_frames_never_become_candidates() {
        let mut frames = generate_frames(1, Confidence::Mid);
        frames[0].phase = Phase::Confirmed;
        let bounds = layout(&frames);
        let mut drag = DragEngine::new();
        drag.begin(pos2(0.0, 0.0), false, HitTarget::EmptyArea, false);
        let events = drag.update(pos2(120.0, 10.0), &bounds, &frames);
        assert_eq!(events.len(), 2);
        assert!(!drag.is_candidate(&frames[0].id));
        assert!(drag.is_candidate(&frames[1].id));
    }

    #[test]
    fn test_end_resets_state() {
        let frames = generate_frames(1, Confidence::Mid);
        let bounds = layout(&frames);
        let mut drag = DragEngine::new();

        drag.begin(pos2(0.0, 200.0), false, HitTarget::EmptyArea, false);
        drag.update(pos2(10.0, 210.0), &bounds, &frames);
        assert_eq!(drag.end(), None);
        assert!(!drag.is_dragging());

        drag.begin(pos2(0.0, 0.0), false, HitTarget::EmptyArea, false);
        drag.update(pos2(10.0, 10.0), &bounds, &frames);
        let outcome = drag.end();
        assert_eq!(
            outcome,
            Some(DragOutcome { action: DragAction::Select, ids: vec![frames[0].id.clone()] })
        );
        assert!(!drag.is_dragging());
        assert_eq!(drag.end(), None);
    }
}
