//! Review workflow coordination.
//!
//! Every user action enters through `ReviewCoordinator`. Each handler:
//! 1. Checks the gating flags (modals, focus, labels)
//! 2. Applies the selection state machine to the target frames in one commit
//! 3. Updates focus and queues notices
//! 4. Lets the lifecycle controller reconcile row and batch completion
//!
//! Invalid actions are no-ops, logged at debug level.

use crate::app::app_state::{Notice, ReviewState};
use crate::app::lifecycle::StepOutcome;
use crate::catalog::{Label, SelectedPlacement};
use crate::domain::navigation::{self, Direction};
use crate::domain::rows;
use crate::domain::transitions::FrameAction;
use crate::frame::{Confidence, FrameId};
use crate::settings::{PageSettings, SettingsError};
use crate::state::{DragAction, DragEvent, HitTarget};
use std::collections::HashSet;

/// Coordinates review actions against `ReviewState`.
pub struct ReviewCoordinator;

impl ReviewCoordinator {
    // ===== Single Frame =====

    /// Handles a click on a frame card: toggles it and focuses it if unprocessed.
    pub fn click_frame(state: &mut ReviewState, id: &FrameId) {
        if state.view.is_video_open() {
            tracing::debug!(%id, "click ignored while video viewer is open");
            return;
        }
        let Some(frame) = state.store.get(id) else {
            tracing::debug!(%id, "click on unknown frame");
            return;
        };
        if frame.is_processed() {
            tracing::debug!(%id, "click on processed frame ignored");
            return;
        }
        state.view.focus(id.clone());
        state.store.apply(&FrameAction::Toggle, |f| &f.id == id);
        Self::after_change(state);
    }

    /// Focuses an unprocessed frame without changing its selection.
    pub fn focus_frame(state: &mut ReviewState, id: &FrameId) {
        if state.view.is_video_open() {
            return;
        }
        if state.store.get(id).is_some_and(|f| f.is_unprocessed()) {
            state.view.focus(id.clone());
        }
    }

    /// Rejects one frame immediately.
    pub fn reject_frame(state: &mut ReviewState, id: &FrameId) {
        if state.view.is_video_open() {
            return;
        }
        let changed = state.store.apply(&FrameAction::RejectNow, |f| &f.id == id);
        if changed.is_empty() {
            tracing::debug!(%id, "reject ignored for processed frame");
            return;
        }
        state.view.clear_focus_if_in(&changed);
        Self::after_change(state);
    }

    /// Brings one rejected frame back to review.
    pub fn restore_frame(state: &mut ReviewState, id: &FrameId) {
        let changed = state.store.apply(&FrameAction::Restore, |f| &f.id == id);
        if changed.is_empty() {
            tracing::debug!(%id, "restore ignored for frame that is not rejected");
            return;
        }
        Self::after_change(state);
    }

    /// Sets the zoom preference of one frame. Allowed in any phase.
    pub fn set_frame_confidence(state: &mut ReviewState, id: &FrameId, confidence: Confidence) {
        state.store.update_where(|_, f| &f.id == id, |f| f.confidence = confidence);
    }

    // ===== Batch-wide Actions =====

    /// Plainly selects every unprocessed frame.
    pub fn select_all(state: &mut ReviewState) {
        let changed = state.store.apply(&FrameAction::SelectAll, |f| f.is_unprocessed());
        if !changed.is_empty() {
            Self::after_change(state);
        }
    }

    /// Promotes every plainly selected frame to double-selected.
    pub fn deselect_all(state: &mut ReviewState) {
        let changed = state.store.apply(&FrameAction::DeselectAll, |f| f.is_single_selected());
        if !changed.is_empty() {
            Self::after_change(state);
        }
    }

    /// Rejects every selected or double-selected frame now.
    pub fn reject_selected(state: &mut ReviewState) {
        let changed = state.store.apply(&FrameAction::RejectNow, |f| f.is_selected());
        if changed.is_empty() {
            tracing::debug!("reject ignored: nothing selected");
            return;
        }
        state.view.clear_focus_if_in(&changed);
        state.notify(Notice::success(
            format!("{} frames rejected!", changed.len()),
            "Selected frames have been immediately rejected.",
        ));
        Self::after_change(state);
    }

    /// Stages every double-selected frame for rejection at the next confirm.
    pub fn mark_for_rejection(state: &mut ReviewState) {
        let changed = state.store.apply(&FrameAction::MarkForRejection, |f| f.is_double_selected());
        if changed.is_empty() {
            tracing::debug!("mark for rejection ignored: nothing double-selected");
            return;
        }
        state.view.clear_focus_if_in(&changed);
        Self::after_change(state);
    }

    /// Confirms selected frames and finalizes marked ones in one commit.
    ///
    /// Selected frames take their own label, else the batch-wide label.
    /// The whole action is a no-op when a selected frame has no label to
    /// resolve and no frame carries its own label.
    pub fn confirm(state: &mut ReviewState) {
        let frames = state.store.frames();
        let selected = frames.iter().filter(|f| f.is_selected()).count();
        let marked = frames.iter().filter(|f| f.is_marked_for_rejection()).count();
        let individual = frames.iter().filter(|f| f.is_selected() && f.individual_sponsor.is_some()).count();

        if selected == 0 && marked == 0 {
            tracing::debug!("confirm ignored: nothing selected or marked");
            return;
        }
        let batch_label = state.labels.batch_label_name();
        if selected > individual && batch_label.is_none() && individual == 0 {
            tracing::debug!(selected, "confirm ignored: no label to apply");
            return;
        }

        let action = FrameAction::Confirm { batch_label: batch_label.as_deref() };
        let changed = state.store.apply(&action, |f| f.is_selected() || f.is_marked_for_rejection());
        if changed.is_empty() {
            return;
        }
        state.view.clear_focus_if_in(&changed);

        let changed: HashSet<&FrameId> = changed.iter().collect();
        let frames = state.store.frames();
        let confirmed = frames.iter().filter(|f| f.is_confirmed() && changed.contains(&f.id)).count();
        let rejected = frames.iter().filter(|f| f.is_rejected() && changed.contains(&f.id)).count();
        let label = batch_label.unwrap_or_default();

        let notice = if confirmed > 0 && rejected > 0 {
            let detail = if individual > 0 {
                format!("{} frames confirmed ({} individual assignments), {} frames rejected.", confirmed, individual, rejected)
            } else {
                format!("{} frames confirmed with {}, {} frames rejected.", confirmed, label, rejected)
            };
            Notice::success("Batch confirmed!", detail)
        } else if confirmed > 0 {
            let detail = if individual > 0 {
                format!("{} frames confirmed ({} individual assignments).", confirmed, individual)
            } else {
                format!("Frames annotated with {}.", label)
            };
            Notice::success(format!("{} frames confirmed!", confirmed), detail)
        } else {
            Notice::success(format!("{} frames rejected!", rejected), "Marked frames have been finalized as rejected.")
        };
        state.notify(notice);
        Self::after_change(state);
    }

    /// Escape: closes a keyboard-opened label picker, else backs out of double selection.
    pub fn escape(state: &mut ReviewState) {
        if state.view.is_dropdown_keyboard_open() {
            state.view.close_dropdown();
            return;
        }
        let changed = state.store.apply(&FrameAction::Escape, |f| f.is_double_selected());
        if !changed.is_empty() {
            Self::after_change(state);
        }
    }

    /// Gives every double-selected frame the quick label at `index`.
    pub fn assign_quick_label(state: &mut ReviewState, index: usize) {
        match state.labels.quick_label(index) {
            Some(label) => Self::assign_label(state, &label),
            None => tracing::debug!(index, "no quick label at index"),
        }
    }

    /// Gives every double-selected frame its own label and demotes it to selected.
    pub fn assign_label(state: &mut ReviewState, label: &Label) {
        let changed = state.store.apply(&FrameAction::AssignLabel(&label.id), |f| f.is_double_selected());
        if changed.is_empty() {
            tracing::debug!(label = %label.id, "label ignored: nothing double-selected");
            return;
        }
        state.notify(Notice::success(
            format!("Applied {}!", label.name),
            format!("Assigned \"{}\" to {} frames.", label.name, changed.len()),
        ));
        Self::after_change(state);
    }

    // ===== Row Actions =====

    fn row_range(state: &ReviewState, row: usize) -> std::ops::Range<usize> {
        rows::row_range(row, state.columns(), state.store.len())
    }

    pub fn row_select_all(state: &mut ReviewState, row: usize) {
        let range = Self::row_range(state, row);
        if !state.store.apply_range(&FrameAction::SelectAll, range).is_empty() {
            Self::after_change(state);
        }
    }

    /// Row variant of deselect-all; same promotion to double-selected.
    pub fn row_deselect_all(state: &mut ReviewState, row: usize) {
        let range = Self::row_range(state, row);
        if !state.store.apply_range(&FrameAction::DeselectAll, range).is_empty() {
            Self::after_change(state);
        }
    }

    /// Rejects every unprocessed frame of `row`.
    pub fn row_reject_all(state: &mut ReviewState, row: usize) {
        let range = Self::row_range(state, row);
        let changed = state.store.apply_range(&FrameAction::RejectNow, range);
        if changed.is_empty() {
            tracing::debug!(row, "row reject ignored: nothing unprocessed");
            return;
        }
        state.view.clear_focus_if_in(&changed);
        state.notify(Notice::success(
            format!("Row {} rejected!", row + 1),
            format!("{} frames rejected.", changed.len()),
        ));
        Self::after_change(state);
    }

    /// Reopens every frame of `row` and runs the restore animation.
    pub fn row_restore_all(state: &mut ReviewState, row: usize) {
        let range = Self::row_range(state, row);
        if range.is_empty() {
            tracing::debug!(row, "restore ignored for missing row");
            return;
        }
        state.lifecycle.begin_restore(row);
        state.store.apply_range(&FrameAction::Reopen, range);
        Self::after_change(state);
    }

    pub fn set_row_confidence(state: &mut ReviewState, row: usize, confidence: Confidence) {
        let range = Self::row_range(state, row);
        state.store.update_where(|i, _| range.contains(&i), |f| f.confidence = confidence);
    }

    pub fn toggle_row_collapsed(state: &mut ReviewState, row: usize) -> bool {
        state.lifecycle.toggle_collapsed(row)
    }

    // ===== Keyboard Navigation =====

    /// Moves focus to the next unprocessed frame in `direction` and double-selects it.
    pub fn navigate(state: &mut ReviewState, direction: Direction) {
        if state.view.is_dropdown_keyboard_open() || state.view.is_video_open() {
            return;
        }
        let Some(current) = state.view.focused().and_then(|id| state.store.position(id)) else {
            tracing::debug!(?direction, "navigation ignored: no focused frame");
            return;
        };
        let target = navigation::find_in_direction(state.frames(), current, state.columns(), direction);
        if let Some(index) = target {
            Self::focus_select(state, index);
        }
    }

    /// Moves focus to the next unprocessed frame in array order, wrapping.
    pub fn focus_next(state: &mut ReviewState) {
        let current = state.view.focused().and_then(|id| state.store.position(id));
        if let Some(index) = navigation::next_unprocessed(state.frames(), current) {
            Self::focus_select(state, index);
        }
    }

    /// Moves focus to the previous unprocessed frame in array order, wrapping.
    pub fn focus_previous(state: &mut ReviewState) {
        let current = state.view.focused().and_then(|id| state.store.position(id));
        if let Some(index) = navigation::previous_unprocessed(state.frames(), current) {
            Self::focus_select(state, index);
        }
    }

    fn focus_select(state: &mut ReviewState, index: usize) {
        let Some(id) = state.frames().get(index).map(|f| f.id.clone()) else {
            return;
        };
        state.view.focus(id.clone());
        if !state.store.apply(&FrameAction::FocusSelect, |f| f.id == id).is_empty() {
            Self::after_change(state);
        }
    }

    // ===== Drag Selection =====

    /// Pointer-down on the grid.
    ///
    /// # Returns
    /// `true` if a drag started
    pub fn drag_begin(state: &mut ReviewState, pos: egui::Pos2, shift: bool, target: HitTarget) -> bool {
        let modal_open = state.view.is_modal_open();
        state.drag.begin(pos, shift, target, modal_open)
    }

    /// Pointer-move during a drag.
    pub fn drag_update(state: &mut ReviewState, pos: egui::Pos2, bounds: &[(FrameId, egui::Rect)]) -> Vec<DragEvent> {
        let frames = state.store.snapshot();
        state.drag.update(pos, bounds, &frames)
    }

    /// Pointer-up: applies the drag's bulk action to its candidates.
    ///
    /// # Returns
    /// Ids of frames that changed
    pub fn drag_end(state: &mut ReviewState) -> Vec<FrameId> {
        let Some(outcome) = state.drag.end() else {
            return Vec::new();
        };
        let ids: HashSet<FrameId> = outcome.ids.into_iter().collect();
        let action = match outcome.action {
            DragAction::Select => FrameAction::Toggle,
            DragAction::Deselect => FrameAction::ClearSelection,
        };
        let changed = state.store.apply_to(&action, &ids);
        if !changed.is_empty() {
            Self::after_change(state);
        }
        changed
    }

    // ===== Labels and Overlays =====

    pub fn open_label_picker(state: &mut ReviewState, from_keyboard: bool) {
        state.view.open_dropdown(from_keyboard);
    }

    pub fn close_label_picker(state: &mut ReviewState) {
        state.view.close_dropdown();
    }

    /// Chooses the batch-wide placement and closes the picker.
    pub fn select_placement(state: &mut ReviewState, placement: SelectedPlacement) {
        state.labels.choose_placement(placement);
        state.view.close_dropdown();
    }

    /// Chooses the batch-wide sponsor and closes the picker.
    pub fn select_sponsor(state: &mut ReviewState, sponsor: Label) {
        state.labels.choose_sponsor(sponsor);
        state.view.close_dropdown();
    }

    pub fn set_video_open(state: &mut ReviewState, open: bool) {
        if open {
            state.drag.cancel();
        }
        state.view.set_video_open(open);
    }

    pub fn set_settings_open(state: &mut ReviewState, open: bool) {
        if open {
            state.drag.cancel();
        }
        state.view.set_settings_open(open);
    }

    pub fn set_tab_active(state: &mut ReviewState, active: bool) {
        state.view.set_tab_active(active);
    }

    /// Applies new page settings.
    ///
    /// A zoom change rewrites every frame's confidence; a column change
    /// clears focus and regroups rows.
    pub fn apply_settings(state: &mut ReviewState, settings: PageSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        let old = state.settings();
        state.set_settings(settings);

        if old.default_zoom != settings.default_zoom {
            state.store.update_where(|_, _| true, |f| f.confidence = settings.default_zoom);
        }
        if old.frames_per_row != settings.frames_per_row {
            state.view.clear_focus();
            state.invalidate_rows();
            let frames = state.store.snapshot();
            state.lifecycle.relayout(&frames, settings.frames_per_row);
        }
        state.notify(Notice::success("Settings updated!", "Your page settings have been saved."));
        Ok(())
    }

    // ===== Time =====

    /// Runs every lifecycle task due at or before `now_ms`.
    pub fn advance_time(state: &mut ReviewState, now_ms: u64) {
        while let Some(task) = state.lifecycle.pop_due(now_ms) {
            if let StepOutcome::BatchDue { batch } = state.lifecycle.step(task) {
                Self::load_next_batch(state, batch);
            }
            Self::after_change(state);
        }
        state.lifecycle.settle_clock(now_ms);
    }

    /// Advances the virtual clock by `delta_ms`.
    pub fn advance_by(state: &mut ReviewState, delta_ms: u64) {
        let target = state.lifecycle.now_ms().saturating_add(delta_ms);
        Self::advance_time(state, target);
    }

    fn load_next_batch(state: &mut ReviewState, finished: u32) {
        let frames = state.generator().generate(finished + 1, state.settings().default_zoom);
        state.store.replace(frames);
        state.lifecycle.complete_batch_advance();
        state.drag.cancel();
        state.view.reset_for_batch();
        state.labels.clear_batch_label();
        state.invalidate_rows();
    }

    /// Reconciles lifecycle state after a store change or fired task.
    fn after_change(state: &mut ReviewState) {
        let frames = state.store.snapshot();
        let columns = state.columns();
        let outcome = state.lifecycle.reconcile(&frames, columns);
        if outcome.batch_completed {
            let counts = state.counts();
            state.notify(Notice::success(
                format!("Batch {} completed!", state.progress().current_batch),
                format!("{} confirmed, {} rejected. Loading next batch...", counts.confirmed, counts.rejected),
            ));
        }
    }
}
