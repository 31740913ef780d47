use proptest::prelude::*;
use rframes::app::{ReviewCoordinator, ReviewState};
use rframes::state::HitTarget;
use rframes::domain::{transition, try_transition, FrameAction};
use rframes::{generate_frames, Confidence, Direction, Phase};

#[derive(Debug, Clone)]
enum Op {
    Click(usize),
    Reject(usize),
    Restore(usize),
    SelectAll,
    DeselectAll,
    RejectSelected,
    MarkForRejection,
    Confirm,
    Escape,
    QuickLabel(usize),
    RowReject(usize),
    RowRestore(usize),
    Navigate(Direction),
    Next,
    Previous,
    Wait(u64),
    DragSelect(usize, usize),
    DragDeselect(usize, usize),
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Up),
        Just(Direction::Down),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..20).prop_map(Op::Click),
        (0usize..20).prop_map(Op::Reject),
        (0usize..20).prop_map(Op::Restore),
        Just(Op::SelectAll),
        Just(Op::DeselectAll),
        Just(Op::RejectSelected),
        Just(Op::MarkForRejection),
        Just(Op::Confirm),
        Just(Op::Escape),
        (0usize..10).prop_map(Op::QuickLabel),
        (0usize..4).prop_map(Op::RowReject),
        (0usize..4).prop_map(Op::RowRestore),
        direction().prop_map(Op::Navigate),
        Just(Op::Next),
        Just(Op::Previous),
        (0u64..2_000).prop_map(Op::Wait),
        (0usize..20, 1usize..8).prop_map(|(start, len)| Op::DragSelect(start, len)),
        (0usize..20, 1usize..8).prop_map(|(start, len)| Op::DragDeselect(start, len)),
    ]
}

fn id(state: &ReviewState, index: usize) -> Option<rframes::FrameId> {
    state.frames().get(index).map(|f| f.id.clone())
}

/// Lays the frames out in a single strip, 100 points apart.
fn strip_bounds(state: &ReviewState) -> Vec<(rframes::FrameId, egui::Rect)> {
    state
        .frames()
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let x = i as f32 * 100.0;
            (f.id.clone(), egui::Rect::from_min_max(egui::pos2(x, 0.0), egui::pos2(x + 90.0, 60.0)))
        })
        .collect()
}

fn drag_across(state: &mut ReviewState, start: usize, len: usize, shift: bool) {
    let bounds = strip_bounds(state);
    let first = start as f32 * 100.0 - 5.0;
    let last = (start + len - 1) as f32 * 100.0 + 45.0;
    if ReviewCoordinator::drag_begin(state, egui::pos2(first, 70.0), shift, HitTarget::EmptyArea) {
        ReviewCoordinator::drag_update(state, egui::pos2(last, 30.0), &bounds);
        ReviewCoordinator::drag_end(state);
    }
}

fn run(state: &mut ReviewState, op: &Op) {
    match *op {
        Op::Click(i) => {
            if let Some(id) = id(state, i) {
                ReviewCoordinator::click_frame(state, &id);
            }
        }
        Op::Reject(i) => {
            if let Some(id) = id(state, i) {
                ReviewCoordinator::reject_frame(state, &id);
            }
        }
        Op::Restore(i) => {
            if let Some(id) = id(state, i) {
                ReviewCoordinator::restore_frame(state, &id);
            }
        }
        Op::SelectAll => ReviewCoordinator::select_all(state),
        Op::DeselectAll => ReviewCoordinator::deselect_all(state),
        Op::RejectSelected => ReviewCoordinator::reject_selected(state),
        Op::MarkForRejection => ReviewCoordinator::mark_for_rejection(state),
        Op::Confirm => ReviewCoordinator::confirm(state),
        Op::Escape => ReviewCoordinator::escape(state),
        Op::QuickLabel(i) => ReviewCoordinator::assign_quick_label(state, i),
        Op::RowReject(row) => ReviewCoordinator::row_reject_all(state, row),
        Op::RowRestore(row) => ReviewCoordinator::row_restore_all(state, row),
        Op::Navigate(direction) => ReviewCoordinator::navigate(state, direction),
        Op::Next => ReviewCoordinator::focus_next(state),
        Op::Previous => ReviewCoordinator::focus_previous(state),
        Op::Wait(ms) => ReviewCoordinator::advance_by(state, ms),
        Op::DragSelect(start, len) => drag_across(state, start, len, false),
        Op::DragDeselect(start, len) => drag_across(state, start, len, true),
    }
}

fn check_invariants(state: &ReviewState) -> Result<(), TestCaseError> {
    prop_assert_eq!(state.frames().len(), 20);
    for frame in state.frames() {
        let mut seen = std::collections::HashSet::new();
        prop_assert!(frame.sponsor_annotations.iter().all(|a| seen.insert(a)), "duplicate annotation on {}", frame.id);
        match frame.phase {
            Phase::Confirmed => {
                prop_assert!(!frame.sponsor_annotations.is_empty());
                prop_assert!(frame.individual_sponsor.is_none());
            }
            Phase::Rejected => {
                prop_assert!(frame.sponsor_annotations.is_empty());
                prop_assert!(frame.individual_sponsor.is_none());
            }
            Phase::MarkedForRejection => prop_assert!(frame.individual_sponsor.is_none()),
            Phase::Unprocessed(_) => {}
        }
    }
    if let Some(focused) = state.view.focused() {
        let frame = state.store.get(focused);
        prop_assert!(frame.is_some_and(|f| f.is_unprocessed()), "focus on processed or missing frame");
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_actions_preserve_invariants(ops in prop::collection::vec(op(), 1..60)) {
        let mut state = ReviewState::default();
        for op in &ops {
            run(&mut state, op);
            check_invariants(&state)?;
        }
    }

    #[test]
    fn prop_counts_partition_frames(ops in prop::collection::vec(op(), 1..40)) {
        let mut state = ReviewState::default();
        for op in &ops {
            run(&mut state, op);
        }
        let counts = state.counts();
        prop_assert_eq!(counts.unprocessed + counts.confirmed + counts.rejected, counts.total);
        prop_assert!(counts.double_selected <= counts.selected);
        prop_assert!(counts.selected + counts.marked <= counts.unprocessed);
    }

    #[test]
    fn prop_deselect_drag_clears_covered_frames(
        ops in prop::collection::vec(op(), 0..30),
        start in 0usize..20,
        len in 1usize..8,
    ) {
        let mut state = ReviewState::default();
        for op in &ops {
            run(&mut state, op);
        }
        let before: Vec<Phase> = state.frames().iter().map(|f| f.phase).collect();
        drag_across(&mut state, start, len, true);

        let covered = start..(start + len).min(20);
        for (index, frame) in state.frames().iter().enumerate() {
            if covered.contains(&index) && frame.is_unprocessed() {
                prop_assert_eq!(frame.phase, Phase::PLAIN);
            } else {
                prop_assert_eq!(frame.phase, before[index]);
            }
        }
        prop_assert!(!state.drag.is_dragging());
    }

    #[test]
    fn prop_terminal_frames_only_reopen(index in 0usize..20, confirm in any::<bool>()) {
        let frame = generate_frames(1, Confidence::Mid).swap_remove(index);
        let terminal = if confirm {
            transition(&frame, &FrameAction::Confirm { batch_label: Some("Nike") })
        } else {
            transition(&frame, &FrameAction::RejectNow)
        };
        prop_assert!(terminal.is_processed());

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
        for action in &actions {
            prop_assert!(try_transition(&terminal, action).is_none());
        }
        let reopened = transition(&terminal, &FrameAction::Reopen);
        prop_assert_eq!(reopened.phase, Phase::SELECTED);
        prop_assert!(reopened.sponsor_annotations.is_empty());
    }
}
