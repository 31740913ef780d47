//! Row and batch lifecycle.
//!
//! Watches row completion after every store change and sequences the
//! cosmetic row animations through the scheduler:
//! - Completion: fading-out (400ms), moving (100ms), collapsed + fading-in (400ms), completed
//! - Restore-all: restoring (300ms), un-collapsed + expanding (400ms), stable
//! - Batch completion: advance to the next batch after 1500ms
//!
//! Every scheduled row step carries the batch and the phase it expects to
//! find. A step whose row has moved on (restored mid-collapse, new batch) is
//! dropped instead of applied.

use crate::domain::rows::{self, RowPhase};
use crate::frame::Frame;
use crate::scheduler::{Scheduler, TaskId};
use std::collections::{BTreeMap, BTreeSet};

pub const FADE_OUT_MS: u64 = 400;
pub const MOVE_MS: u64 = 100;
pub const FADE_IN_MS: u64 = 400;
pub const RESTORE_MS: u64 = 300;
pub const EXPAND_MS: u64 = 400;
pub const BATCH_ADVANCE_MS: u64 = 1500;

/// Delayed lifecycle work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleTask {
    RowStep { batch: u32, row: usize, expected: RowPhase },
    AdvanceBatch { batch: u32 },
}

/// A row's current animation phase and when it was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowTransition {
    pub phase: RowPhase,
    pub since_ms: u64,
}

/// What handling a fired task did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    RowAdvanced { row: usize, phase: RowPhase },
    /// The batch advance delay elapsed; the caller loads the next batch.
    BatchDue { batch: u32 },
    Stale,
}

/// What a reconcile pass started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciled {
    /// Rows whose completion animation started.
    pub rows_started: Vec<usize>,
    /// Rows that were complete and no longer are.
    pub rows_reopened: Vec<usize>,
    /// The batch just became complete and an advance was scheduled.
    pub batch_completed: bool,
    /// A pending advance was withdrawn because a frame was reopened.
    pub advance_cancelled: bool,
}

/// Batch counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub current_batch: u32,
    pub queue_remaining: u32,
    pub validated_batches: u32,
}

#[derive(Debug, Clone)]
pub struct LifecycleController {
    transitions: BTreeMap<usize, RowTransition>,
    collapsed: BTreeSet<usize>,
    previously_completed: BTreeSet<usize>,
    progress: BatchProgress,
    advance_task: Option<TaskId>,
    scheduler: Scheduler<LifecycleTask>,
}

impl LifecycleController {
    /// Creates a controller for batch 1 with `initial_queue` batches waiting.
    pub fn new(initial_queue: u32) -> Self {
        Self {
            transitions: BTreeMap::new(),
            collapsed: BTreeSet::new(),
            previously_completed: BTreeSet::new(),
            progress: BatchProgress {
                current_batch: 1,
                queue_remaining: initial_queue,
                validated_batches: 0,
            },
            advance_task: None,
            scheduler: Scheduler::new(),
        }
    }

    // ===== Queries =====

    pub fn progress(&self) -> BatchProgress {
        self.progress
    }

    pub fn current_batch(&self) -> u32 {
        self.progress.current_batch
    }

    pub fn is_advance_pending(&self) -> bool {
        self.advance_task.is_some()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn row_transition(&self, row: usize) -> Option<RowTransition> {
        self.transitions.get(&row).copied()
    }

    pub fn row_phase(&self, row: usize) -> Option<RowPhase> {
        self.transitions.get(&row).map(|t| t.phase)
    }

    /// Recorded phases keyed by row, for display ordering.
    pub fn row_phases(&self) -> BTreeMap<usize, RowPhase> {
        self.transitions.iter().map(|(row, t)| (*row, t.phase)).collect()
    }

    pub fn collapsed_rows(&self) -> &BTreeSet<usize> {
        &self.collapsed
    }

    pub fn is_collapsed(&self, row: usize) -> bool {
        self.collapsed.contains(&row)
    }

    // ===== Reconcile =====

    /// Recomputes row and batch completion after a store change or fired task.
    ///
    /// # Arguments
    /// * `frames` - Current frames
    /// * `columns` - Frames per row
    pub fn reconcile(&mut self, frames: &[Frame], columns: usize) -> Reconciled {
        let mut outcome = Reconciled::default();
        let mut currently_completed = BTreeSet::new();

        for (row, row_frames) in rows::group_into_rows(frames, columns).into_iter().enumerate() {
            let phase = self.row_phase(row);
            let reopening = phase.is_some_and(RowPhase::is_reopening);

            if rows::is_row_complete(row_frames) {
                if reopening {
                    continue;
                }
                currently_completed.insert(row);
                let idle = matches!(phase, None | Some(RowPhase::Stable));
                if !self.previously_completed.contains(&row) && idle {
                    self.set_phase(row, RowPhase::FadingOut);
                    self.schedule_row_step(FADE_OUT_MS, row, RowPhase::FadingOut);
                    outcome.rows_started.push(row);
                    tracing::info!(row, batch = self.progress.current_batch, "row complete");
                }
            } else if !reopening && matches!(phase, Some(p) if p != RowPhase::Stable) {
                // A single-frame restore reopened a completed row.
                self.set_phase(row, RowPhase::Stable);
                self.collapsed.remove(&row);
                outcome.rows_reopened.push(row);
            }
        }
        self.previously_completed = currently_completed;

        let all_processed = !frames.is_empty() && frames.iter().all(Frame::is_processed);
        match (all_processed, self.advance_task) {
            (true, None) => {
                let id = self.scheduler.schedule_after(
                    BATCH_ADVANCE_MS,
                    LifecycleTask::AdvanceBatch { batch: self.progress.current_batch },
                );
                self.advance_task = Some(id);
                outcome.batch_completed = true;
                tracing::info!(batch = self.progress.current_batch, "batch complete, advance scheduled");
            }
            (false, Some(id)) => {
                // A restore inside the advance delay keeps the batch open.
                self.scheduler.cancel(id);
                self.advance_task = None;
                outcome.advance_cancelled = true;
                tracing::info!(batch = self.progress.current_batch, "batch reopened, advance cancelled");
            }
            _ => {}
        }
        outcome
    }

    // ===== Row Operations =====

    /// Starts the reopen sequence for `row`. Frame phases are the caller's job.
    pub fn begin_restore(&mut self, row: usize) {
        self.set_phase(row, RowPhase::Restoring);
        self.schedule_row_step(RESTORE_MS, row, RowPhase::Restoring);
    }

    /// Manual collapse toggle; leaves transitions alone.
    ///
    /// # Returns
    /// `true` if the row is collapsed afterwards
    pub fn toggle_collapsed(&mut self, row: usize) -> bool {
        if self.collapsed.remove(&row) {
            false
        } else {
            self.collapsed.insert(row);
            true
        }
    }

    /// Rebuilds row bookkeeping after the column count changed.
    ///
    /// Row indices mean different frames now, so pending row steps are
    /// dropped and complete rows settle directly into the collapsed state.
    pub fn relayout(&mut self, frames: &[Frame], columns: usize) {
        self.scheduler.cancel_where(|task| matches!(task, LifecycleTask::RowStep { .. }));
        self.transitions.clear();
        self.collapsed.clear();
        self.previously_completed.clear();

        let now = self.scheduler.now_ms();
        for (row, row_frames) in rows::group_into_rows(frames, columns).into_iter().enumerate() {
            if rows::is_row_complete(row_frames) {
                self.collapsed.insert(row);
                self.previously_completed.insert(row);
                self.transitions.insert(row, RowTransition { phase: RowPhase::Completed, since_ms: now });
            }
        }
    }

    // ===== Timers =====

    /// Pops the next task due at or before `until_ms`.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<LifecycleTask> {
        self.scheduler.pop_due(until_ms).map(|(_, task)| task)
    }

    /// Moves the virtual clock to `now_ms` once all due tasks ran.
    pub fn settle_clock(&mut self, now_ms: u64) {
        self.scheduler.set_now(now_ms);
    }

    /// Applies a fired task.
    pub fn step(&mut self, task: LifecycleTask) -> StepOutcome {
        match task {
            LifecycleTask::AdvanceBatch { batch } => {
                if batch != self.progress.current_batch || self.advance_task.is_none() {
                    tracing::trace!(batch, "stale batch advance dropped");
                    return StepOutcome::Stale;
                }
                StepOutcome::BatchDue { batch }
            }
            LifecycleTask::RowStep { batch, row, expected } => {
                if batch != self.progress.current_batch || self.row_phase(row) != Some(expected) {
                    tracing::trace!(row, ?expected, "stale row step dropped");
                    return StepOutcome::Stale;
                }
                let phase = match expected {
                    RowPhase::FadingOut => {
                        self.schedule_row_step(MOVE_MS, row, RowPhase::Moving);
                        RowPhase::Moving
                    }
                    RowPhase::Moving => {
                        self.collapsed.insert(row);
                        self.schedule_row_step(FADE_IN_MS, row, RowPhase::FadingIn);
                        RowPhase::FadingIn
                    }
                    RowPhase::FadingIn => RowPhase::Completed,
                    RowPhase::Restoring => {
                        self.collapsed.remove(&row);
                        self.previously_completed.remove(&row);
                        self.schedule_row_step(EXPAND_MS, row, RowPhase::Expanding);
                        RowPhase::Expanding
                    }
                    RowPhase::Expanding => RowPhase::Stable,
                    RowPhase::Stable | RowPhase::Completed => return StepOutcome::Stale,
                };
                self.set_phase(row, phase);
                tracing::trace!(row, ?phase, "row step");
                StepOutcome::RowAdvanced { row, phase }
            }
        }
    }

    /// Resets all per-batch bookkeeping and bumps the counters.
    ///
    /// Called by the owner after it replaced the frames with the next batch.
    pub fn complete_batch_advance(&mut self) -> u32 {
        self.scheduler.cancel_all();
        self.transitions.clear();
        self.collapsed.clear();
        self.previously_completed.clear();
        self.advance_task = None;
        self.progress.current_batch += 1;
        self.progress.queue_remaining = self.progress.queue_remaining.saturating_sub(1);
        self.progress.validated_batches += 1;
        tracing::info!(
            batch = self.progress.current_batch,
            queue_remaining = self.progress.queue_remaining,
            "advanced to next batch"
        );
        self.progress.current_batch
    }

    fn set_phase(&mut self, row: usize, phase: RowPhase) {
        let since_ms = self.scheduler.now_ms();
        self.transitions.insert(row, RowTransition { phase, since_ms });
    }

    fn schedule_row_step(&mut self, delay_ms: u64, row: usize, expected: RowPhase) {
        let batch = self.progress.current_batch;
        self.scheduler.schedule_after(delay_ms, LifecycleTask::RowStep { batch, row, expected });
    }
}
