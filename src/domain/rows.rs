//! Row grouping and row-level derived views.
//!
//! Rows are never stored. They are recomputed from the frame list and the
//! current column count, so a settings change regroups everything at once.

use crate::frame::Frame;
use std::collections::BTreeMap;

/// Cosmetic animation phase of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowPhase {
    Stable,
    FadingOut,
    Moving,
    FadingIn,
    Completed,
    Restoring,
    Expanding,
}

impl RowPhase {
    /// Phases during which a row is being brought back for review.
    pub fn is_reopening(self) -> bool {
        matches!(self, RowPhase::Restoring | RowPhase::Expanding)
    }
}

/// Which bulk-selection button a row header offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowButton {
    SelectAll,
    DeselectAll,
}

/// A row in display order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrganizedRow<'a> {
    /// Index of the row in the ungrouped order.
    pub index: usize,
    pub frames: &'a [Frame],
    pub phase: RowPhase,
}

/// Splits `frames` into consecutive rows of `columns` frames; the last row may be short.
pub fn group_into_rows(frames: &[Frame], columns: usize) -> Vec<&[Frame]> {
    frames.chunks(columns.max(1)).collect()
}

/// Row index of the frame at `position`.
pub fn row_of(position: usize, columns: usize) -> usize {
    position / columns.max(1)
}

/// Array range covered by row `row`, clamped to `len`.
pub fn row_range(row: usize, columns: usize, len: usize) -> std::ops::Range<usize> {
    let columns = columns.max(1);
    let start = (row * columns).min(len);
    let end = (start + columns).min(len);
    start..end
}

/// A row is complete when it is non-empty and every frame is processed.
pub fn is_row_complete(row: &[Frame]) -> bool {
    !row.is_empty() && row.iter().all(Frame::is_processed)
}

/// Completion flag for every row.
pub fn completion_map(frames: &[Frame], columns: usize) -> Vec<bool> {
    group_into_rows(frames, columns).into_iter().map(is_row_complete).collect()
}

/// Orders rows for display: rows under review first, completed rows after.
///
/// Rows being restored stay in the review section even though their frames
/// may still read as complete for a moment. Rows without a recorded
/// transition report `Stable` or `Completed` according to their frames.
///
/// # Arguments
/// * `frames` - Current frame list
/// * `columns` - Frames per row
/// * `transitions` - Recorded row phases keyed by row index
pub fn organize_rows<'a>(
    frames: &'a [Frame],
    columns: usize,
    transitions: &BTreeMap<usize, RowPhase>,
) -> Vec<OrganizedRow<'a>> {
    let mut active = Vec::new();
    let mut completed = Vec::new();

    for (index, row) in group_into_rows(frames, columns).into_iter().enumerate() {
        let recorded = transitions.get(&index).copied();
        match recorded {
            Some(phase) if phase.is_reopening() => active.push(OrganizedRow { index, frames: row, phase }),
            _ if is_row_complete(row) => completed.push(OrganizedRow {
                index,
                frames: row,
                phase: recorded.unwrap_or(RowPhase::Completed),
            }),
            _ => active.push(OrganizedRow {
                index,
                frames: row,
                phase: recorded.unwrap_or(RowPhase::Stable),
            }),
        }
    }

    active.extend(completed);
    active
}

/// Picks the row header's bulk-selection button.
///
/// Any double-selected frame offers select-all; a row whose unprocessed
/// frames are all plainly selected offers deselect-all.
pub fn row_button(row: &[Frame]) -> RowButton {
    if row.iter().any(Frame::is_double_selected) {
        return RowButton::SelectAll;
    }
    let mut unprocessed = row.iter().filter(|f| f.is_unprocessed()).peekable();
    if unprocessed.peek().is_some() && unprocessed.all(Frame::is_single_selected) {
        RowButton::DeselectAll
    } else {
        RowButton::SelectAll
    }
}
