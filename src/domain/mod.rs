//! Domain logic for frame review.
//!
//! This module contains pure, state-free logic:
//! - Transitions (the single-frame selection state machine)
//! - Rows (grouping, completion, display order)
//! - Navigation (grid and sequential keyboard search)
//! - Summary (counters and the validation summary)

pub mod transitions;
pub mod rows;
pub mod navigation;
pub mod summary;

pub use transitions::{transition, try_transition, FrameAction};
pub use rows::{group_into_rows, is_row_complete, RowButton, RowPhase};
pub use navigation::Direction;
pub use summary::{FrameCounts, ValidationSummary};
