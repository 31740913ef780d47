//! State components for the review session.
//!
//! This module contains state-only logic (no rendering):
//! - Frame store (authoritative frame list, versioned snapshots, subscribers)
//! - Drag engine (rubber-band selection in progress)
//! - View state (focus, dropdown, modals, active tab)
//! - Label state (quick labels, batch-wide label, recent sponsors)

mod frame_store;
mod drag;
mod view_state;
mod labels;

pub use frame_store::{FrameStore, StoreChange, StoreChangeKind, SubscriptionId};
pub use drag::{rects_touch, DragAction, DragEngine, DragEvent, DragOutcome, HitTarget};
pub use view_state::{Dropdown, ViewState};
pub use labels::{BatchLabel, LabelState, RECENT_SPONSOR_LIMIT};
