//! Frame review core.
//!
//! Client-side state machine for reviewing batches of video frames and
//! annotating them with sponsor or placement labels:
//! - `frame` - Frame records and their review phase
//! - `domain` - Pure logic (selection transitions, rows, navigation, counts)
//! - `state` - Focused state components (frame store, drag, view flags, labels)
//! - `app` - Session state, review coordinator, row/batch lifecycle, settings persistence
//! - `input` - Keyboard command routing
//! - `catalog` / `generator` - Static reference data and mock batches
//! - `scheduler` - Virtual-clock task queue driving animations

pub mod app;
pub mod cache;
pub mod catalog;
pub mod domain;
pub mod frame;
pub mod generator;
pub mod input;
pub mod scheduler;
pub mod settings;
pub mod state;

pub use app::{Notice, NoticeLevel, ReviewCoordinator, ReviewState, SettingsCoordinator};
pub use domain::{group_into_rows, transition, try_transition, Direction, FrameAction, FrameCounts, RowPhase};
pub use frame::{Confidence, Frame, FrameId, Phase, Selection};
pub use generator::{generate_frames, BatchGenerator, BATCH_SIZE};
pub use input::{Key, KeyCommand, KeyEvent, KeyboardRouter, Modifiers};
pub use scheduler::{Scheduler, TaskId};
pub use settings::{LabelMode, PageSettings, ReviewConfig, SettingsError};
