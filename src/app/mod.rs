//! Application-level modules for the frame review session.
//!
//! This module contains the review coordinator, the lifecycle controller and
//! centralized state management.

mod app_state;
pub mod lifecycle;
mod review_coordinator;
mod settings_coordinator;

pub use app_state::{Notice, NoticeLevel, ReviewState};
pub use lifecycle::{BatchProgress, LifecycleController, LifecycleTask, RowTransition, StepOutcome};
pub use review_coordinator::ReviewCoordinator;
pub use settings_coordinator::{SettingsCoordinator, PAGE_SETTINGS_KEY};
