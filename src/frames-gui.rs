//! Frame Review GUI Application
//!
//! Desktop front-end for the frame review core, built on egui:
//! - Grid of frame cards grouped into rows, completed rows collapsed below
//! - Click, rubber-band drag and keyboard selection
//! - Label picker, settings dialog and video viewer overlays
//! - Page settings persisted between runs
//!
//! All review logic lives in the `rframes` library; this binary only
//! renders `ReviewState` and forwards pointer, keyboard and clock input
//! to `ReviewCoordinator`.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use rframes::app::{Notice, ReviewCoordinator, ReviewState, SettingsCoordinator};
use rframes::settings::ReviewConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod ui;

use ui::panel_manager::{PanelInteraction, PanelManager};

/// How long a notice stays on screen.
const NOTICE_SECONDS: f64 = 4.0;

/// Main application entry point that initializes logging and launches the review GUI.
fn main() -> eframe::Result {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rframes=info,frames_gui=info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // `--sponsors` reviews against the sponsor catalog instead of placements
    let config = if std::env::args().skip(1).any(|arg| arg == "--sponsors") {
        ReviewConfig::sponsor_mode()
    } else {
        ReviewConfig::default()
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("Frame Review"),
        ..Default::default()
    };

    eframe::run_native(
        "Frame Review",
        options,
        Box::new(move |cc| Ok(Box::new(FrameReviewApp::new(cc, config)))),
    )
}

/// The frame review application.
///
/// Rendering is delegated to `PanelManager`; every resulting interaction
/// is dispatched to `ReviewCoordinator`.
struct FrameReviewApp {
    /// Review session
    state: ReviewState,
    /// Notices on screen with their expiry time
    toasts: Vec<(Notice, f64)>,
    /// Settings need writing on the next frame
    settings_dirty: bool,
}

impl FrameReviewApp {
    /// Creates the app with page settings loaded from persistent storage.
    fn new(cc: &eframe::CreationContext, config: ReviewConfig) -> Self {
        let settings = SettingsCoordinator::load_page_settings(cc.storage);
        tracing::info!(?settings, "starting review session");
        Self {
            state: ReviewState::new(config, settings),
            toasts: Vec::new(),
            settings_dirty: false,
        }
    }

    /// Handles panel interactions by delegating to ReviewCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction) {
        let state = &mut self.state;
        match interaction {
            PanelInteraction::FrameClicked(id) => ReviewCoordinator::click_frame(state, &id),
            PanelInteraction::FrameRejected(id) => ReviewCoordinator::reject_frame(state, &id),
            PanelInteraction::FrameRestored(id) => ReviewCoordinator::restore_frame(state, &id),
            PanelInteraction::FrameZoomChanged(id, zoom) => ReviewCoordinator::set_frame_confidence(state, &id, zoom),
            PanelInteraction::SelectAll => ReviewCoordinator::select_all(state),
            PanelInteraction::DeselectAll => ReviewCoordinator::deselect_all(state),
            PanelInteraction::RejectSelected => ReviewCoordinator::reject_selected(state),
            PanelInteraction::Confirm => ReviewCoordinator::confirm(state),
            PanelInteraction::QuickLabel(index) => ReviewCoordinator::assign_quick_label(state, index),
            PanelInteraction::RowSelectAll(row) => ReviewCoordinator::row_select_all(state, row),
            PanelInteraction::RowDeselectAll(row) => ReviewCoordinator::row_deselect_all(state, row),
            PanelInteraction::RowRejectAll(row) => ReviewCoordinator::row_reject_all(state, row),
            PanelInteraction::RowRestoreAll(row) => ReviewCoordinator::row_restore_all(state, row),
            PanelInteraction::RowZoomChanged(row, zoom) => ReviewCoordinator::set_row_confidence(state, row, zoom),
            PanelInteraction::RowCollapseToggled(row) => {
                ReviewCoordinator::toggle_row_collapsed(state, row);
            }
            PanelInteraction::DragStarted { pos, shift, target } => {
                ReviewCoordinator::drag_begin(state, pos, shift, target);
            }
            PanelInteraction::DragMoved { pos, bounds } => {
                ReviewCoordinator::drag_update(state, pos, &bounds);
            }
            PanelInteraction::DragReleased => {
                ReviewCoordinator::drag_end(state);
            }
            PanelInteraction::LabelPickerOpened => ReviewCoordinator::open_label_picker(state, false),
            PanelInteraction::LabelPickerClosed => ReviewCoordinator::close_label_picker(state),
            PanelInteraction::PlacementChosen(placement) => ReviewCoordinator::select_placement(state, placement),
            PanelInteraction::SponsorChosen(sponsor) => ReviewCoordinator::select_sponsor(state, sponsor),
            PanelInteraction::VideoToggled(open) => ReviewCoordinator::set_video_open(state, open),
            PanelInteraction::SettingsToggled(open) => ReviewCoordinator::set_settings_open(state, open),
            PanelInteraction::SettingsSaved(settings) => {
                match ReviewCoordinator::apply_settings(state, settings) {
                    Ok(()) => {
                        ReviewCoordinator::set_settings_open(state, false);
                        self.settings_dirty = true;
                    }
                    Err(err) => {
                        tracing::warn!(%err, "settings rejected");
                        state.notify(Notice::error("Invalid settings", err.to_string()));
                    }
                }
            }
            PanelInteraction::Key(event) => {
                rframes::KeyboardRouter::handle(state, &event);
            }
        }
    }

    /// Moves new notices onto the screen and drops expired ones.
    fn refresh_toasts(&mut self, now: f64) {
        for notice in self.state.drain_notices() {
            self.toasts.push((notice, now + NOTICE_SECONDS));
        }
        self.toasts.retain(|(_, expires)| *expires > now);
    }
}

impl eframe::App for FrameReviewApp {
    /// Called when the app is being shut down - ensures settings are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        SettingsCoordinator::save_page_settings(storage, &self.state.settings());
    }

    /// Main update loop.
    ///
    /// 1. Advance the review clock to wall-clock time
    /// 2. Render all panels via PanelManager
    /// 3. Dispatch panel interactions
    /// 4. Persist changed settings and schedule the next repaint
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        let tab_active = ctx.input(|i| i.focused);
        if tab_active != self.state.view.is_tab_active() {
            ReviewCoordinator::set_tab_active(&mut self.state, tab_active);
        }
        ReviewCoordinator::advance_time(&mut self.state, (now * 1000.0) as u64);
        self.refresh_toasts(now);

        for interaction in PanelManager::render_all_panels(ctx, &mut self.state, &self.toasts) {
            self.handle_panel_interaction(interaction);
        }

        if self.settings_dirty {
            if let Some(storage) = frame.storage_mut() {
                SettingsCoordinator::save_page_settings(storage, &self.state.settings());
                self.settings_dirty = false;
            }
        }

        let now_ms = self.state.lifecycle.now_ms();
        if let Some(due) = self.state.lifecycle.next_due() {
            let wait = due.saturating_sub(now_ms);
            ctx.request_repaint_after(std::time::Duration::from_millis(wait));
        } else if !self.toasts.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}
