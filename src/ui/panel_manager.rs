//! Panel orchestration and layout management.
//!
//! Coordinates all UI panels (header, grid, status bar, overlays) and
//! collects their interactions for the application to dispatch.

use eframe::egui;
use rframes::app::{Notice, ReviewState};
use rframes::catalog::{Label, SelectedPlacement};
use rframes::frame::{Confidence, FrameId};
use rframes::input::KeyEvent;
use rframes::settings::PageSettings;
use rframes::state::HitTarget;
use crate::ui::{grid, header, input, overlays, status_bar};

/// Result of panel interactions that need to be handled by the review coordinator.
#[derive(Debug, Clone)]
pub enum PanelInteraction {
    FrameClicked(FrameId),
    FrameRejected(FrameId),
    FrameRestored(FrameId),
    FrameZoomChanged(FrameId, Confidence),
    SelectAll,
    DeselectAll,
    RejectSelected,
    Confirm,
    QuickLabel(usize),
    RowSelectAll(usize),
    RowDeselectAll(usize),
    RowRejectAll(usize),
    RowRestoreAll(usize),
    RowZoomChanged(usize, Confidence),
    RowCollapseToggled(usize),
    /// Primary button went down over the grid
    DragStarted {
        pos: egui::Pos2,
        shift: bool,
        target: HitTarget,
    },
    /// Pointer moved during a drag; carries the current card bounds
    DragMoved {
        pos: egui::Pos2,
        bounds: Vec<(FrameId, egui::Rect)>,
    },
    DragReleased,
    LabelPickerOpened,
    LabelPickerClosed,
    PlacementChosen(SelectedPlacement),
    SponsorChosen(Label),
    VideoToggled(bool),
    SettingsToggled(bool),
    SettingsSaved(PageSettings),
    Key(KeyEvent),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// # Arguments
    /// * `ctx` - The egui context
    /// * `state` - Review session state
    /// * `toasts` - Notices currently on screen
    ///
    /// # Returns
    /// Interactions in the order they happened
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut ReviewState,
        toasts: &[(Notice, f64)],
    ) -> Vec<PanelInteraction> {
        let mut interactions = Vec::new();

        // Keyboard first, so shortcuts see the state the user saw
        state.view.set_text_input_focused(ctx.wants_keyboard_input());
        interactions.extend(input::keyboard::collect_key_events(ctx).into_iter().map(PanelInteraction::Key));

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            header::render_header(ui, state, &mut interactions);
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state, toasts);
        });

        let grid_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(8))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default().frame(grid_frame).show(ctx, |ui| {
            grid::render_grid(ui, state, &mut interactions);
        });

        overlays::render_label_picker(ctx, state, &mut interactions);
        overlays::render_settings_dialog(ctx, state, &mut interactions);
        overlays::render_video_viewer(ctx, state, &mut interactions);

        interactions
    }
}
