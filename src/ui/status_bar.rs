//! Status bar UI rendering
//!
//! Handles the bottom status bar with frame counters and recent notices.

use eframe::egui;
use egui::{Color32, RichText};
use rframes::app::{Notice, NoticeLevel, ReviewState};
use rframes::domain::ValidationSummary;

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Review session state
/// * `toasts` - Notices currently on screen, oldest first
pub fn render_status_bar(ui: &mut egui::Ui, state: &mut ReviewState, toasts: &[(Notice, f64)]) {
    let counts = state.counts();

    ui.horizontal(|ui| {
        ui.label(RichText::new(format!(
            "Frames: {} | Selected: {} | Double: {} | To reject: {} | Confirmed: {} | Rejected: {}",
            counts.total, counts.selected, counts.double_selected, counts.marked, counts.confirmed, counts.rejected
        )).strong());

        if state.lifecycle.is_advance_pending() {
            let summary = state.validation_summary();
            ui.label(RichText::new("|").strong());
            ui.label(RichText::new(format!(
                "Validated {}% | Rejected {}% | Avg clarity {:.1}",
                summary.validation_rate(),
                summary.rejection_rate(),
                summary.average_clarity
            )).strong().color(Color32::LIGHT_GREEN));

            let best: Vec<&str> = ValidationSummary::top_quality(state.frames(), 3)
                .into_iter()
                .map(|f| f.id.as_str())
                .collect();
            if !best.is_empty() {
                ui.label(format!("Best: {}", best.join(", ")));
            }
        }
    });

    for (notice, _) in toasts.iter().rev().take(3) {
        let color = match notice.level {
            NoticeLevel::Success => Color32::LIGHT_GREEN,
            NoticeLevel::Error => Color32::LIGHT_RED,
        };
        ui.horizontal(|ui| {
            ui.label(RichText::new(&notice.title).strong().color(color));
            ui.label(&notice.detail);
        });
    }
}
