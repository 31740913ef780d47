//! Header panel UI rendering
//!
//! Handles the top bar with batch progress, bulk actions, the batch-wide
//! label and the quick-label shortcuts.

use eframe::egui;
use egui::RichText;
use rframes::app::ReviewState;
use crate::ui::panel_manager::PanelInteraction;

/// Renders the header with bulk actions and label controls
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Review session state
/// * `interactions` - Collected interactions (appended to)
pub fn render_header(ui: &mut egui::Ui, state: &mut ReviewState, interactions: &mut Vec<PanelInteraction>) {
    let counts = state.counts();
    let progress = state.progress();

    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("Batch {}", progress.current_batch)).strong());
        ui.label(format!("Queue: {}", progress.queue_remaining));
        ui.label(format!("Validated: {}", progress.validated_batches));

        ui.separator();

        if ui.add_enabled(counts.has_selectable_frames(), egui::Button::new("Select All")).clicked() {
            interactions.push(PanelInteraction::SelectAll);
        }
        if ui.add_enabled(counts.selected > 0, egui::Button::new("Deselect All")).clicked() {
            interactions.push(PanelInteraction::DeselectAll);
        }
        if ui.add_enabled(counts.can_reject(), egui::Button::new("Reject Selected")).clicked() {
            interactions.push(PanelInteraction::RejectSelected);
        }
        let confirm_text = if counts.marked > 0 {
            format!("Confirm ({} selected, {} to reject)", counts.selected, counts.marked)
        } else {
            format!("Confirm ({})", counts.selected)
        };
        if ui.add_enabled(counts.can_confirm(), egui::Button::new(confirm_text)).clicked() {
            interactions.push(PanelInteraction::Confirm);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Settings").clicked() {
                interactions.push(PanelInteraction::SettingsToggled(true));
            }
            if ui.button("Video").clicked() {
                interactions.push(PanelInteraction::VideoToggled(true));
            }
        });
    });

    ui.horizontal_wrapped(|ui| {
        let label_text = state.labels.batch_label_name().unwrap_or_else(|| "No label chosen".to_string());
        ui.label("Label:");
        if ui.button(label_text).clicked() {
            interactions.push(if state.view.is_dropdown_open() {
                PanelInteraction::LabelPickerClosed
            } else {
                PanelInteraction::LabelPickerOpened
            });
        }

        ui.separator();

        // Digit shortcuts apply to double-selected frames only
        let can_assign = counts.double_selected > 0;
        for (index, label) in state.labels.quick_labels().iter().enumerate().take(10) {
            let text = format!("{}: {}", index, label.name);
            if ui.add_enabled(can_assign, egui::Button::new(text).small()).clicked() {
                interactions.push(PanelInteraction::QuickLabel(index));
            }
        }
    });
}
