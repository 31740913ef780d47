//! Overlay windows: label picker, settings dialog and video viewer.
//!
//! Each overlay is shown while its flag in `ViewState` is set; closing the
//! window emits the interaction that clears the flag.

use eframe::egui;
use rframes::app::ReviewState;
use rframes::catalog::{self, League, SelectedPlacement};
use rframes::frame::Confidence;
use rframes::settings::{LabelMode, PageSettings, FRAMES_PER_ROW_OPTIONS};
use crate::ui::panel_manager::PanelInteraction;

const LEAGUES: [(League, &str); 5] = [
    (League::Nba, "NBA"),
    (League::Mlb, "MLB"),
    (League::Nfl, "NFL"),
    (League::Mls, "MLS"),
    (League::Nhl, "NHL"),
];

/// Renders the label picker while the dropdown is open.
///
/// Placement mode lists rightsholders by league with their configured
/// placements; sponsor mode lists recent sponsors, the likely sponsor for
/// this batch and a filtered catalog.
pub fn render_label_picker(ctx: &egui::Context, state: &ReviewState, interactions: &mut Vec<PanelInteraction>) {
    if !state.view.is_dropdown_open() {
        return;
    }
    let mut open = true;
    egui::Window::new("Choose label")
        .open(&mut open)
        .collapsible(false)
        .default_width(320.0)
        .show(ctx, |ui| match state.labels.mode() {
            LabelMode::Placement(_) => render_placement_choices(ui, interactions),
            LabelMode::Sponsor => render_sponsor_choices(ui, state, interactions),
        });
    if !open {
        interactions.push(PanelInteraction::LabelPickerClosed);
    }
}

fn render_placement_choices(ui: &mut egui::Ui, interactions: &mut Vec<PanelInteraction>) {
    egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
        for (league, name) in LEAGUES {
            ui.collapsing(name, |ui| {
                for rightsholder in catalog::rightsholders_in(league) {
                    let placements = catalog::placements_for(rightsholder.name);
                    ui.horizontal_wrapped(|ui| {
                        ui.label(rightsholder.name);
                        if placements.is_empty() {
                            ui.weak("no placements configured");
                        }
                        for placement in placements {
                            if ui.small_button(placement).clicked() {
                                interactions.push(PanelInteraction::PlacementChosen(SelectedPlacement::new(
                                    rightsholder.name,
                                    placement,
                                )));
                            }
                        }
                    });
                }
            });
        }
    });
}

fn render_sponsor_choices(ui: &mut egui::Ui, state: &ReviewState, interactions: &mut Vec<PanelInteraction>) {
    if let Some(likely) = catalog::detect_most_likely_sponsor(state.frames()) {
        ui.horizontal(|ui| {
            ui.label("Detected:");
            if ui.button(likely.name).clicked() {
                interactions.push(PanelInteraction::SponsorChosen(likely.label()));
            }
        });
    }

    ui.label("Recent:");
    ui.horizontal_wrapped(|ui| {
        for sponsor in state.labels.recent_sponsors() {
            if ui.small_button(&sponsor.name).clicked() {
                interactions.push(PanelInteraction::SponsorChosen(sponsor.clone()));
            }
        }
    });
    ui.separator();

    let filter_id = egui::Id::new("sponsor_filter");
    let mut filter = ui.data_mut(|d| d.get_temp::<String>(filter_id).unwrap_or_default());
    ui.add(egui::TextEdit::singleline(&mut filter).hint_text("Search sponsors"));
    let needle = filter.to_lowercase();

    egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
        for sponsor in catalog::SPONSORS.iter().filter(|s| s.name.to_lowercase().contains(&needle)) {
            ui.horizontal(|ui| {
                if ui.selectable_label(false, sponsor.name).clicked() {
                    interactions.push(PanelInteraction::SponsorChosen(sponsor.label()));
                }
                ui.weak(sponsor.category);
            });
        }
    });
    ui.data_mut(|d| d.insert_temp(filter_id, filter));
}

/// Renders the page settings dialog.
///
/// Edits a draft kept in egui memory; nothing changes until Save.
pub fn render_settings_dialog(ctx: &egui::Context, state: &ReviewState, interactions: &mut Vec<PanelInteraction>) {
    let draft_id = egui::Id::new("settings_draft");
    if !state.view.is_settings_open() {
        ctx.data_mut(|d| d.remove::<PageSettings>(draft_id));
        return;
    }
    let mut draft = ctx.data_mut(|d| *d.get_temp_mut_or(draft_id, state.settings()));

    let mut open = true;
    egui::Window::new("Page settings")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("settings_grid").num_columns(2).show(ui, |ui| {
                ui.label("Frames per row");
                egui::ComboBox::from_id_salt("frames_per_row")
                    .selected_text(draft.frames_per_row.to_string())
                    .show_ui(ui, |ui| {
                        for option in FRAMES_PER_ROW_OPTIONS {
                            ui.selectable_value(&mut draft.frames_per_row, option, option.to_string());
                        }
                    });
                ui.end_row();

                ui.label("Default zoom");
                egui::ComboBox::from_id_salt("default_zoom")
                    .selected_text(draft.default_zoom.label())
                    .show_ui(ui, |ui| {
                        for zoom in Confidence::ALL {
                            ui.selectable_value(&mut draft.default_zoom, zoom, zoom.label());
                        }
                    });
                ui.end_row();
            });

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    interactions.push(PanelInteraction::SettingsSaved(draft));
                }
                if ui.button("Cancel").clicked() {
                    interactions.push(PanelInteraction::SettingsToggled(false));
                }
            });
        });
    ctx.data_mut(|d| d.insert_temp(draft_id, draft));

    if !open {
        interactions.push(PanelInteraction::SettingsToggled(false));
    }
}

/// Renders the video viewer for the current batch.
pub fn render_video_viewer(ctx: &egui::Context, state: &ReviewState, interactions: &mut Vec<PanelInteraction>) {
    if !state.view.is_video_open() {
        return;
    }
    let mut open = true;
    egui::Window::new("Source video")
        .open(&mut open)
        .collapsible(false)
        .default_size([640.0, 400.0])
        .show(ctx, |ui| {
            ui.label(format!("Batch {} source footage", state.progress().current_batch));
            ui.weak("Press Escape to close. Grid input is paused while the viewer is open.");
            let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), 320.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, egui::CornerRadius::same(4), egui::Color32::BLACK);
        });
    if !open {
        interactions.push(PanelInteraction::VideoToggled(false));
    }
}
