//! Frame grid rendering.
//!
//! Draws rows of frame cards in display order (rows under review first,
//! completed rows after) and turns pointer input into interactions:
//! - Card click toggles, the corner button rejects or restores
//! - Row header buttons act on the whole row
//! - A press on empty grid area starts a rubber-band drag

use eframe::egui;
use egui::{Align2, Color32, CornerRadius, FontId, Rect, Sense, Stroke, StrokeKind, Vec2};
use rframes::app::lifecycle::{EXPAND_MS, FADE_IN_MS, FADE_OUT_MS, RESTORE_MS};
use rframes::app::ReviewState;
use rframes::domain::rows::{self, OrganizedRow, RowButton, RowPhase};
use rframes::frame::{Confidence, DetectionQuality, Frame, FrameId, Phase, Selection};
use rframes::state::{DragAction, HitTarget};
use crate::ui::panel_manager::PanelInteraction;

const CARD_GAP: f32 = 8.0;
const ROW_HEADER_HEIGHT: f32 = 24.0;
const CARD_ASPECT: f32 = 0.6;

/// Screen regions recorded while drawing, for pointer hit testing.
#[derive(Default)]
struct HitRegions {
    cards: Vec<(FrameId, Rect)>,
    controls: Vec<Rect>,
}

impl HitRegions {
    fn target_at(&self, pos: egui::Pos2) -> HitTarget {
        if self.controls.iter().any(|r| r.contains(pos)) {
            HitTarget::Control
        } else if self.cards.iter().any(|(_, r)| r.contains(pos)) {
            HitTarget::Card
        } else {
            HitTarget::EmptyArea
        }
    }
}

/// Renders the frame grid
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Review session state
/// * `interactions` - Collected interactions (appended to)
pub fn render_grid(ui: &mut egui::Ui, state: &ReviewState, interactions: &mut Vec<PanelInteraction>) {
    let columns = state.columns();
    let now_ms = state.lifecycle.now_ms();
    let card_width = ((ui.available_width() - CARD_GAP * (columns as f32 - 1.0)) / columns as f32).max(40.0);
    let card_size = Vec2::new(card_width, card_width * CARD_ASPECT);
    let grid_rect = ui.available_rect_before_wrap();
    let mut regions = HitRegions::default();

    let organized = state.organized_rows();
    let first_completed = organized
        .iter()
        .position(|row| rows::is_row_complete(row.frames) && !row.phase.is_reopening());

    for (position, row) in organized.iter().enumerate() {
        if Some(position) == first_completed {
            ui.add_space(CARD_GAP);
            ui.separator();
            ui.label(egui::RichText::new("Completed rows").strong());
        }
        let opacity = row_opacity(state, row, now_ms);
        render_row_header(ui, state, row, &mut regions, interactions);
        if !state.lifecycle.is_collapsed(row.index) {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = CARD_GAP;
                for frame in row.frames {
                    render_card(ui, state, frame, card_size, opacity, &mut regions, interactions);
                }
            });
        }
        ui.add_space(CARD_GAP);
    }

    handle_drag_input(ui, state, grid_rect, &regions, interactions);

    if let Some(rect) = state.drag.rect() {
        let color = match state.drag.action() {
            Some(DragAction::Deselect) => Color32::from_rgb(220, 80, 80),
            _ => Color32::from_rgb(80, 140, 230),
        };
        let painter = ui.painter();
        painter.rect_filled(rect, CornerRadius::ZERO, color.gamma_multiply(0.15));
        painter.rect_stroke(rect, CornerRadius::ZERO, Stroke::new(1.0, color), StrokeKind::Inside);
    }
}

/// Opacity for cards of a row in a fade phase.
fn row_opacity(state: &ReviewState, row: &OrganizedRow<'_>, now_ms: u64) -> f32 {
    let Some(transition) = state.lifecycle.row_transition(row.index) else {
        return 1.0;
    };
    let elapsed = now_ms.saturating_sub(transition.since_ms) as f32;
    let progress = |duration: u64| (elapsed / duration as f32).clamp(0.0, 1.0);
    match transition.phase {
        RowPhase::FadingOut => 1.0 - progress(FADE_OUT_MS),
        RowPhase::Moving => 0.0,
        RowPhase::FadingIn => progress(FADE_IN_MS),
        RowPhase::Restoring => 1.0 - 0.5 * progress(RESTORE_MS),
        RowPhase::Expanding => 0.5 + 0.5 * progress(EXPAND_MS),
        RowPhase::Stable | RowPhase::Completed => 1.0,
    }
}

fn render_row_header(
    ui: &mut egui::Ui,
    state: &ReviewState,
    row: &OrganizedRow<'_>,
    regions: &mut HitRegions,
    interactions: &mut Vec<PanelInteraction>,
) {
    let complete = rows::is_row_complete(row.frames);
    let response = ui.horizontal(|ui| {
        ui.set_min_height(ROW_HEADER_HEIGHT);
        ui.label(egui::RichText::new(format!("Row {}", row.index + 1)).strong());

        if complete {
            let confirmed = row.frames.iter().filter(|f| f.is_confirmed()).count();
            let rejected = row.frames.len() - confirmed;
            ui.label(format!("{} confirmed, {} rejected", confirmed, rejected));
            if ui.button("Restore All").clicked() {
                interactions.push(PanelInteraction::RowRestoreAll(row.index));
            }
            let toggle = if state.lifecycle.is_collapsed(row.index) { "Expand" } else { "Collapse" };
            if ui.button(toggle).clicked() {
                interactions.push(PanelInteraction::RowCollapseToggled(row.index));
            }
            return;
        }

        match rows::row_button(row.frames) {
            RowButton::SelectAll => {
                if ui.button("Select Row").clicked() {
                    interactions.push(PanelInteraction::RowSelectAll(row.index));
                }
            }
            RowButton::DeselectAll => {
                if ui.button("Deselect Row").clicked() {
                    interactions.push(PanelInteraction::RowDeselectAll(row.index));
                }
            }
        }
        if ui.button("Reject Row").clicked() {
            interactions.push(PanelInteraction::RowRejectAll(row.index));
        }

        let current = row.frames.first().map_or(Confidence::Mid, |f| f.confidence);
        let mut chosen = current;
        egui::ComboBox::from_id_salt(("row_zoom", row.index))
            .selected_text(format!("Zoom: {}", chosen.label()))
            .width(90.0)
            .show_ui(ui, |ui| {
                for zoom in Confidence::ALL {
                    ui.selectable_value(&mut chosen, zoom, zoom.label());
                }
            });
        if chosen != current {
            interactions.push(PanelInteraction::RowZoomChanged(row.index, chosen));
        }
    });
    regions.controls.push(response.response.rect);
}

fn card_colors(frame: &Frame) -> (Color32, Color32) {
    match frame.phase {
        Phase::Unprocessed(Selection::Plain) => (Color32::from_gray(40), Color32::from_gray(90)),
        Phase::Unprocessed(Selection::Selected) => (Color32::from_rgb(30, 50, 80), Color32::from_rgb(80, 140, 230)),
        Phase::Unprocessed(Selection::DoubleSelected) => (Color32::from_rgb(40, 40, 90), Color32::from_rgb(150, 110, 240)),
        Phase::MarkedForRejection => (Color32::from_rgb(80, 50, 20), Color32::from_rgb(240, 150, 40)),
        Phase::Confirmed => (Color32::from_rgb(25, 60, 35), Color32::from_rgb(80, 200, 110)),
        Phase::Rejected => (Color32::from_rgb(70, 25, 25), Color32::from_rgb(220, 80, 80)),
    }
}

#[allow(clippy::too_many_arguments)]
fn render_card(
    ui: &mut egui::Ui,
    state: &ReviewState,
    frame: &Frame,
    size: Vec2,
    opacity: f32,
    regions: &mut HitRegions,
    interactions: &mut Vec<PanelInteraction>,
) {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    regions.cards.push((frame.id.clone(), rect));

    let (fill, border) = card_colors(frame);
    let focused = state.view.focused() == Some(&frame.id);
    let candidate = state.drag.is_candidate(&frame.id);
    let painter = ui.painter();

    painter.rect_filled(rect, CornerRadius::same(4), fill.gamma_multiply(opacity));
    let stroke_width = if focused || candidate { 3.0 } else { 1.5 };
    let stroke_color = if candidate { Color32::WHITE } else { border };
    painter.rect_stroke(rect, CornerRadius::same(4), Stroke::new(stroke_width, stroke_color.gamma_multiply(opacity)), StrokeKind::Outside);

    // Detection box in percent of the card
    let b = &frame.detection_box;
    let box_rect = Rect::from_min_size(
        rect.min + Vec2::new(rect.width() * b.x / 100.0, rect.height() * b.y / 100.0),
        Vec2::new(rect.width() * b.width / 100.0, rect.height() * b.height / 100.0),
    );
    let box_color = match b.quality {
        DetectionQuality::Clear => Color32::from_rgb(250, 210, 60),
        DetectionQuality::Unclear => Color32::from_gray(160),
    };
    painter.rect_stroke(box_rect.intersect(rect), CornerRadius::ZERO, Stroke::new(1.5, box_color.gamma_multiply(opacity)), StrokeKind::Inside);

    let text_color = Color32::from_gray(220).gamma_multiply(opacity);
    painter.text(rect.left_top() + Vec2::new(6.0, 4.0), Align2::LEFT_TOP, frame.id.as_str(), FontId::proportional(11.0), text_color);
    let clarity = "*".repeat(frame.clarity_level as usize);
    painter.text(rect.left_bottom() + Vec2::new(6.0, -4.0), Align2::LEFT_BOTTOM, clarity, FontId::proportional(11.0), text_color);

    let caption = frame
        .individual_sponsor
        .as_deref()
        .or_else(|| frame.sponsor_annotations.first().map(String::as_str));
    if let Some(caption) = caption {
        painter.text(rect.center_bottom() + Vec2::new(0.0, -18.0), Align2::CENTER_BOTTOM, caption, FontId::proportional(11.0), text_color);
    }

    // Corner button: reject while open, restore once rejected
    let button_rect = Rect::from_min_size(rect.right_top() + Vec2::new(-26.0, 4.0), Vec2::splat(22.0));
    regions.controls.push(button_rect);
    if frame.is_rejected() {
        if ui.put(button_rect, egui::Button::new("↺").small()).on_hover_text("Restore").clicked() {
            interactions.push(PanelInteraction::FrameRestored(frame.id.clone()));
        }
    } else if frame.is_unprocessed() {
        if ui.put(button_rect, egui::Button::new("✕").small()).on_hover_text("Reject").clicked() {
            interactions.push(PanelInteraction::FrameRejected(frame.id.clone()));
        }
    }

    if response.clicked() {
        interactions.push(PanelInteraction::FrameClicked(frame.id.clone()));
    }
    response.context_menu(|ui| {
        for zoom in Confidence::ALL {
            if ui.selectable_label(frame.confidence == zoom, format!("Zoom: {}", zoom.label())).clicked() {
                interactions.push(PanelInteraction::FrameZoomChanged(frame.id.clone(), zoom));
                ui.close();
            }
        }
    });
}

/// Feeds raw pointer state to the drag engine.
fn handle_drag_input(
    ui: &egui::Ui,
    state: &ReviewState,
    grid_rect: Rect,
    regions: &HitRegions,
    interactions: &mut Vec<PanelInteraction>,
) {
    let (pressed, released, pos, shift, moved) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
            i.modifiers.shift,
            i.pointer.delta() != Vec2::ZERO,
        )
    });

    if pressed {
        if let Some(pos) = pos.filter(|p| grid_rect.contains(*p)) {
            let target = regions.target_at(pos);
            interactions.push(PanelInteraction::DragStarted { pos, shift, target });
        }
    } else if state.drag.is_dragging() {
        if let Some(pos) = pos.filter(|_| moved) {
            interactions.push(PanelInteraction::DragMoved { pos, bounds: regions.cards.clone() });
        }
        if released {
            interactions.push(PanelInteraction::DragReleased);
        }
    }
}
