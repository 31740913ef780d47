//! Label choices: quick labels, the batch-wide label and recent sponsors.

use crate::catalog::{self, Label, SelectedPlacement};
use crate::settings::LabelMode;

/// Maximum length of the recently-used sponsor list.
pub const RECENT_SPONSOR_LIMIT: usize = 10;

/// The label applied by a batch confirm to frames without their own label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchLabel {
    Placement(SelectedPlacement),
    Sponsor(Label),
}

impl BatchLabel {
    /// String committed to annotations.
    pub fn display_name(&self) -> String {
        match self {
            BatchLabel::Placement(placement) => placement.display_name(),
            BatchLabel::Sponsor(label) => label.name.clone(),
        }
    }
}

/// Label state for the current session.
///
/// In placement mode the quick labels are the placement types of the
/// placement last chosen; in sponsor mode they are the recently used sponsors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelState {
    mode: LabelMode,
    batch_label: Option<BatchLabel>,
    recent_sponsors: Vec<Label>,
}

impl LabelState {
    /// Creates label state for `mode`.
    ///
    /// Placement mode starts with the configured placement chosen as the
    /// batch label; sponsor mode starts with the auto-populated sponsors as
    /// quick labels and no batch label.
    pub fn new(mode: LabelMode) -> Self {
        let batch_label = match &mode {
            LabelMode::Placement(placement) => Some(BatchLabel::Placement(placement.clone())),
            LabelMode::Sponsor => None,
        };
        let recent_sponsors = catalog::auto_populated_sponsors().iter().map(|s| s.label()).collect();
        Self { mode, batch_label, recent_sponsors }
    }

    pub fn mode(&self) -> &LabelMode {
        &self.mode
    }

    pub fn batch_label(&self) -> Option<&BatchLabel> {
        self.batch_label.as_ref()
    }

    pub fn batch_label_name(&self) -> Option<String> {
        self.batch_label.as_ref().map(BatchLabel::display_name)
    }

    /// Labels reachable through the digit keys, in key order.
    pub fn quick_labels(&self) -> Vec<Label> {
        match &self.mode {
            LabelMode::Placement(placement) => {
                catalog::placement_types_for(&placement.rightsholder, &placement.placement)
                    .iter()
                    .map(|t| t.label())
                    .collect()
            }
            LabelMode::Sponsor => self.recent_sponsors.clone(),
        }
    }

    /// Quick label bound to digit `index`, if any.
    pub fn quick_label(&self, index: usize) -> Option<Label> {
        self.quick_labels().into_iter().nth(index)
    }

    pub fn recent_sponsors(&self) -> &[Label] {
        &self.recent_sponsors
    }

    // ===== Mutations =====

    /// Chooses a placement as the batch label and switches quick labels to its types.
    pub fn choose_placement(&mut self, placement: SelectedPlacement) {
        self.mode = LabelMode::Placement(placement.clone());
        self.batch_label = Some(BatchLabel::Placement(placement));
    }

    /// Chooses a sponsor as the batch label and records it as recently used.
    pub fn choose_sponsor(&mut self, sponsor: Label) {
        self.note_sponsor_used(&sponsor);
        self.batch_label = Some(BatchLabel::Sponsor(sponsor));
    }

    pub fn clear_batch_label(&mut self) {
        self.batch_label = None;
    }

    /// Moves `sponsor` to the front of the recent list, keeping it bounded.
    pub fn note_sponsor_used(&mut self, sponsor: &Label) {
        if !matches!(self.mode, LabelMode::Sponsor) {
            return;
        }
        self.recent_sponsors.retain(|existing| existing.id != sponsor.id);
        self.recent_sponsors.insert(0, sponsor.clone());
        self.recent_sponsors.truncate(RECENT_SPONSOR_LIMIT);
    }
}
