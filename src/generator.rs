//! Mock batch generator.
//!
//! Produces deterministic batches of frames for the review grid. Images and
//! detection boxes cycle through the static pools in [`crate::catalog`];
//! clarity levels come from an RNG seeded by the batch number so the same
//! batch always looks the same.

use crate::catalog::{DETECTION_BOXES, FRAME_IMAGES};
use crate::frame::{Confidence, Frame, FrameId, Phase};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of frames in every generated batch.
pub const BATCH_SIZE: usize = 20;

/// Generator for batches of mock frames.
#[derive(Debug, Clone)]
pub struct BatchGenerator {
    batch_size: usize,
    seed: u64,
}

impl Default for BatchGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchGenerator {
    pub fn new() -> Self {
        Self { batch_size: BATCH_SIZE, seed: 42 }
    }

    pub fn with_config(batch_size: usize, seed: u64) -> Self {
        Self { batch_size, seed }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Generates batch `batch`.
    ///
    /// # Arguments
    /// * `batch` - Batch number, used for ids and pool offsets
    /// * `default_zoom` - Confidence assigned to every frame
    ///
    /// # Returns
    /// Frames in display order, all starting selected
    pub fn generate(&self, batch: u32, default_zoom: Confidence) -> Vec<Frame> {
        let mut rng = StdRng::seed_from_u64(self.seed ^ u64::from(batch));

        (0..self.batch_size)
            .map(|i| {
                let offset = batch as usize * self.batch_size + i;
                let detection_box = DETECTION_BOXES[offset % DETECTION_BOXES.len()];
                let image_url = FRAME_IMAGES[offset % FRAME_IMAGES.len()].clone();
                let clarity = rng.gen_range(1..=5);

                Frame::new(FrameId::for_batch(batch, i), image_url, detection_box, clarity)
                    .with_phase(Phase::SELECTED)
                    .with_confidence(default_zoom)
            })
            .collect()
    }
}

/// Generates a standard 20-frame batch.
pub fn generate_frames(batch: u32, default_zoom: Confidence) -> Vec<Frame> {
    BatchGenerator::new().generate(batch, default_zoom)
}
