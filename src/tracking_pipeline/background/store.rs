use image::GrayImage;

use crate::tracking_pipeline::common::error::Result;

/// Persistence for the background baseline, so a session can skip recapture.
pub trait BaselineStore {
    /// `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> Result<Option<GrayImage>>;
    fn save(&self, baseline: &GrayImage) -> Result<()>;
}
