use image::GrayImage;
use tracing::debug;

use crate::tracking_pipeline::common::error::{Result, TrackerError};

/// The empty-scene reference frame subtracted from every tracked frame.
///
/// Captured once per session; read-only afterwards.
#[derive(Debug, Default)]
pub struct BackgroundModel {
    baseline: Option<GrayImage>,
}

impl BackgroundModel {
    pub fn new() -> Self {
        Self { baseline: None }
    }

    pub fn capture(&mut self, frame: GrayImage) {
        debug!(width = frame.width(), height = frame.height(), "Background baseline captured");
        self.baseline = Some(frame);
    }

    pub fn get(&self) -> Result<&GrayImage> {
        self.baseline.as_ref().ok_or(TrackerError::MissingBaseline)
    }

    pub fn is_captured(&self) -> bool {
        self.baseline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_get_before_capture_is_a_usage_error() {
        let model = BackgroundModel::new();
        assert!(matches!(model.get(), Err(TrackerError::MissingBaseline)));
        assert!(!model.is_captured());
    }

    #[test]
    fn test_captured_baseline_is_returned() {
        let mut model = BackgroundModel::new();
        model.capture(GrayImage::from_pixel(4, 3, Luma([17])));
        let baseline = model.get().unwrap();
        assert_eq!(baseline.dimensions(), (4, 3));
        assert!(baseline.pixels().all(|p| p.0[0] == 17));
    }
}
