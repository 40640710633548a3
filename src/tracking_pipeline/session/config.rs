//! Tracking session configuration types

use std::time::Duration;

use crate::tracking_pipeline::common::error::{Result, TrackerError};
use crate::tracking_pipeline::preprocess::{DepthWindow, Region};
use crate::tracking_pipeline::source::SourceKind;

impl SourceKind {
    /// Part of the sensor's field of view that covers the tracking arena.
    pub fn default_crop(self) -> Region {
        match self {
            SourceKind::Color => Region::from_corners(400, 240, 1710, 850),
            SourceKind::Depth => Region::from_corners(45, 40, 475, 250),
        }
    }
}

/// Configuration for a tracking session
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Sensor stream to track in
    pub source: SourceKind,
    /// Skip background subtraction and tracking; emit grayscale frames only
    pub raw_mode: bool,
    /// Box blur kernel applied to each frame (and to the captured baseline)
    pub blur_size: u32,
    /// Box blur kernel applied to the background difference before thresholding
    pub mask_smoothing: u32,
    /// Difference values strictly above this become foreground
    pub threshold: u8,
    /// Blobs must have a fitted radius strictly above this to be tracked
    pub minimum_radius: f32,
    /// How long one acquisition may block before the session is aborted
    pub acquire_timeout: Duration,
    /// Pause between polls while the sensor has nothing new
    pub poll_interval: Duration,
    /// Depth intensity window
    pub depth_window: DepthWindow,
    /// Region of interest; `None` processes the full frame
    pub crop: Option<Region>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Depth,
            raw_mode: false,
            blur_size: 15,
            mask_smoothing: 1,
            threshold: 30,
            minimum_radius: 6.0,
            acquire_timeout: Duration::from_millis(5000),
            poll_interval: Duration::from_millis(1),
            depth_window: DepthWindow::default(),
            crop: Some(SourceKind::Depth.default_crop()),
        }
    }
}

impl TrackerConfig {
    pub fn builder() -> TrackerConfigBuilder {
        TrackerConfigBuilder::default()
    }

    /// Width and height of the frames handed to preprocessing after cropping.
    pub fn frame_dimensions(&self) -> (u32, u32) {
        match self.crop {
            Some(region) => (region.width, region.height),
            None => (self.source.width() as u32, self.source.height() as u32),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, kernel) in [("blur_size", self.blur_size), ("mask_smoothing", self.mask_smoothing)] {
            if kernel == 0 || kernel % 2 == 0 {
                return Err(TrackerError::InvalidConfig(format!(
                    "{} must be an odd kernel size >= 1, got {}",
                    name, kernel
                )));
            }
        }

        if self.depth_window.range_delta == 0 || self.depth_window.range_delta > DepthWindow::MAX_DELTA {
            return Err(TrackerError::InvalidConfig(format!(
                "depth window width must be within 1..={}, got {}",
                DepthWindow::MAX_DELTA,
                self.depth_window.range_delta
            )));
        }

        if !self.minimum_radius.is_finite() {
            return Err(TrackerError::InvalidConfig(format!(
                "minimum_radius must be finite, got {}",
                self.minimum_radius
            )));
        }

        if self.acquire_timeout.is_zero() {
            return Err(TrackerError::InvalidConfig("acquire_timeout must be positive".to_string()));
        }

        if let Some(region) = self.crop {
            let (width, height) = (self.source.width() as u32, self.source.height() as u32);
            if !region.fits_within(width, height) {
                return Err(TrackerError::InvalidConfig(format!(
                    "crop {:?} does not fit the {}x{} {} frame",
                    region, width, height, self.source
                )));
            }
        }

        Ok(())
    }
}

/// Builder for TrackerConfig
#[derive(Default)]
pub struct TrackerConfigBuilder {
    source: Option<SourceKind>,
    raw_mode: Option<bool>,
    blur_size: Option<u32>,
    mask_smoothing: Option<u32>,
    threshold: Option<u8>,
    minimum_radius: Option<f32>,
    acquire_timeout: Option<Duration>,
    poll_interval: Option<Duration>,
    depth_window: Option<DepthWindow>,
    crop: Option<Option<Region>>,
}

impl TrackerConfigBuilder {
    pub fn source(mut self, source: SourceKind) -> Self {
        self.source = Some(source);
        self
    }

    pub fn raw_mode(mut self, enable: bool) -> Self {
        self.raw_mode = Some(enable);
        self
    }

    pub fn blur_size(mut self, size: u32) -> Self {
        self.blur_size = Some(size);
        self
    }

    pub fn mask_smoothing(mut self, size: u32) -> Self {
        self.mask_smoothing = Some(size);
        self
    }

    pub fn threshold(mut self, value: u8) -> Self {
        self.threshold = Some(value);
        self
    }

    pub fn minimum_radius(mut self, radius: f32) -> Self {
        self.minimum_radius = Some(radius);
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = Some(timeout);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn depth_window(mut self, window: DepthWindow) -> Self {
        self.depth_window = Some(window);
        self
    }

    /// Overrides the source's default region of interest. `None` keeps the full frame.
    pub fn crop(mut self, crop: Option<Region>) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn build(self) -> TrackerConfig {
        let default = TrackerConfig::default();
        let source = self.source.unwrap_or(default.source);
        TrackerConfig {
            source,
            raw_mode: self.raw_mode.unwrap_or(default.raw_mode),
            blur_size: self.blur_size.unwrap_or(default.blur_size),
            mask_smoothing: self.mask_smoothing.unwrap_or(default.mask_smoothing),
            threshold: self.threshold.unwrap_or(default.threshold),
            minimum_radius: self.minimum_radius.unwrap_or(default.minimum_radius),
            acquire_timeout: self.acquire_timeout.unwrap_or(default.acquire_timeout),
            poll_interval: self.poll_interval.unwrap_or(default.poll_interval),
            depth_window: self.depth_window.unwrap_or(default.depth_window),
            crop: self.crop.unwrap_or(Some(source.default_crop())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = TrackerConfig::builder()
            .source(SourceKind::Color)
            .raw_mode(true)
            .blur_size(7)
            .threshold(42)
            .minimum_radius(10.0)
            .acquire_timeout(Duration::from_millis(250))
            .build();

        assert_eq!(config.source, SourceKind::Color);
        assert!(config.raw_mode);
        assert_eq!(config.blur_size, 7);
        assert_eq!(config.threshold, 42);
        assert_eq!(config.minimum_radius, 10.0);
        assert_eq!(config.acquire_timeout, Duration::from_millis(250));
        assert_eq!(config.mask_smoothing, 1);
        assert_eq!(config.crop, Some(SourceKind::Color.default_crop()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = TrackerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.frame_dimensions(), (430, 210));
    }

    #[test]
    fn test_full_frame_dimensions() {
        let config = TrackerConfig::builder().source(SourceKind::Color).crop(None).build();
        assert_eq!(config.frame_dimensions(), (1920, 1080));
    }

    #[test]
    fn test_even_kernel_is_rejected() {
        let config = TrackerConfig::builder().blur_size(8).build();
        assert!(matches!(config.validate(), Err(TrackerError::InvalidConfig(_))));

        let config = TrackerConfig::builder().mask_smoothing(0).build();
        assert!(matches!(config.validate(), Err(TrackerError::InvalidConfig(_))));
    }

    #[test]
    fn test_window_wider_than_a_byte_is_rejected() {
        let config = TrackerConfig::builder()
            .depth_window(DepthWindow::new(600, 300))
            .build();
        assert!(matches!(config.validate(), Err(TrackerError::InvalidConfig(_))));

        let config = TrackerConfig::builder()
            .depth_window(DepthWindow::new(600, 256))
            .build();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_crop_outside_the_sensor_is_rejected() {
        // The color region does not fit a depth frame.
        let config = TrackerConfig::builder()
            .source(SourceKind::Depth)
            .crop(Some(SourceKind::Color.default_crop()))
            .build();
        assert!(matches!(config.validate(), Err(TrackerError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = TrackerConfig::builder().acquire_timeout(Duration::ZERO).build();
        assert!(matches!(config.validate(), Err(TrackerError::InvalidConfig(_))));
    }
}
