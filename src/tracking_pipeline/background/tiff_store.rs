use std::path::{Path, PathBuf};

use image::GrayImage;
use tracing::{info, instrument};

use crate::tracking_pipeline::background::store::BaselineStore;
use crate::tracking_pipeline::common::error::{Result, TrackerError};
use crate::tracking_pipeline::tiff::{StandardTiffWriter, TiffCompression, TiffWriter, read_gray_tiff};

/// Keeps the baseline as an 8-bit grayscale TIFF side file.
pub struct TiffBaselineStore {
    path: PathBuf,
    writer: StandardTiffWriter,
}

impl TiffBaselineStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer: StandardTiffWriter::new(TiffCompression::Lzw),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BaselineStore for TiffBaselineStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<GrayImage>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = std::fs::read(&self.path).map_err(|e| {
            TrackerError::InputReadError(format!("{}: {}", self.path.display(), e))
        })?;
        let baseline = read_gray_tiff(&data)?;

        info!(
            width = baseline.width(),
            height = baseline.height(),
            "Loaded background baseline"
        );
        Ok(Some(baseline))
    }

    #[instrument(skip(self, baseline), fields(path = %self.path.display()))]
    fn save(&self, baseline: &GrayImage) -> Result<()> {
        let mut file = std::fs::File::create(&self.path).map_err(|e| {
            TrackerError::OutputWriteError(format!("{}: {}", self.path.display(), e))
        })?;
        self.writer.write_gray(baseline, &mut file)?;

        info!("Saved background baseline");
        Ok(())
    }
}
