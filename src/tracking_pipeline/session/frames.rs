use std::fs::File;
use std::path::{Path, PathBuf};

use image::{GrayImage, RgbImage};
use tracing::debug;

use crate::tracking_pipeline::common::error::{Result, TrackerError};
use crate::tracking_pipeline::tiff::{StandardTiffWriter, TiffCompression, TiffWriter};

/// A frame leaving the pipeline for display or recording.
#[derive(Debug, Clone)]
pub enum OutputFrame {
    /// Raw mode: the converted grayscale frame, untouched.
    Raw(GrayImage),
    /// Tracking mode: the mask with the position marker drawn on it.
    Annotated(RgbImage),
}

impl OutputFrame {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            OutputFrame::Raw(image) => image.dimensions(),
            OutputFrame::Annotated(image) => image.dimensions(),
        }
    }
}

pub trait FrameSink {
    fn write_frame(&mut self, frame: &OutputFrame) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Discards every frame.
#[derive(Debug, Default)]
pub struct NullFrameSink;

impl FrameSink for NullFrameSink {
    fn write_frame(&mut self, _frame: &OutputFrame) -> Result<()> {
        Ok(())
    }
}

/// Writes each frame as `frame_NNNNNN.tiff` into a directory.
pub struct TiffFrameSink {
    dir: PathBuf,
    writer: StandardTiffWriter,
    next_index: u64,
}

impl TiffFrameSink {
    pub fn create<P: AsRef<Path>>(dir: P, compression: TiffCompression, overwrite: bool) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .map_err(|e| TrackerError::OutputWriteError(format!("{}: {}", dir.display(), e)))?;

        let sink = Self {
            dir,
            writer: StandardTiffWriter::new(compression),
            next_index: 0,
        };
        let first = sink.frame_path(0);
        if !overwrite && first.exists() {
            return Err(TrackerError::OutputWriteError(format!(
                "{}: already exists",
                first.display()
            )));
        }
        Ok(sink)
    }

    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("frame_{:06}.tiff", index))
    }

    pub fn frames_written(&self) -> u64 {
        self.next_index
    }
}

impl FrameSink for TiffFrameSink {
    fn write_frame(&mut self, frame: &OutputFrame) -> Result<()> {
        let path = self.frame_path(self.next_index);
        let mut file = File::create(&path)
            .map_err(|e| TrackerError::OutputWriteError(format!("{}: {}", path.display(), e)))?;

        match frame {
            OutputFrame::Raw(image) => self.writer.write_gray(image, &mut file)?,
            OutputFrame::Annotated(image) => self.writer.write_rgb(image, &mut file)?,
        }

        debug!(path = %path.display(), "Frame written");
        self.next_index += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking_pipeline::tiff::read_gray_tiff;
    use image::{Luma, Rgb};

    #[test]
    fn test_frames_are_numbered_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = TiffFrameSink::create(dir.path(), TiffCompression::None, false).unwrap();

        let raw = GrayImage::from_pixel(16, 8, Luma([42]));
        sink.write_frame(&OutputFrame::Raw(raw.clone())).unwrap();
        sink.write_frame(&OutputFrame::Annotated(RgbImage::from_pixel(16, 8, Rgb([1, 2, 3]))))
            .unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.frames_written(), 2);
        let first = std::fs::read(dir.path().join("frame_000000.tiff")).unwrap();
        assert_eq!(read_gray_tiff(&first).unwrap().as_raw(), raw.as_raw());
        assert!(dir.path().join("frame_000001.tiff").exists());
    }

    #[test]
    fn test_existing_frames_are_not_replaced_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("frame_000000.tiff"), b"old").unwrap();

        assert!(TiffFrameSink::create(dir.path(), TiffCompression::None, false).is_err());
        assert!(TiffFrameSink::create(dir.path(), TiffCompression::None, true).is_ok());
    }
}
