use std::io::{Cursor, Write};

use image::{GrayImage, RgbImage};
use tiff::encoder::{Compression, TiffEncoder, colortype, compression::DeflateLevel};
use tracing::debug;

use crate::tracking_pipeline::common::error::{Result, TrackerError};
use crate::tracking_pipeline::tiff::types::TiffCompression;
use crate::tracking_pipeline::tiff::writer::TiffWriter;

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTiffWriter {
    pub compression: TiffCompression,
}

impl StandardTiffWriter {
    pub fn new(compression: TiffCompression) -> Self {
        Self { compression }
    }

    fn encoder<'a>(&self, buffer: &'a mut Vec<u8>) -> Result<TiffEncoder<Cursor<&'a mut Vec<u8>>>> {
        let compression = match self.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        Ok(TiffEncoder::new(Cursor::new(buffer))
            .map_err(|e| TrackerError::EncodeError(e.to_string()))?
            .with_compression(compression))
    }
}

impl TiffWriter for StandardTiffWriter {
    fn write_gray(&self, image: &GrayImage, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding grayscale TIFF: {}x{}", image.width(), image.height());

        let mut buffer = Vec::new();
        self.encoder(&mut buffer)?
            .write_image::<colortype::Gray8>(image.width(), image.height(), image.as_raw())
            .map_err(|e| TrackerError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;
        Ok(())
    }

    fn write_rgb(&self, image: &RgbImage, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding RGB TIFF: {}x{}", image.width(), image.height());

        let mut buffer = Vec::new();
        self.encoder(&mut buffer)?
            .write_image::<colortype::RGB8>(image.width(), image.height(), image.as_raw())
            .map_err(|e| TrackerError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;
        Ok(())
    }
}
