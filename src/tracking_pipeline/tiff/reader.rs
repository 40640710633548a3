use std::io::Cursor;

use image::GrayImage;
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::tracking_pipeline::common::error::{Result, TrackerError};

/// Decodes an 8-bit single-channel TIFF.
pub fn read_gray_tiff(data: &[u8]) -> Result<GrayImage> {
    let decode_err = |e: tiff::TiffError| TrackerError::DecodeError(e.to_string());

    let mut decoder = Decoder::new(Cursor::new(data)).map_err(decode_err)?;
    let (width, height) = decoder.dimensions().map_err(decode_err)?;
    let color_type = decoder.colortype().map_err(decode_err)?;
    if color_type != ColorType::Gray(8) {
        return Err(TrackerError::DecodeError(format!(
            "expected 8-bit grayscale, found {:?}",
            color_type
        )));
    }

    debug!("Decoding grayscale TIFF: {}x{}", width, height);
    let pixels = match decoder.read_image().map_err(decode_err)? {
        DecodingResult::U8(pixels) => pixels,
        _ => return Err(TrackerError::DecodeError("unexpected sample format".to_string())),
    };

    GrayImage::from_raw(width, height, pixels)
        .ok_or(TrackerError::InvalidDimensions(width as usize, height as usize))
}
