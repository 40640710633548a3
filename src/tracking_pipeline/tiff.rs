//! TIFF encoding and decoding module
//!
//! Used for the persisted background baseline and for frame dumps.

mod reader;
mod standard_tiff_writer;
pub mod types;
mod writer;

pub use reader::read_gray_tiff;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::TiffCompression;
pub use writer::TiffWriter;

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use std::io::Cursor;

    use crate::tracking_pipeline::common::error::TrackerError;

    fn gradient() -> GrayImage {
        GrayImage::from_fn(40, 30, |x, y| Luma([(x * 6 + y) as u8]))
    }

    #[test]
    fn test_gray_tiff_survives_every_compression() {
        let image = gradient();
        for compression in [
            TiffCompression::None,
            TiffCompression::Lzw,
            TiffCompression::DeflateFast,
            TiffCompression::DeflateBest,
        ] {
            let mut output = Cursor::new(Vec::new());
            StandardTiffWriter::new(compression)
                .write_gray(&image, &mut output)
                .unwrap();

            let decoded = read_gray_tiff(output.get_ref()).unwrap();
            assert_eq!(decoded.as_raw(), image.as_raw(), "{:?}", compression);
        }
    }

    #[test]
    fn test_rgb_tiff_is_not_read_as_gray() {
        let image = RgbImage::from_pixel(8, 8, Rgb([255, 0, 0]));
        let mut output = Cursor::new(Vec::new());
        StandardTiffWriter::default().write_rgb(&image, &mut output).unwrap();

        let err = read_gray_tiff(output.get_ref()).unwrap_err();
        assert!(matches!(err, TrackerError::DecodeError(_)));
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let err = read_gray_tiff(b"definitely not a tiff").unwrap_err();
        assert!(matches!(err, TrackerError::DecodeError(_)));
    }
}
