//! Background-relative foreground extraction.

use image::GrayImage;
use imageproc::contrast::{ThresholdType, threshold};
use imageproc::filter::box_filter;

/// Value of "on" pixels in a foreground mask.
pub const MASK_ON: u8 = 255;

/// Box blur with a `kernel_size` × `kernel_size` square kernel.
///
/// `kernel_size` is odd; 1 (or 0) leaves the frame untouched. Larger kernels trade
/// localisation for noise robustness.
pub fn smooth(frame: &GrayImage, kernel_size: u32) -> GrayImage {
    if kernel_size <= 1 {
        return frame.clone();
    }
    let radius = kernel_size / 2;
    box_filter(frame, radius, radius)
}

/// `|frame - background|`, smoothed, then binarised: strictly above `threshold_value`
/// becomes [`MASK_ON`], at or below becomes 0.
///
/// Both images share the sensor geometry; the caller guarantees it.
pub fn foreground_mask(
    frame: &GrayImage,
    background: &GrayImage,
    kernel_size: u32,
    threshold_value: u8,
) -> GrayImage {
    debug_assert_eq!(frame.dimensions(), background.dimensions());

    let mut diff = frame.clone();
    for (out, bg) in diff.pixels_mut().zip(background.pixels()) {
        out.0[0] = out.0[0].abs_diff(bg.0[0]);
    }

    threshold(&smooth(&diff, kernel_size), threshold_value, ThresholdType::Binary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn flat(value: u8) -> GrayImage {
        GrayImage::from_pixel(64, 48, Luma([value]))
    }

    #[test]
    fn test_unit_kernel_is_identity() {
        let frame = GrayImage::from_fn(64, 48, |x, y| Luma([(x * 3 + y) as u8]));
        assert_eq!(smooth(&frame, 1).as_raw(), frame.as_raw());
    }

    #[test]
    fn test_smoothing_a_flat_frame_keeps_it_flat() {
        let smoothed = smooth(&flat(90), 7);
        assert!(smoothed.pixels().all(|p| p.0[0] == 90));
    }

    #[test]
    fn test_threshold_is_strict() {
        let bg = flat(100);
        assert!(foreground_mask(&flat(130), &bg, 1, 30).pixels().all(|p| p.0[0] == 0));
        assert!(foreground_mask(&flat(131), &bg, 1, 30).pixels().all(|p| p.0[0] == MASK_ON));
    }

    #[test]
    fn test_difference_is_absolute() {
        let bg = flat(100);
        assert!(foreground_mask(&flat(60), &bg, 1, 30).pixels().all(|p| p.0[0] == MASK_ON));
        assert!(foreground_mask(&flat(140), &bg, 1, 30).pixels().all(|p| p.0[0] == MASK_ON));
    }

    #[test]
    fn test_mask_is_idempotent() {
        let frame = GrayImage::from_fn(64, 48, |x, y| Luma([((x * 7 + y * 13) % 256) as u8]));
        let bg = GrayImage::from_fn(64, 48, |x, _| Luma([(x * 2) as u8]));

        let a = foreground_mask(&frame, &bg, 5, 30);
        let b = foreground_mask(&frame, &bg, 5, 30);
        assert_eq!(a.as_raw(), b.as_raw());
        assert!(a.pixels().all(|p| p.0[0] == 0 || p.0[0] == MASK_ON));
    }

    #[test]
    fn test_isolated_speck_is_smoothed_away() {
        let bg = flat(0);
        let mut frame = flat(0);
        frame.put_pixel(20, 20, Luma([200]));

        let sharp = foreground_mask(&frame, &bg, 1, 30);
        assert_eq!(sharp.get_pixel(20, 20).0[0], MASK_ON);

        // 200 / 49 stays well under the threshold.
        let blurred = foreground_mask(&frame, &bg, 7, 30);
        assert!(blurred.pixels().all(|p| p.0[0] == 0));
    }
}
