//! Raw sensor buffer to 8-bit grayscale conversion.

use image::{GrayImage, Luma, imageops};

use crate::tracking_pipeline::preprocess::types::{DepthWindow, Region};
use crate::tracking_pipeline::source::types::{
    COLOR_BYTES_PER_PIXEL, COLOR_HEIGHT, COLOR_WIDTH, DEPTH_HEIGHT, DEPTH_WIDTH, FrameSamples,
    RawFrame,
};

// BT.601 limited-range YUV -> RGB, 20-bit fixed point.
const YUV_SHIFT: u32 = 20;
const YUV_ROUND: i32 = 1 << (YUV_SHIFT - 1);
const Y_GAIN: i32 = 1_220_542;
const U_TO_B: i32 = 2_116_026;
const V_TO_R: i32 = 1_673_527;

// RGB -> luma, 14-bit fixed point. The green weight is unused because the green
// plane is dropped before reduction.
const GRAY_SHIFT: u32 = 14;
const GRAY_ROUND: i32 = 1 << (GRAY_SHIFT - 1);
const R_TO_GRAY: i32 = 4899;
const B_TO_GRAY: i32 = 1868;

/// Converts a raw sub-frame to grayscale.
///
/// Depth frames go through `window`; color frames ignore it. The conversion is pure:
/// identical buffers always produce identical images.
pub fn to_grayscale(frame: &RawFrame, window: DepthWindow) -> GrayImage {
    match frame.samples() {
        FrameSamples::Depth(samples) => depth_to_grayscale(samples, window),
        FrameSamples::Color(yuyv) => color_to_grayscale(yuyv),
    }
}

fn depth_to_grayscale(samples: &[u16], window: DepthWindow) -> GrayImage {
    GrayImage::from_fn(DEPTH_WIDTH as u32, DEPTH_HEIGHT as u32, |x, y| {
        let idx = y as usize * DEPTH_WIDTH + x as usize;
        Luma([window.intensity(samples[idx])])
    })
}

/// YUYV -> BGR, zero the green plane, then BGR -> gray.
fn color_to_grayscale(yuyv: &[u8]) -> GrayImage {
    GrayImage::from_fn(COLOR_WIDTH as u32, COLOR_HEIGHT as u32, |x, y| {
        // Each 4-byte macropixel is Y0 U Y1 V and covers two horizontal pixels.
        let pair = (y as usize * COLOR_WIDTH + (x as usize & !1)) * COLOR_BYTES_PER_PIXEL;
        let luma = yuyv[pair + (x as usize & 1) * 2];
        let u = yuyv[pair + 1];
        let v = yuyv[pair + 3];
        Luma([yuv_to_red_blue_gray(luma, u, v)])
    })
}

fn yuv_to_red_blue_gray(luma: u8, u: u8, v: u8) -> u8 {
    let y = (i32::from(luma) - 16).max(0) * Y_GAIN;
    let u = i32::from(u) - 128;
    let v = i32::from(v) - 128;

    let red = saturate((y + YUV_ROUND + V_TO_R * v) >> YUV_SHIFT);
    let blue = saturate((y + YUV_ROUND + U_TO_B * u) >> YUV_SHIFT);

    saturate((red * R_TO_GRAY + blue * B_TO_GRAY + GRAY_ROUND) >> GRAY_SHIFT) as u8
}

fn saturate(value: i32) -> i32 {
    value.clamp(0, 255)
}

/// Copies `region` out of `frame`. The region must lie inside the frame.
pub fn crop(frame: &GrayImage, region: Region) -> GrayImage {
    imageops::crop_imm(frame, region.x, region.y, region.width, region.height).to_image()
}
