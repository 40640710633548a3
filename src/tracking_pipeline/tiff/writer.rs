use std::io::Write;

use image::{GrayImage, RgbImage};

use crate::tracking_pipeline::common::error::Result;

pub trait TiffWriter {
    fn write_gray(&self, image: &GrayImage, output: &mut dyn Write) -> Result<()>;
    fn write_rgb(&self, image: &RgbImage, output: &mut dyn Write) -> Result<()>;
}
