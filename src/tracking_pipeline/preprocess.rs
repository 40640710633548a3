//! Preprocessing module
//!
//! Turns raw sensor buffers into calibrated grayscale frames and grayscale frames into
//! binary foreground masks.

mod grayscale;
mod mask;
pub mod types;

pub use grayscale::{crop, to_grayscale};
pub use mask::{MASK_ON, foreground_mask, smooth};
pub use types::{DepthWindow, Region};
