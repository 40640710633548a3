/// Depth values inside `[range_min, range_min + range_delta)` map to
/// `depth - range_min`; everything else maps to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthWindow {
    pub range_min: u16,
    pub range_delta: u16,
}

impl DepthWindow {
    /// Widest window that still fits an 8-bit intensity.
    pub const MAX_DELTA: u16 = 256;

    pub fn new(range_min: u16, range_delta: u16) -> Self {
        Self {
            range_min,
            range_delta,
        }
    }

    pub fn intensity(&self, depth: u16) -> u8 {
        let offset = depth.wrapping_sub(self.range_min);
        if depth >= self.range_min && offset < self.range_delta {
            offset as u8
        } else {
            0
        }
    }
}

impl Default for DepthWindow {
    fn default() -> Self {
        Self {
            range_min: 650,
            range_delta: 135,
        }
    }
}

/// Axis-aligned region of interest in sensor pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region spanning the corners `(x0, y0)` (inclusive) to `(x1, y1)` (exclusive).
    pub fn from_corners(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.checked_add(self.width).is_some_and(|right| right <= width)
            && self.y.checked_add(self.height).is_some_and(|bottom| bottom <= height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_edges() {
        let window = DepthWindow::new(600, 255);
        assert_eq!(window.intensity(599), 0);
        assert_eq!(window.intensity(600), 0);
        assert_eq!(window.intensity(601), 1);
        assert_eq!(window.intensity(854), 254);
        assert_eq!(window.intensity(855), 0);
        assert_eq!(window.intensity(0), 0);
        assert_eq!(window.intensity(u16::MAX), 0);
    }

    #[test]
    fn test_full_width_window_reaches_255() {
        let window = DepthWindow::new(1000, DepthWindow::MAX_DELTA);
        assert_eq!(window.intensity(1255), 255);
        assert_eq!(window.intensity(1256), 0);
    }

    #[test]
    fn test_region_bounds() {
        let region = Region::from_corners(45, 40, 475, 250);
        assert_eq!(region, Region::new(45, 40, 430, 210));
        assert!(region.fits_within(512, 424));
        assert!(!Region::new(500, 0, 20, 10).fits_within(512, 424));
        assert!(!Region::new(0, 0, 0, 10).fits_within(512, 424));
    }
}
