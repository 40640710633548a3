use image::RgbImage;

/// Sub-pixel location in mask coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Nearest pixel column and row; negative coordinates clamp to 0.
    ///
    /// Rounds rather than truncates, so a centre at 99.6 reports column 100.
    pub fn to_pixel(self) -> (u32, u32) {
        (self.x.round().max(0.0) as u32, self.y.round().max(0.0) as u32)
    }
}

/// Minimal enclosing circle of one contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Position,
    pub radius: f32,
}

/// The only state carried from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackState {
    pub last_position: Position,
}

/// Result of locating the dominant blob in one mask.
#[derive(Debug, Clone)]
pub struct Location {
    /// The mask in RGB with the marker drawn at `position`.
    pub annotated: RgbImage,
    pub position: Position,
    /// The qualifying blob, or `None` when `position` fell back to the last known one.
    pub blob: Option<Circle>,
    /// State to hand to the next call.
    pub state: TrackState,
}
