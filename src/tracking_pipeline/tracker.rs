//! Blob tracking module
//!
//! Finds the dominant blob in a foreground mask and carries the last known position
//! from frame to frame through an explicit [`TrackState`].

mod blob_tracker;
mod circle;
pub mod types;


pub use blob_tracker::{
    MARKER_COLOR, MARKER_RADIUS, MARKER_THICKNESS, POLYGON_TOLERANCE, annotate, blob_circles,
    locate, select_blob,
};
pub use circle::enclosing_circle;
pub use types::{Circle, Location, Position, TrackState};
