//! Frame acquisition module
//!
//! Wraps a polling sensor with deadline-bounded acquisition and copies sub-frames out
//! of sensor-owned memory.

mod clock;
mod frame_source;
mod recording_sensor;
mod sensor;
pub mod types;


pub use clock::{Clock, SystemClock};
pub use frame_source::{Acquisition, FrameHandle, FrameSource, SourceState};
pub use recording_sensor::{
    COLOR_EXTENSION, DEPTH_EXTENSION, RecordedFrame, RecordingSensor, write_depth_dump,
};
pub use sensor::{MultiFrame, Sensor, SensorPoll};
pub use types::{FrameSamples, RawFrame, SourceKind};
