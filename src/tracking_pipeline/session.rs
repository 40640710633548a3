//! Tracking session module
//!
//! Drives the acquire, convert, subtract, locate and emit loop, and owns the outputs a
//! session writes: the sample log and the frame stream.

mod config;
mod frame_log;
mod frames;
mod pipeline;
mod samples;


pub use config::{TrackerConfig, TrackerConfigBuilder};
pub use frame_log::{FrameLog, SilentFrameLog, TracingFrameLog};
pub use frames::{FrameSink, NullFrameSink, OutputFrame, TiffFrameSink};
pub use pipeline::{BaselineOrigin, FrameOutcome, SessionSummary, TrackingPipeline};
pub use samples::{CsvSampleSink, PositionSample, SAMPLE_HEADER, SampleSink};
