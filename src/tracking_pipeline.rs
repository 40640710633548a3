//! Mouse tracking pipeline
//!
//! Separate modules for frame acquisition, preprocessing, background modelling, blob
//! tracking and TIFF persistence, tied together by the session loop.

pub mod background;
pub mod common;
pub mod preprocess;
pub mod session;
pub mod source;
pub mod tiff;
pub mod tracker;

#[cfg(test)]
pub(crate) mod test_support;

pub use common::{Result, TrackerError};

pub use source::{FrameSource, RawFrame, RecordingSensor, Sensor, SourceKind, SystemClock};

pub use preprocess::{DepthWindow, Region, foreground_mask, to_grayscale};

pub use background::{BackgroundModel, BaselineStore, TiffBaselineStore};

pub use tracker::{Location, Position, TrackState, locate};

pub use tiff::{StandardTiffWriter, TiffCompression, TiffWriter};

pub use session::{
    CsvSampleSink, FrameSink, NullFrameSink, PositionSample, SampleSink, TiffFrameSink,
    TrackerConfig, TrackingPipeline,
};
