//! Common utilities module
//!
//! Error taxonomy and step timing shared by every pipeline stage.

pub mod error;
pub mod timing;

pub use error::{NativeCode, Result, TrackerError};
pub use timing::{PipelineTimings, StepTiming, Timer};
