use tracing::{debug, info, warn};

use crate::tracking_pipeline::common::error::TrackerError;
use crate::tracking_pipeline::common::timing::PipelineTimings;
use crate::tracking_pipeline::session::samples::PositionSample;

/// Per-frame reporting, chosen when the pipeline is built.
pub trait FrameLog {
    fn frame_processed(&self, frame: u64, sample: Option<&PositionSample>, timings: &PipelineTimings);
    fn frame_skipped(&self, frame: u64, reason: &TrackerError);
}

/// Reports every frame through `tracing`.
#[derive(Debug, Default)]
pub struct TracingFrameLog;

impl FrameLog for TracingFrameLog {
    fn frame_processed(&self, frame: u64, sample: Option<&PositionSample>, timings: &PipelineTimings) {
        let total = timings.total_duration();
        let fps = if total.is_zero() {
            0.0
        } else {
            1.0 / total.as_secs_f64()
        };

        match sample {
            Some(sample) => info!(
                frame,
                t_ms = sample.timestamp_ms,
                x = sample.x,
                y = sample.y,
                "fps: {:.1}",
                fps
            ),
            None => info!(frame, "fps: {:.1}", fps),
        }
        debug!(frame, "{}", timings.breakdown());
    }

    fn frame_skipped(&self, frame: u64, reason: &TrackerError) {
        warn!(frame, "Skipping frame: {}", reason);
    }
}

/// Reports nothing.
#[derive(Debug, Default)]
pub struct SilentFrameLog;

impl FrameLog for SilentFrameLog {
    fn frame_processed(&self, _frame: u64, _sample: Option<&PositionSample>, _timings: &PipelineTimings) {}

    fn frame_skipped(&self, _frame: u64, _reason: &TrackerError) {}
}
