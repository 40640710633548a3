use crate::tracking_pipeline::common::error::NativeCode;

/// Outcome of one non-blocking poll of the sensor's latest-frame API.
#[derive(Debug)]
pub enum SensorPoll<F> {
    /// A new time-synchronised bundle arrived.
    Frame(F),
    /// Nothing new since the last poll; transient.
    Pending,
    /// The device reported a failure code.
    Failed(NativeCode),
}

/// A color + depth bundle whose buffers belong to the sensor.
///
/// The slices are only valid while the bundle is alive; callers copy them out.
pub trait MultiFrame {
    fn color_buffer(&self) -> Option<&[u8]>;
    fn depth_buffer(&self) -> Option<&[u16]>;
}

/// The device seam. A driver implements this; the pipeline never blocks inside it.
pub trait Sensor {
    type Frame: MultiFrame;

    fn acquire_latest(&mut self) -> SensorPoll<Self::Frame>;
}
