//! Bounded-timeout acquisition on top of a polling [`Sensor`].
//!
//! The sensor's latest-frame API is non-blocking and reports "nothing yet" as a
//! transient condition. `FrameSource` turns it into a blocking call with a wall-clock
//! deadline, sleeping for `poll_interval` between polls, and copies sub-frames out of
//! sensor-owned memory into stable [`RawFrame`]s.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::tracking_pipeline::common::error::{NativeCode, Result, TrackerError};
use crate::tracking_pipeline::source::clock::Clock;
use crate::tracking_pipeline::source::sensor::{MultiFrame, Sensor, SensorPoll};
use crate::tracking_pipeline::source::types::{RawFrame, SourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    Idle,
    Acquiring,
    Ready,
    TimedOut,
    /// Terminal; every later `acquire` reports the same code.
    Failed(NativeCode),
}

/// A multi-frame that has arrived but not yet been read. Consumed by extraction.
#[derive(Debug)]
pub struct FrameHandle<F> {
    frame: F,
}

#[derive(Debug)]
pub enum Acquisition<F> {
    Ready(FrameHandle<F>),
    TimedOut,
}

pub struct FrameSource<S: Sensor, C: Clock> {
    sensor: S,
    clock: C,
    poll_interval: Duration,
    state: SourceState,
}

impl<S: Sensor, C: Clock> FrameSource<S, C> {
    pub fn new(sensor: S, clock: C, poll_interval: Duration) -> Self {
        Self {
            sensor,
            clock,
            poll_interval,
            state: SourceState::Idle,
        }
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Blocks until the sensor delivers a multi-frame or `timeout` elapses.
    ///
    /// A timeout is reported as [`Acquisition::TimedOut`], not as an error; the caller
    /// decides whether that ends the session.
    pub fn acquire(&mut self, timeout: Duration) -> Result<Acquisition<S::Frame>> {
        if let SourceState::Failed(code) = self.state {
            return Err(TrackerError::SourceError {
                operation: "acquire_latest",
                code,
            });
        }

        self.state = SourceState::Acquiring;
        let deadline = self.clock.now() + timeout;
        let mut polls: u64 = 0;

        loop {
            polls += 1;
            match self.sensor.acquire_latest() {
                SensorPoll::Frame(frame) => {
                    trace!(polls, "multi-frame acquired");
                    self.state = SourceState::Ready;
                    return Ok(Acquisition::Ready(FrameHandle { frame }));
                }
                SensorPoll::Pending => {}
                SensorPoll::Failed(code) => {
                    warn!(code, "sensor reported a failure while acquiring");
                    self.state = SourceState::Failed(code);
                    return Err(TrackerError::SourceError {
                        operation: "acquire_latest",
                        code,
                    });
                }
            }

            if self.clock.now() >= deadline {
                debug!(polls, timeout_ms = timeout.as_millis() as u64, "acquisition timed out");
                self.state = SourceState::TimedOut;
                return Ok(Acquisition::TimedOut);
            }
            self.clock.sleep(self.poll_interval);
        }
    }

    pub fn extract(&mut self, handle: FrameHandle<S::Frame>, kind: SourceKind) -> Result<RawFrame> {
        match kind {
            SourceKind::Color => self.extract_color(handle),
            SourceKind::Depth => self.extract_depth(handle),
        }
    }

    pub fn extract_color(&mut self, handle: FrameHandle<S::Frame>) -> Result<RawFrame> {
        self.state = SourceState::Idle;
        let buf = handle
            .frame
            .color_buffer()
            .ok_or(TrackerError::NoFrame { kind: SourceKind::Color })?;
        RawFrame::color(buf.to_vec())
    }

    pub fn extract_depth(&mut self, handle: FrameHandle<S::Frame>) -> Result<RawFrame> {
        self.state = SourceState::Idle;
        let buf = handle
            .frame
            .depth_buffer()
            .ok_or(TrackerError::NoFrame { kind: SourceKind::Depth })?;
        RawFrame::depth(buf.to_vec())
    }

    /// Drops an acquired multi-frame without reading it.
    pub fn discard(&mut self, handle: FrameHandle<S::Frame>) {
        drop(handle);
        self.state = SourceState::Idle;
    }
}
