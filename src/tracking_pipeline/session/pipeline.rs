use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use image::GrayImage;
use tracing::{info, instrument, warn};

use crate::tracking_pipeline::background::{BackgroundModel, BaselineStore};
use crate::tracking_pipeline::common::error::{Result, TrackerError};
use crate::tracking_pipeline::common::timing::{PipelineTimings, Timer};
use crate::tracking_pipeline::preprocess::{crop, foreground_mask, smooth, to_grayscale};
use crate::tracking_pipeline::session::config::TrackerConfig;
use crate::tracking_pipeline::session::frame_log::{FrameLog, TracingFrameLog};
use crate::tracking_pipeline::session::frames::{FrameSink, OutputFrame};
use crate::tracking_pipeline::session::samples::{PositionSample, SampleSink};
use crate::tracking_pipeline::source::{
    Acquisition, Clock, FrameSource, Sensor, SourceState, SystemClock,
};
use crate::tracking_pipeline::tracker::{TrackState, locate};

/// Frames tried while capturing the baseline before a missing sub-frame is fatal.
const BASELINE_ATTEMPTS: u32 = 30;

/// What one loop iteration produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Tracked(PositionSample),
    /// Raw mode: a grayscale frame went out, no sample.
    Raw,
    /// The multi-frame lacked the session's sub-frame.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineOrigin {
    Loaded,
    Captured,
    /// Raw sessions never subtract a background.
    NotNeeded,
}

#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    pub frames_processed: u64,
    pub frames_skipped: u64,
    pub busy_time: Duration,
}

impl SessionSummary {
    pub fn mean_frame_time(&self) -> Option<Duration> {
        let frames = self.frames_processed + self.frames_skipped;
        (frames > 0).then(|| self.busy_time / frames as u32)
    }
}

pub struct TrackingPipeline<S: Sensor, C: Clock, L: FrameLog> {
    source: FrameSource<S, C>,
    config: TrackerConfig,
    background: BackgroundModel,
    state: TrackState,
    log: L,
}

impl<S: Sensor> TrackingPipeline<S, SystemClock, TracingFrameLog> {
    pub fn new(sensor: S, config: TrackerConfig) -> Result<Self> {
        Self::with_custom(sensor, SystemClock::new(), TracingFrameLog, config)
    }
}

impl<S: Sensor, C: Clock, L: FrameLog> TrackingPipeline<S, C, L> {
    pub fn with_custom(sensor: S, clock: C, log: L, config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source: FrameSource::new(sensor, clock, config.poll_interval),
            config,
            background: BackgroundModel::new(),
            state: TrackState::default(),
            log,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn track_state(&self) -> TrackState {
        self.state
    }

    pub fn background(&self) -> &BackgroundModel {
        &self.background
    }

    pub fn source_state(&self) -> SourceState {
        self.source.state()
    }

    /// Installs `baseline` after checking it matches the processed frame geometry.
    pub fn install_baseline(&mut self, baseline: GrayImage) -> Result<()> {
        if baseline.dimensions() != self.config.frame_dimensions() {
            return Err(TrackerError::InvalidDimensions(
                baseline.width() as usize,
                baseline.height() as usize,
            ));
        }
        self.background.capture(baseline);
        Ok(())
    }

    /// Loads the persisted baseline, or captures and persists a new one.
    ///
    /// `before_capture` runs only when a capture is needed, e.g. to let the operator
    /// clear the scene first.
    pub fn establish_baseline<F>(&mut self, store: &dyn BaselineStore, before_capture: F) -> Result<BaselineOrigin>
    where
        F: FnOnce() -> Result<()>,
    {
        if self.config.raw_mode {
            return Ok(BaselineOrigin::NotNeeded);
        }

        if let Some(baseline) = store.load()? {
            self.install_baseline(baseline)?;
            return Ok(BaselineOrigin::Loaded);
        }

        before_capture()?;
        let baseline = self.capture_baseline()?;
        store.save(&baseline)?;
        self.install_baseline(baseline)?;
        Ok(BaselineOrigin::Captured)
    }

    /// Grabs one frame, converted and blurred the way tracked frames are.
    pub fn capture_baseline(&mut self) -> Result<GrayImage> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut timings = PipelineTimings::new();
            match self.acquire_grayscale(&mut timings) {
                Ok(frame) => return Ok(smooth(&frame, self.config.blur_size)),
                Err(e) if e.is_recoverable() && attempt < BASELINE_ATTEMPTS => {
                    warn!(attempt, "Baseline capture retrying: {}", e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn acquire_grayscale(&mut self, timings: &mut PipelineTimings) -> Result<GrayImage> {
        let timer = Timer::start("acquire");
        let handle = match self.source.acquire(self.config.acquire_timeout)? {
            Acquisition::Ready(handle) => handle,
            Acquisition::TimedOut => {
                return Err(TrackerError::Timeout {
                    timeout_ms: self.config.acquire_timeout.as_millis() as u64,
                });
            }
        };
        timer.record(timings);

        let timer = Timer::start("extract");
        let raw = self.source.extract(handle, self.config.source)?;
        timer.record(timings);

        let timer = Timer::start("grayscale");
        let mut frame = to_grayscale(&raw, self.config.depth_window);
        if let Some(region) = self.config.crop {
            frame = crop(&frame, region);
        }
        timer.record(timings);

        Ok(frame)
    }

    /// Runs one iteration of the loop. A missing sub-frame is reported as
    /// [`FrameOutcome::Skipped`]; every other error is fatal.
    pub fn process_frame(
        &mut self,
        session_start: Duration,
        frame_index: u64,
        samples: &mut dyn SampleSink,
        frames: &mut dyn FrameSink,
    ) -> Result<FrameOutcome> {
        let _span = tracing::debug_span!("frame", index = frame_index).entered();
        let mut timings = PipelineTimings::new();

        let frame = match self.acquire_grayscale(&mut timings) {
            Ok(frame) => frame,
            Err(e) if e.is_recoverable() => {
                self.log.frame_skipped(frame_index, &e);
                return Ok(FrameOutcome::Skipped);
            }
            Err(e) => return Err(e),
        };
        let timestamp_ms = self
            .source
            .clock()
            .now()
            .saturating_sub(session_start)
            .as_millis() as u64;

        if self.config.raw_mode {
            let timer = Timer::start("emit");
            frames.write_frame(&OutputFrame::Raw(frame))?;
            timer.record(&mut timings);

            self.log.frame_processed(frame_index, None, &timings);
            return Ok(FrameOutcome::Raw);
        }

        let timer = Timer::start("mask");
        let blurred = smooth(&frame, self.config.blur_size);
        let mask = foreground_mask(
            &blurred,
            self.background.get()?,
            self.config.mask_smoothing,
            self.config.threshold,
        );
        timer.record(&mut timings);

        let timer = Timer::start("locate");
        let location = locate(&mask, self.config.minimum_radius, self.state);
        self.state = location.state;
        timer.record(&mut timings);

        let (x, y) = location.position.to_pixel();
        let sample = PositionSample { timestamp_ms, x, y };

        let timer = Timer::start("emit");
        samples.record(&sample)?;
        frames.write_frame(&OutputFrame::Annotated(location.annotated))?;
        timer.record(&mut timings);

        self.log.frame_processed(frame_index, Some(&sample), &timings);
        Ok(FrameOutcome::Tracked(sample))
    }

    /// Streams until `cancel` is set or a fatal error occurs.
    ///
    /// Cancellation is checked between iterations only. Both sinks are flushed before
    /// returning, including on a fatal error.
    #[instrument(skip_all, fields(source = %self.config.source, raw = self.config.raw_mode))]
    pub fn run(
        &mut self,
        samples: &mut dyn SampleSink,
        frames: &mut dyn FrameSink,
        cancel: &AtomicBool,
    ) -> Result<SessionSummary> {
        if !self.config.raw_mode && !self.background.is_captured() {
            return Err(TrackerError::MissingBaseline);
        }

        info!("Starting stream");
        let outcome = self.stream(samples, frames, cancel);
        let flushed = samples.flush().and_then(|_| frames.flush());

        let summary = outcome?;
        flushed?;

        info!(
            processed = summary.frames_processed,
            skipped = summary.frames_skipped,
            "Stream stopped"
        );
        Ok(summary)
    }

    fn stream(
        &mut self,
        samples: &mut dyn SampleSink,
        frames: &mut dyn FrameSink,
        cancel: &AtomicBool,
    ) -> Result<SessionSummary> {
        let session_start = self.source.clock().now();
        let mut summary = SessionSummary::default();

        if !self.config.raw_mode {
            samples.record(&PositionSample::ORIGIN)?;
        }

        let mut frame_index = 0;
        while !cancel.load(Ordering::SeqCst) {
            let started = self.source.clock().now();
            match self.process_frame(session_start, frame_index, samples, frames)? {
                FrameOutcome::Skipped => summary.frames_skipped += 1,
                FrameOutcome::Tracked(_) | FrameOutcome::Raw => summary.frames_processed += 1,
            }
            summary.busy_time += self.source.clock().now().saturating_sub(started);
            frame_index += 1;
        }

        Ok(summary)
    }
}
