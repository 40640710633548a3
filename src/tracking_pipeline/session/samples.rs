use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::tracking_pipeline::common::error::{Result, TrackerError};

/// One tracked position, stamped with milliseconds since the session started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSample {
    pub timestamp_ms: u64,
    pub x: u32,
    pub y: u32,
}

impl PositionSample {
    /// Every non-raw session log opens with this row.
    pub const ORIGIN: PositionSample = PositionSample {
        timestamp_ms: 0,
        x: 0,
        y: 0,
    };
}

pub trait SampleSink {
    fn record(&mut self, sample: &PositionSample) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

pub const SAMPLE_HEADER: [&str; 3] = ["t (ms)", "x (px)", "y (px)"];

fn csv_error(e: csv::Error) -> TrackerError {
    TrackerError::OutputWriteError(e.to_string())
}

/// Sample log as CSV. The header row is written on creation.
pub struct CsvSampleSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSampleSink<W> {
    pub fn new(output: W) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(output);
        writer.write_record(SAMPLE_HEADER).map_err(csv_error)?;
        Ok(Self { writer })
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| TrackerError::OutputWriteError(e.to_string()))
    }
}

impl CsvSampleSink<File> {
    /// Creates the log file, refusing to replace an existing one unless `overwrite`.
    pub fn create<P: AsRef<Path>>(path: P, overwrite: bool) -> Result<Self> {
        let path = path.as_ref();
        if !overwrite && path.exists() {
            return Err(TrackerError::OutputWriteError(format!(
                "{}: already exists",
                path.display()
            )));
        }

        let file = File::create(path)
            .map_err(|e| TrackerError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Sample log created");
        Self::new(file)
    }
}

impl<W: Write> SampleSink for CsvSampleSink<W> {
    fn record(&mut self, sample: &PositionSample) -> Result<()> {
        self.writer
            .write_record([
                sample.timestamp_ms.to_string(),
                sample.x.to_string(),
                sample.y.to_string(),
            ])
            .map_err(csv_error)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
