use thiserror::Error;

use crate::tracking_pipeline::source::types::SourceKind;

/// Native status code reported by the sensor layer.
pub type NativeCode = i32;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Sensor unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Sensor failure during {operation}: native code {code}")]
    SourceError {
        operation: &'static str,
        code: NativeCode,
    },

    #[error("No frame arrived within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Multi-frame carried no {kind} sub-frame")]
    NoFrame { kind: SourceKind },

    #[error("{kind} buffer holds {actual} samples, expected {expected}")]
    SizeMismatch {
        kind: SourceKind,
        expected: usize,
        actual: usize,
    },

    #[error("Background baseline requested before one was captured")]
    MissingBaseline,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode TIFF image: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TrackerError {
    /// Only a missing sub-frame is survivable; the loop skips the iteration.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TrackerError::NoFrame { .. })
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
