//! Sensor geometry and raw frame types

use std::fmt;

use crate::tracking_pipeline::common::error::{Result, TrackerError};

pub const DEPTH_WIDTH: usize = 512;
pub const DEPTH_HEIGHT: usize = 424;
pub const COLOR_WIDTH: usize = 1920;
pub const COLOR_HEIGHT: usize = 1080;
/// YUYV packs two bytes per pixel (luma plus alternating chroma).
pub const COLOR_BYTES_PER_PIXEL: usize = 2;

/// Which sensor stream a session tracks in. Chosen once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Color,
    Depth,
}

impl SourceKind {
    pub fn width(self) -> usize {
        match self {
            SourceKind::Color => COLOR_WIDTH,
            SourceKind::Depth => DEPTH_WIDTH,
        }
    }

    pub fn height(self) -> usize {
        match self {
            SourceKind::Color => COLOR_HEIGHT,
            SourceKind::Depth => DEPTH_HEIGHT,
        }
    }

    /// Number of buffer elements a sub-frame of this kind must hold
    /// (bytes for color, 16-bit samples for depth).
    pub fn buffer_len(self) -> usize {
        match self {
            SourceKind::Color => COLOR_WIDTH * COLOR_HEIGHT * COLOR_BYTES_PER_PIXEL,
            SourceKind::Depth => DEPTH_WIDTH * DEPTH_HEIGHT,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Color => f.write_str("color"),
            SourceKind::Depth => f.write_str("depth"),
        }
    }
}

/// A sub-frame copied out of sensor-owned memory.
///
/// The payload is private; the checked constructors are the only way in, so every
/// `RawFrame` in circulation has exactly `kind().buffer_len()` elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Payload {
    Color(Vec<u8>),
    Depth(Vec<u16>),
}

/// Borrowed view of a [`RawFrame`]'s buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSamples<'a> {
    /// Packed YUYV 4:2:2, `COLOR_WIDTH * COLOR_HEIGHT * 2` bytes.
    Color(&'a [u8]),
    /// Depth samples, `DEPTH_WIDTH * DEPTH_HEIGHT` values.
    Depth(&'a [u16]),
}

impl RawFrame {
    pub fn color(data: Vec<u8>) -> Result<Self> {
        check_len(SourceKind::Color, data.len())?;
        Ok(Self {
            payload: Payload::Color(data),
        })
    }

    pub fn depth(data: Vec<u16>) -> Result<Self> {
        check_len(SourceKind::Depth, data.len())?;
        Ok(Self {
            payload: Payload::Depth(data),
        })
    }

    pub fn kind(&self) -> SourceKind {
        match self.payload {
            Payload::Color(_) => SourceKind::Color,
            Payload::Depth(_) => SourceKind::Depth,
        }
    }

    pub fn samples(&self) -> FrameSamples<'_> {
        match &self.payload {
            Payload::Color(data) => FrameSamples::Color(data),
            Payload::Depth(data) => FrameSamples::Depth(data),
        }
    }
}

fn check_len(kind: SourceKind, actual: usize) -> Result<()> {
    let expected = kind.buffer_len();
    if actual != expected {
        return Err(TrackerError::SizeMismatch {
            kind,
            expected,
            actual,
        });
    }
    Ok(())
}
