//! Replays raw sensor dumps from a directory.
//!
//! Each multi-frame is stored as up to two files sharing a stem: `<stem>.depth` holds
//! little-endian 16-bit depth samples and `<stem>.yuyv` holds the packed color bytes.
//! Stems are replayed in lexical order.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::tracking_pipeline::common::error::{NativeCode, Result, TrackerError};
use crate::tracking_pipeline::source::sensor::{MultiFrame, Sensor, SensorPoll};

pub const DEPTH_EXTENSION: &str = "depth";
pub const COLOR_EXTENSION: &str = "yuyv";

/// Reported when an I/O failure carries no OS error code.
const UNKNOWN_IO_FAILURE: NativeCode = -1;

#[derive(Debug, Default)]
struct RecordingEntry {
    color: Option<PathBuf>,
    depth: Option<PathBuf>,
}

#[derive(Debug)]
pub struct RecordedFrame {
    color: Option<Vec<u8>>,
    depth: Option<Vec<u16>>,
}

impl MultiFrame for RecordedFrame {
    fn color_buffer(&self) -> Option<&[u8]> {
        self.color.as_deref()
    }

    fn depth_buffer(&self) -> Option<&[u16]> {
        self.depth.as_deref()
    }
}

pub struct RecordingSensor {
    entries: Vec<RecordingEntry>,
    cursor: usize,
    looping: bool,
}

impl RecordingSensor {
    pub fn open<P: AsRef<Path>>(dir: P, looping: bool) -> Result<Self> {
        let dir = dir.as_ref();
        let listing = std::fs::read_dir(dir).map_err(|e| {
            TrackerError::SourceUnavailable(format!("{}: {}", dir.display(), e))
        })?;

        let mut by_stem: BTreeMap<String, RecordingEntry> = BTreeMap::new();
        for entry in listing {
            let path = entry?.path();
            let (Some(stem), Some(ext)) = (path.file_stem(), path.extension()) else {
                continue;
            };
            let stem = stem.to_string_lossy().into_owned();
            if ext == DEPTH_EXTENSION {
                by_stem.entry(stem).or_default().depth = Some(path);
            } else if ext == COLOR_EXTENSION {
                by_stem.entry(stem).or_default().color = Some(path);
            }
        }

        if by_stem.is_empty() {
            return Err(TrackerError::SourceUnavailable(format!(
                "{}: no .{} or .{} dumps found",
                dir.display(),
                DEPTH_EXTENSION,
                COLOR_EXTENSION
            )));
        }

        info!(frames = by_stem.len(), dir = %dir.display(), "Opened recording");
        Ok(Self {
            entries: by_stem.into_values().collect(),
            cursor: 0,
            looping,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn load(entry: &RecordingEntry) -> std::io::Result<RecordedFrame> {
        let color = entry.color.as_ref().map(std::fs::read).transpose()?;
        let depth = entry
            .depth
            .as_ref()
            .map(|path| std::fs::read(path).and_then(|bytes| decode_depth(&bytes)))
            .transpose()?;
        Ok(RecordedFrame { color, depth })
    }
}

impl Sensor for RecordingSensor {
    type Frame = RecordedFrame;

    fn acquire_latest(&mut self) -> SensorPoll<RecordedFrame> {
        if self.cursor >= self.entries.len() {
            if !self.looping {
                return SensorPoll::Pending;
            }
            debug!("Recording exhausted, rewinding");
            self.cursor = 0;
        }

        let entry = &self.entries[self.cursor];
        self.cursor += 1;
        match Self::load(entry) {
            Ok(frame) => SensorPoll::Frame(frame),
            Err(e) => SensorPoll::Failed(e.raw_os_error().unwrap_or(UNKNOWN_IO_FAILURE)),
        }
    }
}

/// A trailing half sample means the dump was cut short; it is never padded.
fn decode_depth(bytes: &[u8]) -> std::io::Result<Vec<u16>> {
    let pairs = bytes.chunks_exact(2);
    if !pairs.remainder().is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("depth dump holds {} bytes, not a whole number of samples", bytes.len()),
        ));
    }
    Ok(pairs.map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect())
}

/// Writes depth samples in the `.depth` dump layout.
pub fn write_depth_dump<P: AsRef<Path>>(path: P, samples: &[u16]) -> Result<()> {
    let path = path.as_ref();
    let mut file = std::fs::File::create(path)
        .map_err(|e| TrackerError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    file.write_all(&bytes)?;
    Ok(())
}
