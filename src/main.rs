use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use mouse_tracker_rs::logger;
use mouse_tracker_rs::tracking_pipeline::TrackerError;
use mouse_tracker_rs::tracking_pipeline::background::TiffBaselineStore;
use mouse_tracker_rs::tracking_pipeline::preprocess::DepthWindow;
use mouse_tracker_rs::tracking_pipeline::session::{
    CsvSampleSink, FrameLog, FrameSink, NullFrameSink, SilentFrameLog, TiffFrameSink,
    TracingFrameLog, TrackerConfig, TrackingPipeline,
};
use mouse_tracker_rs::tracking_pipeline::source::{RecordingSensor, SourceKind, SystemClock};
use mouse_tracker_rs::tracking_pipeline::tiff::TiffCompression;

/// Track a mouse in an arena from depth or color sensor frames
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory of recorded sensor dumps to replay
    #[arg(long, value_name = "DIR")]
    recording: PathBuf,

    /// Track in the color stream instead of depth
    #[arg(short, long)]
    color: bool,

    /// Emit grayscale frames only, without background subtraction or tracking
    #[arg(short, long)]
    raw: bool,

    /// Box blur kernel size (odd)
    #[arg(short, long, default_value_t = 15)]
    blur: u32,

    /// Foreground threshold on the background difference
    #[arg(short = 's', long, default_value_t = 30)]
    threshold: u8,

    /// Minimum blob radius in pixels
    #[arg(short, long, default_value_t = 6.0)]
    minimum: f32,

    /// Wait for Enter before streaming
    #[arg(short, long)]
    trigger: bool,

    /// Replace existing output files
    #[arg(short = 'w', long)]
    overwrite: bool,

    /// Sample log (CSV)
    #[arg(short, long, default_value = "data.csv")]
    datafile: PathBuf,

    /// Background baseline, loaded if present and written otherwise
    #[arg(long, default_value = "background.tiff")]
    background: PathBuf,

    /// Dump every emitted frame as a numbered TIFF into this directory
    #[arg(long, value_name = "DIR")]
    frames_dir: Option<PathBuf>,

    /// Give up when no frame arrives within this many milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Pause between sensor polls in milliseconds
    #[arg(long, default_value_t = 1)]
    poll_interval_ms: u64,

    /// Nearest depth (mm) mapped to intensity 0
    #[arg(long, default_value_t = 650)]
    range_min: u16,

    /// Width of the depth window in mm (at most 256)
    #[arg(long, default_value_t = 135)]
    range_delta: u16,

    /// Process the whole sensor frame instead of the arena region
    #[arg(long)]
    full_frame: bool,

    /// Restart the recording when it runs out
    #[arg(long)]
    loop_recording: bool,

    /// Per-frame logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(args.verbose);

    info!("Starting mouse-tracker...");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = tracker_config(args);

    let sensor = RecordingSensor::open(&args.recording, args.loop_recording)
        .with_context(|| format!("Failed to open recording {}", args.recording.display()))?;
    info!(frames = sensor.len(), source = %config.source, "Recording opened");

    if args.verbose {
        run_session(args, sensor, config, TracingFrameLog)
    } else {
        run_session(args, sensor, config, SilentFrameLog)
    }
}

fn run_session<L: FrameLog>(
    args: &Args,
    sensor: RecordingSensor,
    config: TrackerConfig,
    log: L,
) -> Result<()> {
    let mut pipeline = TrackingPipeline::with_custom(sensor, SystemClock::new(), log, config)
        .context("Invalid tracker configuration")?;

    let mut samples = CsvSampleSink::create(&args.datafile, args.overwrite)
        .with_context(|| format!("Failed to create sample log {}", args.datafile.display()))?;
    let mut frames: Box<dyn FrameSink> = match &args.frames_dir {
        Some(dir) => Box::new(
            TiffFrameSink::create(dir, TiffCompression::Lzw, args.overwrite)
                .with_context(|| format!("Failed to prepare frame directory {}", dir.display()))?,
        ),
        None => Box::new(NullFrameSink),
    };

    let store = TiffBaselineStore::new(&args.background);
    let origin = pipeline
        .establish_baseline(&store, || {
            wait_for_enter("Clear the arena, then press Enter to capture the background")
        })
        .context("Failed to establish the background baseline")?;
    info!(?origin, path = %store.path().display(), "Background ready");

    if args.trigger {
        wait_for_enter("Press Enter to start tracking")?;
    }

    // Installed only once streaming starts, so Ctrl-C at a prompt still ends the process.
    let cancel = install_cancel_handler()?;
    let summary = pipeline
        .run(&mut samples, frames.as_mut(), &cancel)
        .context("Tracking session aborted")?;

    info!(
        processed = summary.frames_processed,
        skipped = summary.frames_skipped,
        mean_frame_time = ?summary.mean_frame_time(),
        "Session finished"
    );
    Ok(())
}

fn install_cancel_handler() -> Result<Arc<AtomicBool>> {
    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))
        .context("Failed to install the Ctrl-C handler")?;
    Ok(cancel)
}

fn tracker_config(args: &Args) -> TrackerConfig {
    let source = if args.color {
        SourceKind::Color
    } else {
        SourceKind::Depth
    };

    let mut builder = TrackerConfig::builder()
        .source(source)
        .raw_mode(args.raw)
        .blur_size(args.blur)
        .threshold(args.threshold)
        .minimum_radius(args.minimum)
        .acquire_timeout(Duration::from_millis(args.timeout_ms))
        .poll_interval(Duration::from_millis(args.poll_interval_ms))
        .depth_window(DepthWindow::new(args.range_min, args.range_delta));
    if args.full_frame {
        builder = builder.crop(None);
    }
    builder.build()
}

fn wait_for_enter(prompt: &str) -> mouse_tracker_rs::tracking_pipeline::Result<()> {
    println!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(TrackerError::InputReadError(
            "stdin closed before Enter was pressed".to_string(),
        ));
    }
    Ok(())
}
