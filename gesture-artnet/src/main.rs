//! Replay a recorded detector/classifier trace onto an Art-Net node
//!
//! Reads JSON lines (see `bridge::TraceRecord`) from a file or stdin and
//! drives the gesture pipeline frame by frame, sending the resulting
//! control updates over UDP.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use gesture_artnet::bridge::TraceRecord;
use gesture_artnet::classifier::{FINGER_GESTURES, HAND_SIGNS};
use gesture_artnet::{Config, GesturePipeline, LabelTable, ProtocolEmitter};

#[derive(Debug, Parser)]
#[command(name = "gesture-artnet")]
#[command(about = "Send hand gesture control updates to an Art-Net node")]
struct Cli {
    /// JSON-lines trace; stdin when omitted
    trace: Option<PathBuf>,

    /// TOML config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Art-Net node address
    #[arg(long)]
    ip: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    #[arg(long)]
    universe: Option<u16>,

    /// Capture frame width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Capture frame height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Hand sign label file (one label per line)
    #[arg(long = "hand-sign-labels")]
    hand_sign_labels: Option<PathBuf>,

    /// Finger gesture label file (one label per line)
    #[arg(long = "finger-gesture-labels")]
    finger_gesture_labels: Option<PathBuf>,

    /// Pace frames by their recorded `t_ms` timestamps
    #[arg(long)]
    realtime: bool,

    /// Run the pipeline without opening a socket
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(ip) = &self.ip {
            config.ip = ip.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(universe) = self.universe {
            config.universe = universe;
        }
        if let Some(width) = self.width {
            config.capture_width = width;
        }
        if let Some(height) = self.height {
            config.capture_height = height;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    fn labels(path: &Option<PathBuf>, builtin: &[&str]) -> Result<LabelTable> {
        match path {
            Some(path) => LabelTable::load(path)
                .with_context(|| format!("loading labels {}", path.display())),
            None => Ok(LabelTable::new(builtin.iter().copied())),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gesture_artnet=info".into()),
        )
        .init();

    let config = cli.config()?;
    let hand_signs = Cli::labels(&cli.hand_sign_labels, &HAND_SIGNS)?;
    let finger_gestures = Cli::labels(&cli.finger_gesture_labels, &FINGER_GESTURES)?;

    info!("gesture-artnet v{} starting", env!("CARGO_PKG_VERSION"));
    info!(
        ip = %config.ip,
        port = config.port,
        universe = config.universe,
        detection = config.min_detection_confidence,
        tracking = config.min_tracking_confidence,
        dry_run = cli.dry_run,
        "configuration"
    );

    let emitter = ProtocolEmitter::connect(&config, cli.dry_run)
        .await
        .with_context(|| format!("opening Art-Net session to {}:{}", config.ip, config.port))?;
    let mut pipeline = GesturePipeline::new(config, emitter);
    info!(
        destination = pipeline.emitter().destination(),
        universe = pipeline.emitter().universe(),
        "replaying trace"
    );

    let frames = match &cli.trace {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening trace {}", path.display()))?;
            replay(&mut pipeline, BufReader::new(file), &cli, &hand_signs, &finger_gestures).await
        }
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            replay(&mut pipeline, stdin, &cli, &hand_signs, &finger_gestures).await
        }
    };

    // Flush whatever was queued even if the trace was bad
    let stats = pipeline.shutdown().await;
    let frames = frames?;
    info!(
        frames,
        enqueued = stats.enqueued,
        sent = stats.sent,
        failed = stats.failed,
        dropped = stats.dropped,
        "replay finished"
    );
    Ok(())
}

async fn replay<R>(
    pipeline: &mut GesturePipeline,
    reader: R,
    cli: &Cli,
    hand_signs: &LabelTable,
    finger_gestures: &LabelTable,
) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_no = 0usize;
    let mut frames = 0u64;
    let mut last_t_ms: Option<u64> = None;

    while let Some(line) = lines.next_line().await.context("reading trace")? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let record = TraceRecord::parse_line(&line, line_no)?;

        if cli.realtime {
            if let (Some(prev), Some(now)) = (last_t_ms, record.t_ms) {
                tokio::time::sleep(Duration::from_millis(now.saturating_sub(prev))).await;
            }
            last_t_ms = record.t_ms.or(last_t_ms);
        }

        let config = pipeline.config();
        let hand = match record.hand_frame(config.capture_width, config.capture_height) {
            Ok(hand) => hand,
            Err(err) => {
                warn!(line = line_no, %err, "skipping frame with bad landmarks");
                continue;
            }
        };

        let mut classifier = record.classifier();
        let mut trajectory = classifier;
        let report = pipeline.process_frame(hand.as_ref(), &mut classifier, &mut trajectory);
        frames += 1;

        if report.emitted {
            info!(
                line = line_no,
                hand_sign = hand_signs.label(report.hand_sign),
                finger_gesture = finger_gestures.label(report.smoothed_finger_gesture),
                pointer = ?report.pointer,
                "control update"
            );
        }
    }

    Ok(frames)
}
