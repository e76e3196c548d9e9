//! Background device worker
//!
//! The worker owns the serial port and the whole pipeline. It never touches
//! display state; it only sends [`WorkerEvent`]s to the UI loop.

use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::parser::{FrameReader, ReadEvent};
use crate::pipeline::{Pipeline, PipelineStats, TrackSink};
use crate::track::Track;
use crate::types::{DisplaySnapshot, TrackUpdate, WorkerEvent};
use crossbeam_channel::Sender;
use std::io::Read;
use std::thread::{self, JoinHandle};
use tracing::{error, info, warn};

/// Non-timeout read failures in a row before the device is given up
pub const MAX_CONSECUTIVE_READ_ERRORS: u32 = 10;

/// Forwards display snapshots to the UI thread
pub struct SnapshotSender {
    tx: Sender<WorkerEvent>,
}

impl SnapshotSender {
    pub fn new(tx: Sender<WorkerEvent>) -> Self {
        Self { tx }
    }
}

impl TrackSink for SnapshotSender {
    fn record(&mut self, update: &TrackUpdate, track: &Track) -> Result<()> {
        let snapshot = DisplaySnapshot::from_update(update, track.path());
        // A closed channel means the UI is gone; nothing left to show
        let _ = self.tx.send(WorkerEvent::Snapshot(snapshot));
        Ok(())
    }
}

/// Why [`drive`] returned
#[derive(Debug)]
pub enum StopReason {
    EndOfStream,
    DeviceLost(TrackerError),
}

/// Pump frames from `reader` through `pipeline` into `sinks` until the source
/// ends or fails `MAX_CONSECUTIVE_READ_ERRORS` times in a row.
pub fn drive<R: Read>(
    reader: &mut FrameReader<R>,
    pipeline: &mut Pipeline,
    sinks: &mut [&mut dyn TrackSink],
) -> StopReason {
    let mut consecutive_errors = 0u32;

    loop {
        match reader.read_event() {
            Ok(ReadEvent::Frame(frame)) => {
                consecutive_errors = 0;
                pipeline.process_and_dispatch(&frame, sinks);
            }
            Ok(ReadEvent::Idle) => consecutive_errors = 0,
            Ok(ReadEvent::Eof) => return StopReason::EndOfStream,
            Err(e) => {
                consecutive_errors += 1;
                warn!(error = %e, attempt = consecutive_errors, "device read failed");
                if consecutive_errors >= MAX_CONSECUTIVE_READ_ERRORS {
                    return StopReason::DeviceLost(TrackerError::DeviceLost(consecutive_errors));
                }
            }
        }
    }
}

/// Open the configured serial device
pub fn open_device(config: &TrackerConfig) -> Result<Box<dyn serialport::SerialPort>> {
    let port = serialport::new(&config.port, config.baud_rate)
        .timeout(config.read_timeout)
        .data_bits(serialport::DataBits::Eight)
        .open()?;
    Ok(port)
}

/// Run the worker loop on the current thread over any byte source.
///
/// Returns the final pipeline counters once the source ends or is lost.
pub fn run_worker<R: Read>(
    source: R,
    config: &TrackerConfig,
    log_sink: Option<&mut dyn TrackSink>,
    tx: Sender<WorkerEvent>,
) -> PipelineStats {
    let mut reader = FrameReader::new(source);
    let mut pipeline = Pipeline::new(config.min_distance_meters);
    let mut display = SnapshotSender::new(tx.clone());

    let reason = match log_sink {
        Some(log) => drive(&mut reader, &mut pipeline, &mut [log, &mut display]),
        None => drive(
            &mut reader,
            &mut pipeline,
            &mut [&mut display as &mut dyn TrackSink],
        ),
    };

    match reason {
        StopReason::EndOfStream => info!("byte source ended"),
        StopReason::DeviceLost(e) => {
            error!(error = %e, port = %config.port, "device lost");
            let _ = tx.send(WorkerEvent::DeviceError(e.to_string()));
        }
    }

    let stats = pipeline.stats().clone();
    info!(
        frames = stats.frames,
        accepted = stats.accepted,
        vertices = stats.vertices,
        distance_m = pipeline.track().total_distance_m(),
        "worker finished"
    );
    stats
}

/// Spawn the background worker: open the device and stream into the pipeline.
///
/// Device open failures are reported through the channel, never by panicking,
/// so the UI side stays alive. The handle may be dropped; the thread is meant
/// to run for the life of the process.
pub fn spawn_worker(
    config: TrackerConfig,
    mut log_sink: Option<Box<dyn TrackSink + Send>>,
    tx: Sender<WorkerEvent>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("gps-reader".to_string())
        .spawn(move || {
            info!(port = %config.port, baud = config.baud_rate, "opening device");
            let device = match open_device(&config) {
                Ok(device) => device,
                Err(e) => {
                    error!(error = %e, port = %config.port, "cannot open device");
                    let _ = tx.send(WorkerEvent::DeviceError(format!(
                        "cannot open {}: {}",
                        config.port, e
                    )));
                    return;
                }
            };

            let log = log_sink
                .as_deref_mut()
                .map(|sink| sink as &mut dyn TrackSink);
            run_worker(device, &config, log, tx);
        })
}
