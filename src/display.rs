//! Console presentation of display snapshots
//!
//! The UI thread owns a [`ConsoleDisplay`], drains worker events once per tick
//! and repaints. Nothing here feeds back into the tracking state.

use crate::types::{DisplaySnapshot, TileSource, WorkerEvent};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::io::Write;
use std::time::Duration;

const MISSING: &str = "--";

/// Text for each read-only label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLabels {
    pub latitude: String,
    pub longitude: String,
    pub altitude: String,
    pub speed: String,
    pub heading: String,
    pub total_distance: String,
    pub date: String,
    pub time: String,
}

impl DisplayLabels {
    pub fn from_snapshot(snapshot: &DisplaySnapshot) -> Self {
        let text = |value: &Option<String>| value.as_deref().unwrap_or(MISSING).to_string();
        Self {
            latitude: format!("X_dis: {:.6}", snapshot.position.latitude),
            longitude: format!("Y_dis: {:.6}", snapshot.position.longitude),
            altitude: format!("Z_dis (m): {}", text(&snapshot.altitude)),
            speed: format!("Speed (km/h): {}", text(&snapshot.speed)),
            heading: match snapshot.heading {
                Some(h) => format!("Heading: {h:.1}°"),
                None => format!("Heading: {MISSING}°"),
            },
            total_distance: format!("Total Distance (m): {:.2}", snapshot.total_distance_m),
            date: format!("Date: {}", text(&snapshot.date)),
            time: format!("Time: {}", text(&snapshot.time)),
        }
    }

    /// Labels in panel order
    pub fn lines(&self) -> [&str; 8] {
        [
            self.latitude.as_str(),
            self.longitude.as_str(),
            self.altitude.as_str(),
            self.speed.as_str(),
            self.heading.as_str(),
            self.total_distance.as_str(),
            self.date.as_str(),
            self.time.as_str(),
        ]
    }
}

/// How snapshots are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayFormat {
    #[default]
    Labels,
    #[cfg(feature = "json")]
    Json,
}

/// Result of one UI tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Number of snapshots painted this tick
    Painted(usize),
    /// The worker reported a device error
    DeviceError(String),
    /// The worker is gone and no events remain
    Disconnected,
}

/// Stdout-backed presentation sink
pub struct ConsoleDisplay<W: Write> {
    out: W,
    format: DisplayFormat,
    tile_source: TileSource,
    last: Option<DisplaySnapshot>,
    path_vertices: usize,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W, format: DisplayFormat, tile_source: TileSource) -> Self {
        Self {
            out,
            format,
            tile_source,
            last: None,
            path_vertices: 0,
        }
    }

    pub fn last_snapshot(&self) -> Option<&DisplaySnapshot> {
        self.last.as_ref()
    }

    /// Vertices in the most recently received path
    pub fn path_vertices(&self) -> usize {
        self.path_vertices
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn show_tile_source(&mut self) -> std::io::Result<()> {
        writeln!(
            self.out,
            "Map Type: {} ({})",
            self.tile_source,
            self.tile_source.url_template()
        )
    }

    pub fn paint(&mut self, snapshot: &DisplaySnapshot) -> std::io::Result<()> {
        if let Some(path) = &snapshot.path {
            self.path_vertices = path.len();
        }

        match self.format {
            DisplayFormat::Labels => {
                let labels = DisplayLabels::from_snapshot(snapshot);
                writeln!(self.out, "{}", labels.lines().join(" | "))?;
                if snapshot.path.is_some() {
                    writeln!(
                        self.out,
                        "Path: {} vertices (zoom {})",
                        self.path_vertices, snapshot.zoom
                    )?;
                }
            }
            #[cfg(feature = "json")]
            DisplayFormat::Json => {
                let json = serde_json::to_string(snapshot).map_err(std::io::Error::from)?;
                writeln!(self.out, "{json}")?;
            }
        }

        self.out.flush()?;
        self.last = Some(snapshot.clone());
        Ok(())
    }

    /// Wait up to `tick` for the first event, then drain whatever else is
    /// queued without blocking.
    pub fn tick(
        &mut self,
        rx: &Receiver<WorkerEvent>,
        tick: Duration,
    ) -> std::io::Result<TickOutcome> {
        let first = match rx.recv_timeout(tick) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => return Ok(TickOutcome::Painted(0)),
            Err(RecvTimeoutError::Disconnected) => return Ok(TickOutcome::Disconnected),
        };

        let mut painted = 0;
        for event in std::iter::once(first).chain(rx.try_iter()) {
            match event {
                WorkerEvent::Snapshot(snapshot) => {
                    self.paint(&snapshot)?;
                    painted += 1;
                }
                WorkerEvent::DeviceError(message) => return Ok(TickOutcome::DeviceError(message)),
            }
        }
        Ok(TickOutcome::Painted(painted))
    }
}
