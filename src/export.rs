//! CSV record log
//!
//! One row per accepted fix, appended to a file that survives restarts. The
//! header is written only when the file is created.

use crate::error::Result;
use crate::pipeline::TrackSink;
use crate::track::Track;
use crate::types::TrackUpdate;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::info;

pub const CSV_HEADER: [&str; 7] = ["X_dis", "Y_dis", "Z_dis", "Speed", "Heading", "Date", "Time"];

/// Written in the heading column until a heading has been computed
pub const HEADING_PLACEHOLDER: &str = "--";

/// Append-only CSV log of accepted fixes
pub struct CsvTrackLog {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows_written: u64,
}

impl CsvTrackLog {
    /// Open `path` for appending, creating it with a header row if missing
    pub fn open(path: &Path) -> Result<Self> {
        let is_new = !path.exists();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        if is_new {
            writer.write_record(CSV_HEADER)?;
            writer.flush()?;
            info!(path = %path.display(), "created track log");
        } else {
            info!(path = %path.display(), "appending to existing track log");
        }

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows appended by this handle
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Append one row and flush it to disk
    pub fn append(&mut self, update: &TrackUpdate) -> Result<()> {
        self.writer.write_record(csv_row(update))?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }
}

impl TrackSink for CsvTrackLog {
    fn record(&mut self, update: &TrackUpdate, _track: &Track) -> Result<()> {
        self.append(update)
    }
}

/// Field values for one log row, in header order
pub fn csv_row(update: &TrackUpdate) -> [String; 7] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        update.position.latitude.to_string(),
        update.position.longitude.to_string(),
        text(&update.altitude),
        text(&update.speed),
        update
            .heading
            .map(|h| h.to_string())
            .unwrap_or_else(|| HEADING_PLACEHOLDER.to_string()),
        text(&update.date),
        text(&update.time),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GeoPoint;

    fn update(heading: Option<f64>) -> TrackUpdate {
        TrackUpdate {
            position: GeoPoint::new(10.00002, 20.5),
            altitude: Some("12.5".to_string()),
            speed: None,
            date: Some("2024-05-12".to_string()),
            time: Some("14:03:27".to_string()),
            heading,
            total_distance_m: 0.0,
            vertex_added: false,
            heading_updated: false,
            path_len: 1,
        }
    }

    #[test]
    fn test_row_uses_placeholder_without_heading() {
        let row = csv_row(&update(None));
        assert_eq!(row[0], "10.00002");
        assert_eq!(row[1], "20.5");
        assert_eq!(row[2], "12.5");
        assert_eq!(row[3], "");
        assert_eq!(row[4], "--");
        assert_eq!(row[6], "14:03:27");
    }

    #[test]
    fn test_row_formats_heading() {
        let row = csv_row(&update(Some(45.25)));
        assert_eq!(row[4], "45.25");
    }
}
