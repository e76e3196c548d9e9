use thiserror::Error;

/// Errors surfaced by the tracker library.
///
/// Per-field parse problems, invalid fixes and jitter-filtered fixes are not
/// errors; they are absorbed by the parser and filter. Only device, file and
/// configuration failures reach callers.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// I/O errors from the byte source or the log file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The serial device could not be opened or configured
    #[error("serial device error: {0}")]
    Serial(#[from] serialport::Error),
    /// Failure writing the CSV record log
    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Rejected configuration value
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The device stopped answering reads
    #[error("device lost after {0} consecutive read errors")]
    DeviceLost(u32),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
