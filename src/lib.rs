//! GPS Tracker Library
//!
//! Stream-processing core for a single GPS receiver that prints its fixes as
//! labelled text lines over a serial link.
//!
//! # Features
//!
//! - **`csv`** (default): CSV record log of accepted fixes
//! - **`cli`** (default): Build the command-line binary
//! - **`json`**: Print display snapshots as JSON lines
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Feed raw device output through the pipeline:
//! ```rust
//! use gps_tracker::{FrameReader, Pipeline};
//! use std::io::Cursor;
//!
//! let device_output = "Latitude: 47.3769\nLongitude: 8.5417\nSpeed: 0\n---------------------------\n";
//! let mut pipeline = Pipeline::default();
//! for frame in FrameReader::new(Cursor::new(device_output)) {
//!     if let Some(update) = pipeline.process_frame(&frame.unwrap()) {
//!         println!("at {:?}, {:.1} m so far", update.position, update.total_distance_m);
//!     }
//! }
//! assert_eq!(pipeline.track().path().len(), 1);
//! ```
//!
//! # Public API
//!
//! ## Parsing
//! - [`FrameReader`] - Byte stream to frames, tolerant of timeouts and bad bytes
//! - [`FrameAssembler`] - Sentinel-driven line state machine
//! - [`parse_fix`] - Frame text to [`Fix`]
//!
//! ## Tracking
//! - [`PositionFilter`] - Moving average and jitter gate
//! - [`TrackAccumulator`] - Motion gate, path vertices, distance, heading
//! - [`Pipeline`] - All of the above behind one call, plus [`TrackSink`] fan-out
//!
//! ## Sinks and runtime
//! - `CsvTrackLog` - Append-only record file (feature `csv`)
//! - [`ConsoleDisplay`] - Label rendering for the UI loop
//! - [`spawn_worker`] - Background device reader feeding a channel
//!
//! ## Geodesy
//! - [`haversine_distance`], [`initial_bearing`]

pub mod config;
pub mod display;
pub mod error;
#[cfg(feature = "csv")]
pub mod export;
pub mod filter;
pub mod geo;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod track;
pub mod types;
pub mod worker;

pub use config::*;
pub use display::*;
pub use error::*;
#[cfg(feature = "csv")]
pub use export::*;
pub use filter::*;
pub use geo::*;
pub use logging::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
pub use pipeline::*;
pub use track::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;
pub use worker::*;
