//! Frame → fix → filter → track, and fan-out to sinks
//!
//! The pipeline owns all mutable tracking state and is driven from a single
//! thread; sinks receive one [`TrackUpdate`] per accepted fix.

use crate::config::MIN_DISTANCE_METERS;
use crate::error::Result;
use crate::filter::PositionFilter;
use crate::parser::{parse_fix, RawFrame};
use crate::track::{Track, TrackAccumulator};
use crate::types::{Fix, TrackUpdate};
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Consumer of accepted fixes (display, record log, ...)
pub trait TrackSink {
    fn record(&mut self, update: &TrackUpdate, track: &Track) -> Result<()>;
}

/// Collects updates in memory
impl TrackSink for Vec<TrackUpdate> {
    fn record(&mut self, update: &TrackUpdate, _track: &Track) -> Result<()> {
        self.push(update.clone());
        Ok(())
    }
}

/// Counters for what happened to incoming frames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipelineStats {
    pub frames: u64,
    pub invalid_fixes: u64,
    pub jitter_rejected: u64,
    pub accepted: u64,
    pub vertices: u64,
    pub sink_errors: u64,
}

/// Single-owner processing chain
#[derive(Debug, Clone)]
pub struct Pipeline {
    filter: PositionFilter,
    accumulator: TrackAccumulator,
    stats: PipelineStats,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(MIN_DISTANCE_METERS)
    }
}

impl Pipeline {
    pub fn new(min_distance_m: f64) -> Self {
        Self {
            filter: PositionFilter::new(),
            accumulator: TrackAccumulator::new(min_distance_m),
            stats: PipelineStats::default(),
        }
    }

    pub fn track(&self) -> &Track {
        self.accumulator.track()
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Parse and process one frame
    pub fn process_frame(&mut self, frame: &RawFrame) -> Option<TrackUpdate> {
        self.stats.frames += 1;
        let fix = parse_fix(frame);
        self.process_fix(&fix)
    }

    /// Run one fix through the filter and accumulator.
    /// `None` means the fix was dropped and must not be logged.
    pub fn process_fix(&mut self, fix: &Fix) -> Option<TrackUpdate> {
        if fix.position().is_none() {
            self.stats.invalid_fixes += 1;
            return None;
        }

        let Some(point) = self.filter.admit(fix, self.accumulator.track()) else {
            self.stats.jitter_rejected += 1;
            return None;
        };

        let update = self.accumulator.accept(fix, point);
        self.stats.accepted += 1;
        if update.vertex_added {
            self.stats.vertices += 1;
        }
        Some(update)
    }

    /// Process a frame and hand the result to every sink.
    ///
    /// A failing sink is logged and skipped; it never stops the pipeline or
    /// the other sinks.
    pub fn process_and_dispatch(
        &mut self,
        frame: &RawFrame,
        sinks: &mut [&mut dyn TrackSink],
    ) -> Option<TrackUpdate> {
        let update = self.process_frame(frame)?;
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.record(&update, self.accumulator.track()) {
                self.stats.sink_errors += 1;
                warn!(error = %e, "sink failed to record fix");
            }
        }
        Some(update)
    }
}
