//! Per-vehicle drive classification
//!
//! The DriveClassifier consumes speed samples and keeps one `DriveState` per
//! vehicle, splitting the time between consecutive samples into travel or
//! parking:
//! - moving intervals always count as travel
//! - a stop longer than the short-stop threshold counts as parking once the
//!   vehicle moves again; shorter stops (traffic lights) count as travel
//! - at end of stream the rest of the reference day is assigned by the same
//!   threshold rule
//!
//! Samples for different vehicles may be interleaved; vehicles never interact.

mod handlers;
#[cfg(test)]
mod tests;

use crate::domain::drive::{DriveState, DriveSummary, Motion};
use crate::domain::types::{Sample, VehicleId};
use crate::infra::config::Config;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, info};

/// Default short-stop tolerance in seconds
pub const SHORT_STOP_THRESHOLD_SECS: i64 = 120;

/// How a sample moved its vehicle's state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// First sample for the vehicle; nothing accrues
    First,
    /// Moving → stopped; the preceding interval counted as travel
    Stopped { travel_secs: i64 },
    /// Stopped → stopped; the stop continues
    StillStopped,
    /// Stopped → moving; the whole stop counted as parking or travel
    Resumed { gap_secs: i64, parked: bool },
    /// Moving → moving; the interval counted as travel
    StillMoving { travel_secs: i64 },
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::First => "first",
            Transition::Stopped { .. } => "stopped",
            Transition::StillStopped => "still_stopped",
            Transition::Resumed { parked: true, .. } => "resumed_after_parking",
            Transition::Resumed { parked: false, .. } => "resumed_after_short_stop",
            Transition::StillMoving { .. } => "still_moving",
        }
    }
}

/// Classifies inter-sample intervals as travel or parking, per vehicle
pub struct DriveClassifier {
    /// Running state by vehicle
    pub(crate) drives: FxHashMap<VehicleId, DriveState>,
    /// Stops up to this many seconds are folded into travel
    pub(crate) short_stop_threshold_secs: i64,
}

impl DriveClassifier {
    /// Create a classifier using the configured short-stop threshold
    pub fn new(config: &Config) -> Self {
        Self::with_threshold(config.short_stop_threshold_secs())
    }

    /// Create a classifier with an explicit short-stop threshold
    pub fn with_threshold(short_stop_threshold_secs: i64) -> Self {
        Self { drives: FxHashMap::default(), short_stop_threshold_secs }
    }

    /// Apply one sample to its vehicle's state
    pub fn ingest(&mut self, sample: &Sample) -> Transition {
        let threshold = self.short_stop_threshold_secs;

        let state = match self.drives.entry(sample.vehicle_id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(DriveState::new(sample));
                debug!(
                    vehicle_id = %sample.vehicle_id,
                    ts = %sample.timestamp,
                    speed = %sample.speed,
                    "vehicle_first_seen"
                );
                return Transition::First;
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        let transition = match (state.motion(), Motion::from_speed(sample.speed)) {
            (Motion::Moving, Motion::Stopped) => handlers::on_stop(state, sample),
            (Motion::Stopped, Motion::Stopped) => handlers::on_still_stopped(state, sample),
            (Motion::Stopped, Motion::Moving) => handlers::on_resume(state, sample, threshold),
            (Motion::Moving, Motion::Moving) => handlers::on_still_moving(state, sample),
        };

        debug!(
            vehicle_id = %sample.vehicle_id,
            ts = %sample.timestamp,
            speed = %sample.speed,
            transition = %transition.as_str(),
            travel = %state.travel_time,
            parking = %state.parking_time,
            "sample_classified"
        );

        transition
    }

    /// Apply a sequence of samples in order
    pub fn ingest_all<'a, I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        for sample in samples {
            self.ingest(sample);
        }
    }

    /// Number of vehicles seen so far
    pub fn vehicle_count(&self) -> usize {
        self.drives.len()
    }

    /// Current state of a vehicle, if seen
    pub fn state(&self, vehicle_id: &VehicleId) -> Option<&DriveState> {
        self.drives.get(vehicle_id)
    }

    /// Run the end-of-stream reconciliation and return summaries sorted by vehicle
    ///
    /// Consumes the classifier: finalized totals are read-only.
    pub fn finalize(self) -> Vec<DriveSummary> {
        let threshold = self.short_stop_threshold_secs;

        let mut summaries: Vec<DriveSummary> = self
            .drives
            .into_values()
            .map(|mut state| {
                handlers::reconcile(&mut state, threshold);
                DriveSummary::from(state)
            })
            .collect();

        summaries.sort_by(|a, b| a.vehicle_id.cmp(&b.vehicle_id));

        info!(vehicles = %summaries.len(), threshold_secs = %threshold, "classification_finalized");
        summaries
    }
}
