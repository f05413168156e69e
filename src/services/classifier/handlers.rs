//! Transition handlers for the DriveClassifier
//!
//! Each handler applies one state-machine edge to a vehicle's `DriveState`.
//! All elapsed times are time-of-day differences; see `Timestamp::secs_to`.

use super::Transition;
use crate::domain::clock::DayClock;
use crate::domain::drive::DriveState;
use crate::domain::types::Sample;
use tracing::debug;

/// Credit a stop to parking if longer than the threshold, else to travel.
/// Returns true if it was counted as parking.
fn credit_stop(state: &mut DriveState, gap_secs: i64, threshold_secs: i64) -> bool {
    if gap_secs > threshold_secs {
        state.parking_time = state.parking_time.add_secs(gap_secs);
        true
    } else {
        state.travel_time = state.travel_time.add_secs(gap_secs);
        false
    }
}

#[inline]
fn advance(state: &mut DriveState, sample: &Sample) {
    state.prev_speed = sample.speed;
    state.prev_timestamp = sample.timestamp;
}

/// Moving → stopped
pub(super) fn on_stop(state: &mut DriveState, sample: &Sample) -> Transition {
    let travel_secs = state.prev_timestamp.secs_to(&sample.timestamp);
    state.travel_time = state.travel_time.add_secs(travel_secs);
    state.zero_speed_since = Some(sample.timestamp);
    advance(state, sample);
    Transition::Stopped { travel_secs }
}

/// Stopped → stopped
pub(super) fn on_still_stopped(state: &mut DriveState, sample: &Sample) -> Transition {
    advance(state, sample);
    Transition::StillStopped
}

/// Stopped → moving
pub(super) fn on_resume(
    state: &mut DriveState,
    sample: &Sample,
    threshold_secs: i64,
) -> Transition {
    // A stopped state always has a run start; fall back to the last sample anyway
    let since = state.zero_speed_since.take().unwrap_or(state.prev_timestamp);
    let gap_secs = since.secs_to(&sample.timestamp);
    let parked = credit_stop(state, gap_secs, threshold_secs);
    advance(state, sample);
    Transition::Resumed { gap_secs, parked }
}

/// Moving → moving
pub(super) fn on_still_moving(state: &mut DriveState, sample: &Sample) -> Transition {
    let travel_secs = state.prev_timestamp.secs_to(&sample.timestamp);
    state.travel_time = state.travel_time.add_secs(travel_secs);
    advance(state, sample);
    Transition::StillMoving { travel_secs }
}

/// Assign the unaccounted rest of the reference day to parking or travel
pub(super) fn reconcile(state: &mut DriveState, threshold_secs: i64) {
    let remainder_secs = state.accounted().secs_to(DayClock::END_OF_DAY);
    let parked = credit_stop(state, remainder_secs, threshold_secs);

    debug!(
        vehicle_id = %state.vehicle_id,
        remainder_secs = %remainder_secs,
        parked = %parked,
        travel = %state.travel_time,
        parking = %state.parking_time,
        "drive_reconciled"
    );
}
