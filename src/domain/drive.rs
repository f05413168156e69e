//! Per-vehicle drive state

use crate::domain::clock::DayClock;
use crate::domain::types::{Sample, Timestamp, VehicleId};
use serde::Serialize;

/// Whether a vehicle was last seen moving or stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Moving,
    Stopped,
}

impl Motion {
    #[inline]
    pub fn from_speed(speed: i64) -> Self {
        if speed == 0 {
            Motion::Stopped
        } else {
            Motion::Moving
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Motion::Moving => "moving",
            Motion::Stopped => "stopped",
        }
    }
}

/// Running travel/parking state for one vehicle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveState {
    pub vehicle_id: VehicleId,
    pub travel_time: DayClock,
    pub parking_time: DayClock,
    pub prev_timestamp: Timestamp,
    pub prev_speed: i64,
    /// Start of the current stopped run; `None` while moving
    pub zero_speed_since: Option<Timestamp>,
}

impl DriveState {
    /// Start tracking a vehicle from its first sample
    pub fn new(sample: &Sample) -> Self {
        Self {
            vehicle_id: sample.vehicle_id.clone(),
            travel_time: DayClock::MIDNIGHT,
            parking_time: DayClock::MIDNIGHT,
            prev_timestamp: sample.timestamp,
            prev_speed: sample.speed,
            zero_speed_since: sample.is_stopped().then_some(sample.timestamp),
        }
    }

    #[inline]
    pub fn motion(&self) -> Motion {
        Motion::from_speed(self.prev_speed)
    }

    /// Total time accounted for so far, as a time of day
    #[inline]
    pub fn accounted(&self) -> DayClock {
        self.travel_time + self.parking_time
    }
}

/// Finalized travel/parking totals for one vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriveSummary {
    #[serde(rename = "id")]
    pub vehicle_id: VehicleId,
    #[serde(rename = "travel")]
    pub travel_time: DayClock,
    #[serde(rename = "parking")]
    pub parking_time: DayClock,
}

impl DriveSummary {
    /// Human-readable report block
    pub fn to_text(&self) -> String {
        format!(
            "id: {}\ntravel time: {}\nparking time: {}\n----\n",
            self.vehicle_id, self.travel_time, self.parking_time
        )
    }

    /// Single-line JSON with both formatted and raw second values
    pub fn to_json(&self) -> String {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert("travel_secs".to_string(), self.travel_time.secs().into());
            obj.insert("parking_secs".to_string(), self.parking_time.secs().into());
        }
        value.to_string()
    }
}

impl From<DriveState> for DriveSummary {
    fn from(state: DriveState) -> Self {
        Self {
            vehicle_id: state.vehicle_id,
            travel_time: state.travel_time,
            parking_time: state.parking_time,
        }
    }
}
