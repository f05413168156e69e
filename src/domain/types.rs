//! Shared types for drive classification

use crate::domain::clock::DayClock;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Timestamp layout used by sample logs (`yyyy-MM-dd hh:mm:ss`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Newtype wrapper for vehicle identifiers to provide type safety
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Sample timestamp, second resolution
///
/// An unparseable timestamp is kept as an invalid value rather than dropping
/// the record. Elapsed time involving an invalid timestamp is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamp(Option<NaiveDateTime>);

impl Timestamp {
    /// Invalid timestamp
    pub const INVALID: Timestamp = Timestamp(None);

    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(Some(datetime))
    }

    /// Parse a `yyyy-MM-dd hh:mm:ss` string, optionally wrapped in double quotes
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let unquoted = trimmed
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(trimmed);
        Self(NaiveDateTime::parse_from_str(unquoted, TIMESTAMP_FORMAT).ok())
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    pub fn datetime(&self) -> Option<NaiveDateTime> {
        self.0
    }

    /// Position of this timestamp on the reference day, ignoring the date
    pub fn time_of_day(&self) -> Option<DayClock> {
        self.0.map(|dt| DayClock::from(dt.time()))
    }

    /// Signed time-of-day seconds from `self` to `later`
    ///
    /// Calendar dates are ignored, so samples on different days at the same
    /// clock time are zero seconds apart.
    pub fn secs_to(&self, later: &Timestamp) -> i64 {
        match (self.time_of_day(), later.time_of_day()) {
            (Some(from), Some(to)) => from.secs_to(to),
            _ => 0,
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(dt) => write!(f, "{}", dt.format(TIMESTAMP_FORMAT)),
            None => f.write_str("invalid"),
        }
    }
}

/// One speed observation for a vehicle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub timestamp: Timestamp,
    pub vehicle_id: VehicleId,
    /// Speed in any consistent unit; 0 means stationary
    pub speed: i64,
}

impl Sample {
    pub fn new(timestamp: Timestamp, vehicle_id: impl Into<VehicleId>, speed: i64) -> Self {
        Self { timestamp, vehicle_id: vehicle_id.into(), speed }
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.speed == 0
    }
}
