//! Time-of-day durations
//!
//! Travel and parking time are accumulated as a position on a single 24h dial,
//! not as wall-clock elapsed time. Adding past midnight wraps around, so a
//! vehicle's totals always read as `HH:MM:SS` within one day.

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Add;

/// Seconds in one reference day
pub const SECS_PER_DAY: i64 = 86_400;

/// A duration expressed as a time of day in `[00:00:00, 23:59:59]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayClock(u32);

impl DayClock {
    /// Start of the reference day
    pub const MIDNIGHT: DayClock = DayClock(0);

    /// Last second of the reference day
    pub const END_OF_DAY: DayClock = DayClock(SECS_PER_DAY as u32 - 1);

    /// Build from an arbitrary second count, wrapping modulo one day
    #[inline]
    pub fn from_secs(secs: i64) -> Self {
        Self(secs.rem_euclid(SECS_PER_DAY) as u32)
    }

    /// Build from hours, minutes and seconds; `None` if out of range
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        if hours < 24 && minutes < 60 && seconds < 60 {
            Some(Self(hours * 3600 + minutes * 60 + seconds))
        } else {
            None
        }
    }

    /// Seconds since midnight
    #[inline]
    pub fn secs(&self) -> u32 {
        self.0
    }

    /// Signed seconds from `self` to `other` (negative if `other` is earlier)
    #[inline]
    pub fn secs_to(&self, other: DayClock) -> i64 {
        i64::from(other.0) - i64::from(self.0)
    }

    /// Advance by `secs` (may be negative), wrapping around midnight
    #[inline]
    pub fn add_secs(&self, secs: i64) -> Self {
        Self::from_secs(i64::from(self.0) + secs)
    }
}

impl Add for DayClock {
    type Output = DayClock;

    fn add(self, rhs: DayClock) -> DayClock {
        self.add_secs(i64::from(rhs.0))
    }
}

impl From<NaiveTime> for DayClock {
    fn from(time: NaiveTime) -> Self {
        Self(time.num_seconds_from_midnight())
    }
}

impl fmt::Display for DayClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = (self.0 / 3600, (self.0 / 60) % 60, self.0 % 60);
        write!(f, "{:02}:{:02}:{:02}", h, m, s)
    }
}

impl Serialize for DayClock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
