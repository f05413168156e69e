//! Domain models - core types for drive classification
//!
//! This module contains the canonical data types used throughout the system:
//! - `Sample` - one (timestamp, vehicle, speed) observation
//! - `Timestamp` / `VehicleId` - typed fields of a sample
//! - `DayClock` - time-of-day duration used for all accounting
//! - `DriveState` / `DriveSummary` - per-vehicle running and finalized state

pub mod clock;
pub mod drive;
pub mod types;

// Re-export commonly used types at module level
pub use clock::DayClock;
pub use drive::{DriveState, DriveSummary, Motion};
pub use types::{Sample, Timestamp, VehicleId};
