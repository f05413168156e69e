//! Services - business logic and state management
//!
//! This module contains the core business logic services:
//! - `classifier` - Per-vehicle travel/parking state machine
//! - `batch` - One batch run: read samples, classify, write the report

pub mod batch;
pub mod classifier;

// Re-export commonly used types
pub use batch::run_batch;
pub use classifier::{DriveClassifier, Transition, SHORT_STOP_THRESHOLD_SECS};
