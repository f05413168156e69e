//! IO modules - external system interfaces
//!
//! This module contains all file IO operations:
//! - `sample_reader` - Delimited speed-sample input
//! - `report` - Per-vehicle travel/parking report output

pub mod report;
pub mod sample_reader;

// Re-export commonly used types
pub use report::ReportWriter;
pub use sample_reader::{RecordError, SampleReader};
