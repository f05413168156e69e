//! Run statistics collection and end-of-run reporting
//!
//! Counters are plain integers: a run is a single-threaded batch, so the
//! stats are owned by whoever drives the run and logged once at the end.

use tracing::info;

/// Counters for one classification run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Lines read from the input (including skipped ones)
    pub lines_read: u64,
    /// Records accepted and handed to the classifier
    pub records_accepted: u64,
    /// Records skipped as malformed
    pub records_skipped: u64,
    /// Records carrying an unparseable timestamp (accepted or skipped)
    pub invalid_timestamps: u64,
    /// Distinct vehicles classified
    pub vehicles: u64,
    /// Summaries written to the report
    pub summaries_written: u64,
    /// Input file could not be opened
    pub input_open_failed: bool,
    /// Output file could not be opened or written
    pub output_failed: bool,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_line(&mut self) {
        self.lines_read += 1;
    }

    #[inline]
    pub fn record_accepted(&mut self) {
        self.records_accepted += 1;
    }

    #[inline]
    pub fn record_skipped(&mut self) {
        self.records_skipped += 1;
    }

    #[inline]
    pub fn record_invalid_timestamp(&mut self) {
        self.invalid_timestamps += 1;
    }

    /// True if any record was dropped or any file failed to open
    pub fn has_problems(&self) -> bool {
        self.records_skipped > 0 || self.input_open_failed || self.output_failed
    }

    /// Log the run summary
    pub fn log(&self) {
        info!(
            lines_read = %self.lines_read,
            records_accepted = %self.records_accepted,
            records_skipped = %self.records_skipped,
            invalid_timestamps = %self.invalid_timestamps,
            vehicles = %self.vehicles,
            summaries_written = %self.summaries_written,
            input_open_failed = %self.input_open_failed,
            output_failed = %self.output_failed,
            "run_summary"
        );
    }
}
