//! Sample ingest - reads delimited speed records from a file
//!
//! Each line carries `timestamp, vehicle_id, speed`. Lines with fewer than
//! three fields are skipped with a warning; extra fields are ignored. Nothing
//! here is fatal: an input that cannot be opened yields zero samples.

use crate::domain::types::{Sample, Timestamp, VehicleId};
use crate::infra::config::Config;
use crate::infra::metrics::RunStats;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Minimum number of fields in a record
const MIN_FIELDS: usize = 3;

/// UTF-8 byte-order mark some spreadsheet exports put before the first line
const BOM: char = '\u{feff}';

/// Why a record was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected at least 3 fields, found {found}")]
    TooFewFields { found: usize },
    #[error("unparseable timestamp {raw:?}")]
    InvalidTimestamp { raw: String },
    #[error("line is not valid UTF-8")]
    NotUtf8,
}

/// Parses sample records from delimited text
pub struct SampleReader {
    delimiter: char,
    reject_invalid_timestamps: bool,
}

impl SampleReader {
    pub fn new(config: &Config) -> Self {
        Self {
            delimiter: config.delimiter(),
            reject_invalid_timestamps: config.reject_invalid_timestamps(),
        }
    }

    /// Parse one record
    ///
    /// An unparseable timestamp is passed through as invalid unless the reader
    /// is configured to reject it. An unparseable speed reads as 0.
    pub fn parse_line(&self, line: &str) -> Result<Sample, RecordError> {
        let fields: Vec<&str> = line.split(self.delimiter).collect();
        if fields.len() < MIN_FIELDS {
            return Err(RecordError::TooFewFields { found: fields.len() });
        }

        let timestamp = Timestamp::parse(fields[0]);
        if !timestamp.is_valid() && self.reject_invalid_timestamps {
            return Err(RecordError::InvalidTimestamp { raw: fields[0].trim().to_string() });
        }

        let speed_raw = fields[2].trim();
        let speed = speed_raw.parse::<i64>().unwrap_or_else(|_| {
            debug!(speed = %speed_raw, "speed_unparseable_reading_as_zero");
            0
        });

        Ok(Sample { timestamp, vehicle_id: VehicleId(fields[1].trim().to_string()), speed })
    }

    /// Read every record from `reader`, skipping malformed ones
    pub fn read<R: BufRead>(&self, reader: R, stats: &mut RunStats) -> Vec<Sample> {
        let mut samples = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            stats.record_line();

            let parsed = match line {
                Ok(line) if idx == 0 => self.parse_line(line.strip_prefix(BOM).unwrap_or(&line)),
                Ok(line) => self.parse_line(&line),
                Err(e) if e.kind() == ErrorKind::InvalidData => Err(RecordError::NotUtf8),
                Err(e) => {
                    error!(line = %line_no, error = %e, "input_read_failed");
                    break;
                }
            };

            match parsed {
                Ok(sample) => {
                    if !sample.timestamp.is_valid() {
                        stats.record_invalid_timestamp();
                        warn!(
                            line = %line_no,
                            vehicle_id = %sample.vehicle_id,
                            "invalid_timestamp_passed_through"
                        );
                    }
                    stats.record_accepted();
                    samples.push(sample);
                }
                Err(e) => {
                    if matches!(e, RecordError::InvalidTimestamp { .. }) {
                        stats.record_invalid_timestamp();
                    }
                    stats.record_skipped();
                    warn!(line = %line_no, error = %e, "malformed_record_skipped");
                }
            }
        }

        samples
    }

    /// Read every record from the file at `path`
    ///
    /// A file that cannot be opened is logged and treated as empty.
    pub fn read_path<P: AsRef<Path>>(&self, path: P, stats: &mut RunStats) -> Vec<Sample> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                error!(path = %path.display(), error = %e, "input_open_failed");
                stats.input_open_failed = true;
                return Vec::new();
            }
        };

        let samples = self.read(BufReader::new(file), stats);
        info!(path = %path.display(), samples = %samples.len(), "input_read");
        samples
    }
}
