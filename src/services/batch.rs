//! Batch run orchestration
//!
//! Reads the whole sample log, classifies it, then writes the report. The
//! input is consumed to completion before anything is written. Failures are
//! logged and recorded in the returned `RunStats`; none abort the run.

use crate::infra::config::Config;
use crate::infra::metrics::RunStats;
use crate::io::{ReportWriter, SampleReader};
use crate::services::classifier::DriveClassifier;
use std::path::Path;
use tracing::info;

/// Classify every vehicle in `input` and write the report to `output`
pub fn run_batch(input: &Path, output: &Path, config: &Config) -> RunStats {
    let mut stats = RunStats::new();

    let samples = SampleReader::new(config).read_path(input, &mut stats);

    let mut classifier = DriveClassifier::new(config);
    classifier.ingest_all(&samples);
    stats.vehicles = classifier.vehicle_count() as u64;
    info!(samples = %samples.len(), vehicles = %stats.vehicles, "samples_classified");

    let summaries = classifier.finalize();

    let writer = ReportWriter::new(output, config.output_format());
    if writer.write_report(&summaries) {
        stats.summaries_written = summaries.len() as u64;
    } else {
        stats.output_failed = true;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_run_batch_end_to_end() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("samples.csv");
        let output = dir.path().join("report.txt");
        fs::write(
            &input,
            "\"2023-05-01 00:00:00\",truck-1,10\n\
             \"2023-05-01 00:01:00\",truck-1,0\n\
             \"2023-05-01 00:05:00\",truck-1,10\n",
        )
        .unwrap();

        let stats = run_batch(&input, &output, &Config::default());

        assert_eq!(stats.records_accepted, 3);
        assert_eq!(stats.vehicles, 1);
        assert_eq!(stats.summaries_written, 1);
        assert!(!stats.has_problems());
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "id: truck-1\ntravel time: 00:01:00\nparking time: 23:58:59\n----\n"
        );
    }

    #[test]
    fn test_missing_input_writes_empty_report() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("report.txt");

        let stats = run_batch(&dir.path().join("missing.csv"), &output, &Config::default());

        assert!(stats.input_open_failed);
        assert_eq!(stats.vehicles, 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_unwritable_output_is_recorded() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("samples.csv");
        fs::write(&input, "2023-05-01 08:00:00,a,10\n").unwrap();

        let stats = run_batch(&input, dir.path(), &Config::default());

        assert_eq!(stats.vehicles, 1);
        assert!(stats.output_failed);
        assert_eq!(stats.summaries_written, 0);
    }
}
