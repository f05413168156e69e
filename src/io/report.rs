//! Report egress - writes finalized drive summaries to file
//!
//! The report is rewritten on every run. Vehicles appear in the order they
//! are given (the classifier sorts them by id). Two formats:
//! - `text`: one labelled block per vehicle
//! - `jsonl`: one JSON object per line

use crate::domain::drive::DriveSummary;
use crate::infra::config::OutputFormat;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Report writer for drive summaries
pub struct ReportWriter {
    file_path: PathBuf,
    format: OutputFormat,
}

impl ReportWriter {
    pub fn new(file_path: impl AsRef<Path>, format: OutputFormat) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        info!(
            file_path = %file_path.display(),
            format = %format.as_str(),
            "report_writer_initialized"
        );
        Self { file_path, format }
    }

    /// Render one summary in the configured format, newline-terminated
    pub fn render(&self, summary: &DriveSummary) -> String {
        match self.format {
            OutputFormat::Text => summary.to_text(),
            OutputFormat::Jsonl => format!("{}\n", summary.to_json()),
        }
    }

    /// Write all summaries, replacing any existing file
    /// Returns true if successful, false otherwise
    pub fn write_report(&self, summaries: &[DriveSummary]) -> bool {
        match self.write_all(summaries) {
            Ok(bytes) => {
                info!(
                    file = %self.file_path.display(),
                    vehicles = %summaries.len(),
                    bytes = %bytes,
                    "report_written"
                );
                true
            }
            Err(e) => {
                error!(
                    file = %self.file_path.display(),
                    error = %e,
                    "report_write_failed"
                );
                false
            }
        }
    }

    fn write_all(&self, summaries: &[DriveSummary]) -> std::io::Result<usize> {
        // Create parent directories if they don't exist
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut out = BufWriter::new(File::create(&self.file_path)?);
        let mut bytes = 0;
        for summary in summaries {
            let block = self.render(summary);
            out.write_all(block.as_bytes())?;
            bytes += block.len();
            debug!(vehicle_id = %summary.vehicle_id, "report_entry_written");
        }
        out.flush()?;

        Ok(bytes)
    }
}
