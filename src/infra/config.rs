//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. DRIVE_STATS_CONFIG environment variable
//! 3. Built-in defaults (no file)

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "DRIVE_STATS_CONFIG";

/// Report rendering format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Jsonl,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Jsonl => "jsonl",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Stops up to this long count as travel, longer ones as parking
    #[serde(default = "default_short_stop_threshold_secs")]
    pub short_stop_threshold_secs: i64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { short_stop_threshold_secs: default_short_stop_threshold_secs() }
    }
}

fn default_short_stop_threshold_secs() -> i64 {
    120
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Field separator for sample records
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Skip records whose timestamp does not parse instead of passing them through
    #[serde(default)]
    pub reject_invalid_timestamps: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { delimiter: default_delimiter(), reject_invalid_timestamps: false }
    }
}

fn default_delimiter() -> char {
    ','
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_format")]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: default_output_format() }
    }
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Text
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    short_stop_threshold_secs: i64,
    delimiter: char,
    reject_invalid_timestamps: bool,
    output_format: OutputFormat,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            short_stop_threshold_secs: default_short_stop_threshold_secs(),
            delimiter: default_delimiter(),
            reject_invalid_timestamps: false,
            output_format: default_output_format(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Determine config file path from the CLI value or environment
    pub fn resolve_config_path(cli_path: Option<&str>) -> Option<String> {
        if let Some(path) = cli_path {
            return Some(path.to_string());
        }

        env::var(CONFIG_ENV_VAR).ok().filter(|p| !p.is_empty())
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if toml_config.classifier.short_stop_threshold_secs < 0 {
            anyhow::bail!(
                "short_stop_threshold_secs must not be negative in {}",
                path.display()
            );
        }

        Ok(Self {
            short_stop_threshold_secs: toml_config.classifier.short_stop_threshold_secs,
            delimiter: toml_config.input.delimiter,
            reject_invalid_timestamps: toml_config.input.reject_invalid_timestamps,
            output_format: toml_config.output.format,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries TOML file first, falls back to defaults
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "config_load_failed_using_defaults");
                Self::default()
            }
        }
    }

    /// Resolve and load configuration for a run
    pub fn load(cli_path: Option<&str>) -> Self {
        match Self::resolve_config_path(cli_path) {
            Some(path) => Self::load_from_path(path),
            None => Self::default(),
        }
    }

    // Getters for all config fields
    pub fn short_stop_threshold_secs(&self) -> i64 {
        self.short_stop_threshold_secs
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn reject_invalid_timestamps(&self) -> bool {
        self.reject_invalid_timestamps
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method for tests to set the short-stop threshold
    #[cfg(test)]
    pub fn with_short_stop_threshold_secs(mut self, secs: i64) -> Self {
        self.short_stop_threshold_secs = secs;
        self
    }

    /// Builder method for tests to reject invalid timestamps
    #[cfg(test)]
    pub fn with_reject_invalid_timestamps(mut self, reject: bool) -> Self {
        self.reject_invalid_timestamps = reject;
        self
    }
}
