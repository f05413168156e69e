//! Infrastructure - configuration and run statistics
//!
//! This module contains infrastructure concerns:
//! - `config` - Application configuration (TOML loading, defaults)
//! - `metrics` - Per-run counters and summary logging

pub mod config;
pub mod metrics;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use metrics::RunStats;
