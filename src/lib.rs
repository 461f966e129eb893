//! `Gridcast` - multi-location forecast reports from gridded weather model
//! output
//!
//! This library ingests decoded model documents (four bracketing grid points
//! per location, or pre-merged hourly series), interpolates them to point
//! forecasts, and assembles a windowed, day-segmented report with
//! cross-location extremes.

pub mod astronomy;
pub mod config;
pub mod error;
pub mod extremes;
pub mod interpolate;
pub mod models;
pub mod render;
pub mod report;
pub mod symbols;
pub mod web;

// Re-export core types for public API
pub use config::GridcastConfig;
pub use error::GridcastError;
pub use extremes::{ExtremeRecord, ExtremeTracker};
pub use models::{Coordinates, ForecastLocation, GridPoint, HourlySeries, ModelRun, PrecipType};
pub use report::{Report, ReportConfig, build_report};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, GridcastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
