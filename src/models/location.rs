//! Location and grid-point models for forecast documents

use serde::{Deserialize, Serialize};

use super::HourlySeries;

/// Geographic coordinates of a forecast location
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Coordinates {
    /// Create new coordinates
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format coordinates for log and error messages
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One of the model's discrete output cells bracketing a location.
///
/// Carries the cell-to-location distance and the same hourly variable
/// arrays as a merged series, one value per forecast-time index.
#[derive(Debug, Clone)]
pub struct GridPoint {
    /// Distance from the model cell to the target location. The unit is
    /// irrelevant as long as it is consistent across the four points.
    pub distance: f64,
    /// Hourly variables observed at this cell
    pub series: HourlySeries,
}

/// A named forecast location with its merged hourly series.
///
/// City entries (`is_city`) are map labels only: they carry no series and
/// never appear in the rendered report.
#[derive(Debug, Clone)]
pub struct ForecastLocation {
    /// Unique name within a model run
    pub name: String,
    /// Geographic coordinates
    pub coordinates: Coordinates,
    /// Label-only entry, excluded from forecasting
    pub is_city: bool,
    /// Merged hourly series (`None` for city entries)
    pub series: Option<HourlySeries>,
}
