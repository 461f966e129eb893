//! Hourly variable series and categorical precipitation type

use crate::{GridcastError, Result};

/// Categorical precipitation type for one forecast hour.
///
/// Decoded from the model's categorical flags. Several simultaneous types
/// collapse to [`PrecipType::Ice`] (mixed precipitation glazes like freezing
/// rain does). Labels the decoder does not know map to [`PrecipType::Other`]
/// so an unexpected model field never aborts a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipType {
    None,
    Rain,
    Snow,
    Ice,
    Other,
}

impl PrecipType {
    /// Decode from the labels attached to one forecast hour.
    #[must_use]
    pub fn from_labels(labels: &[String]) -> Self {
        match labels {
            [] => PrecipType::None,
            [single] => Self::from_label(single),
            _ => PrecipType::Ice,
        }
    }

    /// Decode a single label as emitted by the model pipeline.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "" => PrecipType::None,
            "rain" => PrecipType::Rain,
            "snow" => PrecipType::Snow,
            "ice" | "freezing rain" => PrecipType::Ice,
            _ => PrecipType::Other,
        }
    }

    #[must_use]
    pub fn is_some(&self) -> bool {
        !matches!(self, PrecipType::None)
    }
}

/// Hourly variable arrays for one location or grid point.
///
/// Every array has the same length `T` as the run's forecast-time array and
/// is aligned with it index-for-index.
#[derive(Debug, Clone, Default)]
pub struct HourlySeries {
    /// Temperature in ºF
    pub temperature: Vec<f64>,
    /// Dewpoint in ºF
    pub dewpoint: Vec<f64>,
    /// Mean sea-level pressure in inHg
    pub pressure: Vec<f64>,
    /// Lightning activity (0 = none)
    pub lightning: Vec<f64>,
    /// Total cloud cover percent (0-100)
    pub cloud_cover: Vec<f64>,
    /// Visibility in miles
    pub visibility: Vec<f64>,
    /// Wind direction in degrees
    pub wind_direction: Vec<f64>,
    /// Sustained wind speed in mph
    pub wind_speed: Vec<f64>,
    /// Wind gust in mph
    pub wind_gust: Vec<f64>,
    /// Precipitation rate in in/hr
    pub precip_rate: Vec<f64>,
    /// Categorical precipitation type
    pub precip_type: Vec<PrecipType>,
    /// New liquid-equivalent precipitation this hour, inches
    pub new_precip: Vec<f64>,
    /// Cumulative liquid-equivalent precipitation since forecast start, inches
    pub total_precip: Vec<f64>,
    /// Cumulative snowfall since forecast start, inches
    pub total_snow: Vec<f64>,
}

impl HourlySeries {
    /// Number of forecast hours in this series
    #[must_use]
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    /// New snowfall for an hour: the clamped delta of the cumulative snow
    /// array. Hour 0 is defined as zero, which guards against a non-zero
    /// baseline at forecast start.
    #[must_use]
    pub fn new_snow(&self, hour: usize) -> f64 {
        if hour == 0 {
            return 0.0;
        }
        (self.total_snow[hour] - self.total_snow[hour - 1]).max(0.0)
    }

    /// The displayed precipitation amount for an hour: new snow when the
    /// hour's categorical type is snow, new liquid otherwise.
    #[must_use]
    pub fn precip_amount(&self, hour: usize) -> f64 {
        if self.precip_type[hour] == PrecipType::Snow {
            self.new_snow(hour)
        } else {
            self.new_precip[hour].max(0.0)
        }
    }

    fn numeric_fields(&self) -> [(&'static str, &[f64]); 13] {
        [
            ("temperature", &self.temperature),
            ("dewpoint", &self.dewpoint),
            ("pressure", &self.pressure),
            ("lightning", &self.lightning),
            ("totalCloudCover", &self.cloud_cover),
            ("vis", &self.visibility),
            ("windDir", &self.wind_direction),
            ("windSpd", &self.wind_speed),
            ("gust", &self.wind_gust),
            ("precipRate", &self.precip_rate),
            ("newPrecip", &self.new_precip),
            ("totalPrecip", &self.total_precip),
            ("totalSnow", &self.total_snow),
        ]
    }

    /// Check the series invariants: every array has length `expected` and
    /// every numeric value is finite. `context` names the owning location
    /// (and grid point) for error messages.
    pub fn validate(&self, context: &str, expected: usize) -> Result<()> {
        for (field, values) in self.numeric_fields() {
            if values.len() != expected {
                return Err(GridcastError::malformed(format!(
                    "{context}: field {field} has {} values, expected {expected}",
                    values.len()
                )));
            }
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(GridcastError::malformed(format!(
                    "{context}: field {field} has a non-finite value at hour {index}"
                )));
            }
        }

        if self.precip_type.len() != expected {
            return Err(GridcastError::malformed(format!(
                "{context}: field precipType has {} values, expected {expected}",
                self.precip_type.len()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_series(hours: usize) -> HourlySeries {
        HourlySeries {
            temperature: vec![30.0; hours],
            dewpoint: vec![20.0; hours],
            pressure: vec![29.92; hours],
            lightning: vec![0.0; hours],
            cloud_cover: vec![50.0; hours],
            visibility: vec![10.0; hours],
            wind_direction: vec![180.0; hours],
            wind_speed: vec![10.0; hours],
            wind_gust: vec![15.0; hours],
            precip_rate: vec![0.0; hours],
            precip_type: vec![PrecipType::None; hours],
            new_precip: vec![0.0; hours],
            total_precip: vec![0.0; hours],
            total_snow: vec![0.0; hours],
        }
    }

    #[test]
    fn test_precip_type_from_labels() {
        assert_eq!(PrecipType::from_labels(&[]), PrecipType::None);
        assert_eq!(
            PrecipType::from_labels(&["rain".to_string()]),
            PrecipType::Rain
        );
        assert_eq!(
            PrecipType::from_labels(&["freezing rain".to_string()]),
            PrecipType::Ice
        );
        // Simultaneous types glaze; treat them as ice
        assert_eq!(
            PrecipType::from_labels(&["rain".to_string(), "snow".to_string()]),
            PrecipType::Ice
        );
        assert_eq!(
            PrecipType::from_labels(&["graupel".to_string()]),
            PrecipType::Other
        );
    }

    #[test]
    fn test_new_snow_is_clamped() {
        let mut series = flat_series(4);
        series.total_snow = vec![2.0, 2.5, 2.1, 2.1];

        // Hour 0 is always zero, even with a non-zero baseline
        assert_eq!(series.new_snow(0), 0.0);
        assert!((series.new_snow(1) - 0.5).abs() < 1e-9);
        // Melt between hours never yields a negative increment
        assert_eq!(series.new_snow(2), 0.0);
        assert_eq!(series.new_snow(3), 0.0);
    }

    #[test]
    fn test_precip_amount_follows_type() {
        let mut series = flat_series(2);
        series.total_snow = vec![0.0, 0.3];
        series.new_precip = vec![0.05, 0.02];
        series.precip_type = vec![PrecipType::Rain, PrecipType::Snow];

        assert!((series.precip_amount(0) - 0.05).abs() < 1e-9);
        assert!((series.precip_amount(1) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let mut series = flat_series(4);
        series.pressure.pop();

        let err = series.validate("location Oakdale", 4).unwrap_err();
        assert!(err.to_string().contains("pressure"));
        assert!(err.to_string().contains("Oakdale"));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut series = flat_series(4);
        series.temperature[2] = f64::NAN;

        let err = series.validate("location Oakdale", 4).unwrap_err();
        assert!(err.to_string().contains("temperature"));
        assert!(err.to_string().contains("hour 2"));
    }
}
