//! Model run documents: parsing, validation, and location ordering
//!
//! Two document generations are accepted. The older shape carries four raw
//! grid points per location and is merged through the spatial interpolator;
//! the newer shape carries an already-merged series and bypasses it. Both
//! feed the same internal [`ModelRun`].

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::{Coordinates, ForecastLocation, GridPoint, HourlySeries, PrecipType};
use crate::interpolate;
use crate::{GridcastError, Result};

/// Immutable snapshot of one model cycle
#[derive(Debug, Clone)]
pub struct ModelRun {
    /// Issuance instant of the model cycle
    pub base_time: DateTime<Utc>,
    /// One instant per hour index, strictly increasing
    pub forecast_times: Vec<DateTime<Utc>>,
    /// All locations of the run, cities included
    pub locations: Vec<ForecastLocation>,
}

impl ModelRun {
    /// Parse and validate a forecast document.
    ///
    /// Any contract violation (wrong grid-point count, mismatched array
    /// lengths, non-finite values) fails the whole build.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    /// Forecast locations in display order: non-city entries sorted by
    /// ascending longitude (west to east).
    #[must_use]
    pub fn places(&self) -> Vec<&ForecastLocation> {
        let mut places: Vec<&ForecastLocation> =
            self.locations.iter().filter(|l| !l.is_city).collect();
        places.sort_by(|l, r| {
            l.coordinates
                .longitude
                .total_cmp(&r.coordinates.longitude)
        });
        places
    }

    /// Number of forecast hours in the run
    #[must_use]
    pub fn hours(&self) -> usize {
        self.forecast_times.len()
    }

    fn from_raw(raw: RawDocument) -> Result<Self> {
        let forecast_times = resolve_forecast_times(&raw)?;
        let hours = forecast_times.len();

        let mut locations = Vec::with_capacity(raw.locations.len());
        for (name, location) in raw.locations {
            locations.push(convert_location(name, location, hours)?);
        }

        Ok(Self {
            base_time: raw.base_time,
            forecast_times,
            locations,
        })
    }
}

fn resolve_forecast_times(raw: &RawDocument) -> Result<Vec<DateTime<Utc>>> {
    if !raw.forecast_times.is_empty() {
        if raw
            .forecast_times
            .windows(2)
            .any(|pair| pair[0] >= pair[1])
        {
            return Err(GridcastError::malformed(
                "forecastTimes must be strictly increasing",
            ));
        }
        return Ok(raw.forecast_times.clone());
    }

    // Older documents omit the time array; hour index i is baseTime + i hours
    let hours = raw
        .locations
        .values()
        .find(|l| !l.is_city)
        .and_then(RawLocation::hour_count)
        .ok_or_else(|| {
            GridcastError::malformed("document has no forecast times and no location data")
        })?;

    Ok((0..hours)
        .map(|i| raw.base_time + Duration::hours(i as i64))
        .collect())
}

fn convert_location(name: String, raw: RawLocation, hours: usize) -> Result<ForecastLocation> {
    let context = format!("location {name}");

    if !raw.coords.latitude.is_finite() || !raw.coords.longitude.is_finite() {
        return Err(GridcastError::malformed(format!(
            "{context}: coordinates must be finite"
        )));
    }

    if raw.is_city {
        return Ok(ForecastLocation {
            name,
            coordinates: raw.coords,
            is_city: true,
            series: None,
        });
    }

    let series = match (raw.grid, raw.wx) {
        (Some(_), Some(_)) => {
            return Err(GridcastError::malformed(format!(
                "{context}: has both grid points and a merged series"
            )));
        }
        (None, None) => {
            return Err(GridcastError::malformed(format!(
                "{context}: missing grid points"
            )));
        }
        (None, Some(wx)) => {
            let series = wx.into_series();
            series.validate(&context, hours)?;
            series
        }
        (Some(grid), None) => {
            if grid.len() != 4 {
                return Err(GridcastError::malformed(format!(
                    "{context}: expected 4 grid points, got {}",
                    grid.len()
                )));
            }

            let mut points = Vec::with_capacity(4);
            for (index, point) in grid.into_iter().enumerate() {
                if !point.distance.is_finite() || point.distance < 0.0 {
                    return Err(GridcastError::malformed(format!(
                        "{context}, grid point {index}: distance must be finite and non-negative"
                    )));
                }
                let series = point.wx.into_series();
                series.validate(&format!("{context}, grid point {index}"), hours)?;
                points.push(GridPoint {
                    distance: point.distance,
                    series,
                });
            }

            interpolate::merge_series(&points)
        }
    };

    Ok(ForecastLocation {
        name,
        coordinates: raw.coords,
        is_city: false,
        series: Some(series),
    })
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(rename = "baseTime", alias = "date")]
    base_time: DateTime<Utc>,
    #[serde(rename = "forecastTimes", default)]
    forecast_times: Vec<DateTime<Utc>>,
    locations: BTreeMap<String, RawLocation>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    coords: Coordinates,
    #[serde(rename = "isCity", default)]
    is_city: bool,
    #[serde(default)]
    grid: Option<Vec<RawGridPoint>>,
    #[serde(default)]
    wx: Option<RawSeries>,
}

impl RawLocation {
    fn hour_count(&self) -> Option<i64> {
        let series = match (&self.grid, &self.wx) {
            (Some(grid), _) => &grid.first()?.wx,
            (None, Some(wx)) => wx,
            (None, None) => return None,
        };
        Some(series.temperature.len() as i64)
    }
}

#[derive(Debug, Deserialize)]
struct RawGridPoint {
    distance: f64,
    wx: RawSeries,
}

/// Precipitation type field: the merged shape stores one label per hour,
/// the grid shape a list of simultaneous labels per hour.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPrecipType {
    Label(String),
    Labels(Vec<String>),
}

impl RawPrecipType {
    fn decode(&self) -> PrecipType {
        match self {
            RawPrecipType::Label(label) => PrecipType::from_label(label),
            RawPrecipType::Labels(labels) => PrecipType::from_labels(labels),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSeries {
    temperature: Vec<f64>,
    dewpoint: Vec<f64>,
    pressure: Vec<f64>,
    lightning: Vec<f64>,
    #[serde(rename = "totalCloudCover")]
    cloud_cover: Vec<f64>,
    #[serde(rename = "vis")]
    visibility: Vec<f64>,
    #[serde(rename = "windDir")]
    wind_direction: Vec<f64>,
    #[serde(rename = "windSpd")]
    wind_speed: Vec<f64>,
    #[serde(rename = "gust")]
    wind_gust: Vec<f64>,
    #[serde(rename = "precipRate")]
    precip_rate: Vec<f64>,
    #[serde(rename = "precipType")]
    precip_type: Vec<RawPrecipType>,
    #[serde(rename = "newPrecip")]
    new_precip: Vec<f64>,
    #[serde(rename = "totalPrecip")]
    total_precip: Vec<f64>,
    #[serde(rename = "totalSnow")]
    total_snow: Vec<f64>,
}

impl RawSeries {
    fn into_series(self) -> HourlySeries {
        HourlySeries {
            temperature: self.temperature,
            dewpoint: self.dewpoint,
            pressure: self.pressure,
            lightning: self.lightning,
            cloud_cover: self.cloud_cover,
            visibility: self.visibility,
            wind_direction: self.wind_direction,
            wind_speed: self.wind_speed,
            wind_gust: self.wind_gust,
            precip_rate: self.precip_rate,
            precip_type: self.precip_type.iter().map(RawPrecipType::decode).collect(),
            new_precip: self.new_precip,
            total_precip: self.total_precip,
            total_snow: self.total_snow,
        }
    }
}
