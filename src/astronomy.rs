//! Sunrise/sunset lookup for the day/night glyphs

use chrono::{DateTime, NaiveDate, Utc};
use sunrise::{Coordinates, SolarDay, SolarEvent};

use crate::models;
use crate::{GridcastError, Result};

/// Sunrise and sunset instants for one calendar day at the given location.
///
/// Fails on coordinates the solar model rejects; callers degrade the
/// affected glyph instead of aborting the report build.
pub fn sunrise_sunset(
    location: &models::Coordinates,
    date: NaiveDate,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let coordinates =
        Coordinates::new(location.latitude, location.longitude).ok_or_else(|| {
            GridcastError::astronomy(format!(
                "invalid coordinates: lat={}, lng={}",
                location.latitude, location.longitude
            ))
        })?;

    let solar_day = SolarDay::new(coordinates, date);
    let sunrise = solar_day.event_time(SolarEvent::Sunrise).ok_or_else(|| {
        GridcastError::astronomy(format!(
            "no sunrise for lat={}, lng={} on {date}",
            location.latitude, location.longitude
        ))
    })?;
    let sunset = solar_day.event_time(SolarEvent::Sunset).ok_or_else(|| {
        GridcastError::astronomy(format!(
            "no sunset for lat={}, lng={} on {date}",
            location.latitude, location.longitude
        ))
    })?;

    Ok((sunrise, sunset))
}
