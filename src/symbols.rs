//! Glyph resolution for sky condition, visibility and wind direction
//!
//! Every function here is pure and total: any input combination maps to a
//! glyph (possibly the empty string), never to an error.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::models::PrecipType;

const WIND_ARROWS: [&str; 8] = ["↓", "↙", "←", "↖", "↑", "↗", "→", "↘"];
const COMPASS_LABELS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Sky glyph for one forecast hour.
///
/// Decision order is significant: lightning outranks precipitation type,
/// which outranks the cloud-cover bands.
#[must_use]
pub fn sky_icon(cloud_percent: f64, lightning: bool, precip: PrecipType, rate: f64) -> &'static str {
    if lightning && rate <= 0.0 {
        return "🌩";
    }
    if lightning {
        return "⛈";
    }

    if precip.is_some() {
        return match precip {
            PrecipType::Ice => "🧊",
            PrecipType::Rain => "🌧",
            PrecipType::Snow => "🌨",
            // An unrecognized type renders as nothing rather than failing
            _ => "",
        };
    }

    // Cloud bands are closed on the left, open on the right
    if cloud_percent < 5.0 {
        "🌞"
    } else if cloud_percent < 33.0 {
        "☀"
    } else if cloud_percent < 66.0 {
        "🌤"
    } else if cloud_percent < 95.0 {
        "⛅"
    } else {
        "☁️"
    }
}

/// Visibility or day/night glyph for one forecast hour.
///
/// Low visibility wins outright; otherwise the glyph tracks the sun through
/// the day. `sun` is the `(sunrise, sunset)` pair for the hour's calendar
/// day, or `None` when the astronomical lookup failed, which degrades to a
/// neutral glyph instead of aborting the report.
#[must_use]
pub fn visibility_icon(
    visibility_miles: f64,
    instant: DateTime<Utc>,
    sun: Option<(DateTime<Utc>, DateTime<Utc>)>,
    time_zone: Tz,
) -> &'static str {
    if visibility_miles <= 3.0 {
        return "🌫";
    }
    if visibility_miles <= 6.0 {
        return "🌁";
    }

    let Some((sunrise, sunset)) = sun else {
        return "❓";
    };

    let hour = instant.with_timezone(&time_zone).hour();
    if hour == sunrise.with_timezone(&time_zone).hour()
        || hour == sunset.with_timezone(&time_zone).hour()
    {
        "🌇"
    } else if instant < sunrise || instant >= sunset {
        "🌃"
    } else {
        "🏙"
    }
}

/// Arrow glyph pointing where the wind blows to
#[must_use]
pub fn wind_arrow(degrees: f64) -> &'static str {
    WIND_ARROWS[sector(degrees)]
}

/// 8-point compass label for the direction the wind comes from
#[must_use]
pub fn compass_label(degrees: f64) -> &'static str {
    COMPASS_LABELS[sector(degrees)]
}

/// 45º sector index, centered on the compass points
fn sector(degrees: f64) -> usize {
    let normalized = degrees.rem_euclid(360.0);
    (((normalized + 22.0) % 360.0) / 45.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Chicago;
    use rstest::rstest;

    #[test]
    fn test_lightning_outranks_everything() {
        // A storm cell under a clear sky still renders as a storm
        assert_eq!(sky_icon(0.0, true, PrecipType::Rain, 0.2), "⛈");
        assert_eq!(sky_icon(100.0, true, PrecipType::None, 0.1), "⛈");
        // Lightning without a precipitation rate is dry thunder
        assert_eq!(sky_icon(0.0, true, PrecipType::Rain, 0.0), "🌩");
    }

    #[test]
    fn test_precipitation_type_glyphs() {
        assert_eq!(sky_icon(50.0, false, PrecipType::Rain, 0.1), "🌧");
        assert_eq!(sky_icon(50.0, false, PrecipType::Snow, 0.1), "🌨");
        assert_eq!(sky_icon(50.0, false, PrecipType::Ice, 0.1), "🧊");
        assert_eq!(sky_icon(50.0, false, PrecipType::Other, 0.1), "");
    }

    #[rstest]
    #[case(0.0, "🌞")]
    #[case(4.9, "🌞")]
    #[case(5.0, "☀")]
    #[case(32.9, "☀")]
    #[case(33.0, "🌤")]
    #[case(65.9, "🌤")]
    #[case(66.0, "⛅")]
    #[case(94.9, "⛅")]
    #[case(95.0, "☁️")]
    #[case(100.0, "☁️")]
    fn test_cloud_bands(#[case] cloud_percent: f64, #[case] expected: &str) {
        assert_eq!(
            sky_icon(cloud_percent, false, PrecipType::None, 0.0),
            expected
        );
    }

    #[rstest]
    #[case(0.0, "N", "↓")]
    #[case(45.0, "NE", "↙")]
    #[case(90.0, "E", "←")]
    #[case(135.0, "SE", "↖")]
    #[case(180.0, "S", "↑")]
    #[case(225.0, "SW", "↗")]
    #[case(270.0, "W", "→")]
    #[case(315.0, "NW", "↘")]
    #[case(350.0, "N", "↓")]
    #[case(337.0, "NW", "↘")]
    fn test_compass_sectors(#[case] degrees: f64, #[case] label: &str, #[case] arrow: &str) {
        assert_eq!(compass_label(degrees), label);
        assert_eq!(wind_arrow(degrees), arrow);
    }

    fn cst(hour: u32) -> DateTime<Utc> {
        Chicago
            .with_ymd_and_hms(2026, 2, 3, hour, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_visibility_fog_and_haze() {
        assert_eq!(visibility_icon(3.0, cst(12), None, Chicago), "🌫");
        assert_eq!(visibility_icon(6.0, cst(12), None, Chicago), "🌁");
    }

    #[test]
    fn test_day_night_cycle() {
        let sun = Some((cst(7), cst(17)));

        assert_eq!(visibility_icon(10.0, cst(4), sun, Chicago), "🌃");
        assert_eq!(visibility_icon(10.0, cst(7), sun, Chicago), "🌇");
        assert_eq!(visibility_icon(10.0, cst(12), sun, Chicago), "🏙");
        assert_eq!(visibility_icon(10.0, cst(17), sun, Chicago), "🌇");
        assert_eq!(visibility_icon(10.0, cst(21), sun, Chicago), "🌃");
    }

    #[test]
    fn test_failed_lookup_degrades() {
        assert_eq!(visibility_icon(10.0, cst(12), None, Chicago), "❓");
    }
}
