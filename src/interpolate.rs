//! Spatial interpolation from bracketing grid points to a point location
//!
//! Continuous variables blend through a linear distance-weighted average;
//! categorical variables (precipitation type) read from the nearest point,
//! because a weighted blend of type labels is meaningless.

use crate::models::{GridPoint, HourlySeries};

/// Index of the grid point with the smallest distance. Ties resolve to the
/// first minimal index in array order.
#[must_use]
pub fn nearest_index(points: &[GridPoint]) -> usize {
    let mut result = 0;
    for (index, point) in points.iter().enumerate().skip(1) {
        if point.distance < points[result].distance {
            result = index;
        }
    }
    result
}

/// Linear distance weights. With `max_dist = max(distance) + 1` every weight
/// `max_dist - distance` stays strictly positive, so the weight sum can
/// never be zero and the farthest point still contributes.
fn weights(points: &[GridPoint]) -> Vec<f64> {
    let max_dist = points
        .iter()
        .map(|p| p.distance)
        .fold(f64::NEG_INFINITY, f64::max)
        + 1.0;
    points.iter().map(|p| max_dist - p.distance).collect()
}

/// Merge four validated grid points into one hourly series for the target
/// location. Callers with an already-merged series skip this entirely.
#[must_use]
pub fn merge_series(points: &[GridPoint]) -> HourlySeries {
    let weights = weights(points);
    let weight_sum: f64 = weights.iter().sum();
    let hours = points[0].series.len();

    let blend = |get: fn(&HourlySeries) -> &Vec<f64>| -> Vec<f64> {
        (0..hours)
            .map(|hour| {
                points
                    .iter()
                    .zip(&weights)
                    .map(|(point, weight)| weight * get(&point.series)[hour])
                    .sum::<f64>()
                    / weight_sum
            })
            .collect()
    };

    let nearest = &points[nearest_index(points)].series;

    HourlySeries {
        temperature: blend(|s| &s.temperature),
        dewpoint: blend(|s| &s.dewpoint),
        pressure: blend(|s| &s.pressure),
        lightning: blend(|s| &s.lightning),
        cloud_cover: blend(|s| &s.cloud_cover),
        visibility: blend(|s| &s.visibility),
        wind_direction: blend(|s| &s.wind_direction),
        wind_speed: blend(|s| &s.wind_speed),
        wind_gust: blend(|s| &s.wind_gust),
        precip_rate: blend(|s| &s.precip_rate),
        precip_type: nearest.precip_type.clone(),
        new_precip: blend(|s| &s.new_precip),
        total_precip: blend(|s| &s.total_precip),
        total_snow: blend(|s| &s.total_snow),
    }
}
