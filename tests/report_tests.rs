//! End-to-end tests driving the engine from a raw forecast document

use chrono::{DateTime, TimeZone, Utc};
use gridcast::report::{BlockRow, ReportConfig, build_report};
use gridcast::{ModelRun, render};
use serde_json::{Value, json};

fn series_json(temperatures: Vec<f64>) -> Value {
    let hours = temperatures.len();
    json!({
        "temperature": temperatures,
        "dewpoint": vec![60.0; hours],
        "pressure": vec![29.92; hours],
        "lightning": vec![0.0; hours],
        "totalCloudCover": vec![50.0; hours],
        "vis": vec![10.0; hours],
        "windDir": vec![315.0; hours],
        "windSpd": vec![10.0; hours],
        "gust": vec![16.0; hours],
        "precipRate": vec![0.0; hours],
        "precipType": vec![""; hours],
        "newPrecip": vec![0.0; hours],
        "totalPrecip": vec![0.0; hours],
        "totalSnow": vec![0.0; hours],
    })
}

fn document() -> String {
    json!({
        "baseTime": "2026-02-03T18:00:00Z",
        "forecastTimes": [
            "2026-02-03T18:00:00Z",
            "2026-02-03T19:00:00Z",
            "2026-02-03T20:00:00Z",
        ],
        "locations": {
            "Townsville": {
                "coords": {"lat": 44.98, "lon": -93.0},
                "grid": [
                    {"distance": 1.0, "wx": series_json(vec![70.0, 69.0, 68.0])},
                    {"distance": 2.0, "wx": series_json(vec![72.0, 71.0, 70.0])},
                    {"distance": 3.0, "wx": series_json(vec![74.0, 73.0, 72.0])},
                    {"distance": 4.0, "wx": series_json(vec![76.0, 75.0, 74.0])},
                ],
            },
            "Eastview": {
                "coords": {"lat": 44.98, "lon": -92.5},
                "wx": series_json(vec![40.0, 41.0, 42.0]),
            },
            "Saint Paul": {
                "coords": {"lat": 44.95, "lon": -93.09},
                "isCity": true,
            },
        }
    })
    .to_string()
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 3, 18, 0, 0).unwrap()
}

#[test]
fn test_grid_interpolation_reaches_rendered_line() {
    let run = ModelRun::from_json(&document()).unwrap();
    let report = build_report(&run, &ReportConfig::default(), fixed_now()).unwrap();

    // Townsville sits west of Eastview, so it renders first
    assert_eq!(report.blocks[0].name, "Townsville");
    assert_eq!(report.blocks[1].name, "Eastview");

    // Hour 0: (3*70 + 2*72 + 1*74 + 0*76) / 6 = 71.33 renders as 71
    let first_hour = report.blocks[0]
        .rows
        .iter()
        .find_map(|row| match row {
            BlockRow::Hour(line) => Some(line),
            BlockRow::DayHeader(_) => None,
        })
        .unwrap();
    assert_eq!(first_hour.temperature, 71);
    assert_eq!(first_hour.compass, "NW");
}

#[test]
fn test_dry_run_summary_sentence() {
    let run = ModelRun::from_json(&document()).unwrap();
    let report = build_report(&run, &ReportConfig::default(), fixed_now()).unwrap();

    let rendered = render::text::render(&report);
    assert!(rendered.contains("🏠 Townsville"));
    assert!(rendered.contains("No one is expected to see any meaningful precipitation."));

    // Townsville holds the high, Eastview the low, across the whole window
    assert!(rendered.contains("Townsville can expect the highest high of 71ºF."));
    assert!(rendered.contains("Eastview should see the lowest low of 40ºF."));
}

#[test]
fn test_text_output_contract() {
    let run = ModelRun::from_json(&document()).unwrap();
    let report = build_report(&run, &ReportConfig::default(), fixed_now()).unwrap();

    let rendered = render::text::render(&report);
    let hour_lines: Vec<&str> = rendered
        .lines()
        .filter(|line| line.contains('│'))
        .collect();

    // 3 hours per location, pipe-delimited into 6 columns
    assert_eq!(hour_lines.len(), 6);
    for line in hour_lines {
        assert_eq!(line.matches('│').count(), 5);
        assert!(line.contains("ºF"));
        assert!(line.contains("mph"));
    }
}

#[test]
fn test_html_variant_same_fields() {
    let run = ModelRun::from_json(&document()).unwrap();
    let report = build_report(&run, &ReportConfig::default(), fixed_now()).unwrap();

    let page = render::html::render_page(&report, "Forecast");
    assert!(page.contains("🏠 Townsville"));
    assert!(page.contains("<hr/>"));
    assert!(page.contains("↘ 10 G 16 mph"));
}

#[test]
fn test_window_excludes_stale_hours() {
    let run = ModelRun::from_json(&document()).unwrap();

    // Two hours past issuance, with the one-hour grace the first row is 19Z
    let later = Utc.with_ymd_and_hms(2026, 2, 3, 20, 0, 0).unwrap();
    let report = build_report(&run, &ReportConfig::default(), later).unwrap();

    let hours: usize = report.blocks[0]
        .rows
        .iter()
        .filter(|row| matches!(row, BlockRow::Hour(_)))
        .count();
    assert_eq!(hours, 2);
}
