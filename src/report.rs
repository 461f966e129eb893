//! Report assembly: windowing, day segmentation, hourly rows and the
//! cross-location summary
//!
//! A report is a pure function of (model run, configuration, reference
//! instant). Every build constructs its own extreme tracker, so concurrent
//! builds never share state.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::astronomy;
use crate::extremes::{ExtremeTracker, MATERIALITY};
use crate::models::{ForecastLocation, ModelRun};
use crate::symbols;
use crate::{GridcastError, Result};

/// Upper bound for the per-location row count
pub const MAX_ROWS_LIMIT: usize = 208;

const HEADER_PAD: usize = 26;

/// Report build configuration, threaded explicitly into the engine
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Maximum hourly rows rendered per location (1..=208)
    pub max_rows: usize,
    /// Optional hour-of-day (0..=23) the window must open on
    pub first_hour: Option<u32>,
    /// Expose per-location blocks individually in addition to the combined
    /// report
    pub expose_blocks: bool,
    /// Time zone used for displayed times and day boundaries
    pub time_zone: Tz,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_rows: 48,
            first_hour: None,
            expose_blocks: false,
            time_zone: chrono_tz::America::Chicago,
        }
    }
}

impl ReportConfig {
    /// Reject out-of-range values before any processing begins
    pub fn validate(&self) -> Result<()> {
        if self.max_rows < 1 || self.max_rows > MAX_ROWS_LIMIT {
            return Err(GridcastError::config(format!(
                "maxRows must be between 1 and {MAX_ROWS_LIMIT}, got {}",
                self.max_rows
            )));
        }
        if let Some(hour) = self.first_hour {
            if hour > 23 {
                return Err(GridcastError::config(format!(
                    "firstHour must be between 0 and 23, got {hour}"
                )));
            }
        }
        Ok(())
    }
}

/// One rendered forecast hour
#[derive(Debug, Clone)]
pub struct HourLine {
    /// 12-hour clock label, no leading zero (e.g. "3 PM")
    pub time_label: String,
    pub vis_icon: &'static str,
    pub temperature: i32,
    pub dewpoint: i32,
    pub sky_icon: &'static str,
    /// New snow when the hour's type is snow, new liquid otherwise
    pub precip_amount: f64,
    /// 8-point compass label for the wind origin
    pub compass: &'static str,
    /// Arrow glyph pointing where the wind blows to
    pub arrow: &'static str,
    pub wind_speed: i32,
    pub wind_gust: i32,
    pub pressure: f64,
}

/// A row inside a location block
#[derive(Debug, Clone)]
pub enum BlockRow {
    /// Day-boundary header (e.g. "Wednesday 02/04")
    DayHeader(String),
    Hour(HourLine),
}

/// Finalized per-location block; immutable once assembled
#[derive(Debug, Clone)]
pub struct LocationBlock {
    pub name: String,
    /// Header line: home glyph + name, padded to align the opening date
    pub header: String,
    pub rows: Vec<BlockRow>,
}

/// The cross-location summary built from the finalized extreme trackers
#[derive(Debug, Clone)]
pub struct Summary {
    pub heading: String,
    pub bullets: Vec<String>,
}

/// A fully assembled report: location blocks in west-to-east order plus one
/// summary. Rebuilt on every invocation, never persisted.
#[derive(Debug, Clone)]
pub struct Report {
    pub blocks: Vec<LocationBlock>,
    pub summary: Summary,
}

impl Report {
    /// Look up a single location's block without rebuilding anything
    #[must_use]
    pub fn block(&self, name: &str) -> Option<&LocationBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }
}

/// Build the report for one model run.
///
/// `now` is threaded explicitly so tests are deterministic; the rendering
/// window opens at `now - 1h`, inclusive.
pub fn build_report(run: &ModelRun, config: &ReportConfig, now: DateTime<Utc>) -> Result<Report> {
    config.validate()?;

    let mut tracker = ExtremeTracker::new();
    let mut blocks = Vec::new();
    let mut last_rendered: Option<DateTime<Utc>> = None;

    for location in run.places() {
        let (block, block_last) = build_block(run, location, config, now, &mut tracker)?;
        if let Some(instant) = block_last {
            last_rendered = Some(last_rendered.map_or(instant, |t| t.max(instant)));
        }
        blocks.push(block);
    }

    let summary = build_summary(&tracker, last_rendered, config.time_zone);
    Ok(Report { blocks, summary })
}

fn build_block(
    run: &ModelRun,
    location: &ForecastLocation,
    config: &ReportConfig,
    now: DateTime<Utc>,
    tracker: &mut ExtremeTracker,
) -> Result<(LocationBlock, Option<DateTime<Utc>>)> {
    let series = location.series.as_ref().ok_or_else(|| {
        GridcastError::malformed(format!("location {}: missing forecast series", location.name))
    })?;

    let window_start = now - Duration::hours(1);
    let time_zone = config.time_zone;

    let mut header = None;
    let mut rows = Vec::new();
    let mut previous_day: Option<NaiveDate> = None;
    let mut sun_day: Option<NaiveDate> = None;
    let mut sun = None;
    let mut window_precip = 0.0;
    let mut window_snow = 0.0;
    let mut last_rendered = None;
    let mut emitted = 0;

    for (hour, instant) in run.forecast_times.iter().enumerate() {
        if *instant < window_start {
            continue;
        }

        let local = instant.with_timezone(&time_zone);
        if emitted == 0 {
            if let Some(first_hour) = config.first_hour {
                if local.hour() != first_hour {
                    continue;
                }
            }
        }

        if emitted >= config.max_rows {
            break;
        }

        let day = local.date_naive();
        if header.is_none() {
            header = Some(format!(
                "{:<HEADER_PAD$}{}",
                format!("🏠 {}", location.name),
                day_label(&local)
            ));
        } else if local.hour() == 0 || previous_day != Some(day) {
            rows.push(BlockRow::DayHeader(day_label(&local)));
        }
        previous_day = Some(day);

        if sun_day != Some(day) {
            sun_day = Some(day);
            sun = match astronomy::sunrise_sunset(&location.coordinates, day) {
                Ok(pair) => Some(pair),
                Err(error) => {
                    warn!(
                        "sunrise/sunset lookup failed for {}: {error}",
                        location.name
                    );
                    None
                }
            };
        }

        window_precip += series.new_precip[hour].max(0.0);
        window_snow += series.new_snow(hour);

        let temperature = series.temperature[hour] as i32;
        let wind_speed = series.wind_speed[hour] as i32;
        let lightning = series.lightning[hour] >= 1.0;

        rows.push(BlockRow::Hour(HourLine {
            time_label: local.format("%-I %p").to_string(),
            vis_icon: symbols::visibility_icon(series.visibility[hour], *instant, sun, time_zone),
            temperature,
            dewpoint: series.dewpoint[hour] as i32,
            sky_icon: symbols::sky_icon(
                series.cloud_cover[hour],
                lightning,
                series.precip_type[hour],
                series.precip_rate[hour],
            ),
            precip_amount: series.precip_amount(hour),
            compass: symbols::compass_label(series.wind_direction[hour]),
            arrow: symbols::wind_arrow(series.wind_direction[hour]),
            wind_speed,
            wind_gust: series.wind_gust[hour] as i32,
            pressure: series.pressure[hour],
        }));

        tracker.observe(
            &location.name,
            temperature,
            wind_speed,
            window_precip,
            window_snow,
        );
        last_rendered = Some(*instant);
        emitted += 1;
    }

    let block = LocationBlock {
        name: location.name.clone(),
        header: header.unwrap_or_else(|| format!("🏠 {}", location.name)),
        rows,
    };
    Ok((block, last_rendered))
}

fn day_label(local: &DateTime<Tz>) -> String {
    local.format("%A %m/%d").to_string()
}

fn build_summary(
    tracker: &ExtremeTracker,
    last_rendered: Option<DateTime<Utc>>,
    time_zone: Tz,
) -> Summary {
    let Some(last) = last_rendered.filter(|_| tracker.observed()) else {
        return Summary {
            heading: "No forecast hours fall inside the reporting window.".to_string(),
            bullets: Vec::new(),
        };
    };

    // The window closes at the end of the last rendered hour
    let end = (last + Duration::hours(1)).with_timezone(&time_zone);
    let heading = format!("Between now and {}:", end.format("%A %B %-d, %-I %p"));

    let high = &tracker.high;
    let low = &tracker.low;
    let wind = &tracker.wind;
    let precip = &tracker.precip;

    let mut bullets = vec![
        format!(
            "● {} can expect the highest high of {}ºF.{}",
            high.holder_list(),
            high.value,
            snide(" (Going to have to turn on the AC)", high.value <= 0)
        ),
        format!(
            "● {} should see the lowest low of {}ºF.{}",
            low.holder_list(),
            low.value,
            snide(" (Yeah. That's a real \"Low\" there eh?)", low.value >= 70)
        ),
        format!(
            "● {} {} the best chance to experience the highest sustained wind at {}mph.{}",
            wind.holder_list(),
            singular_plural(wind.holders.len(), "has", "have"),
            wind.value,
            snide(" (All together now: \"It's WIMDY!\")", wind.value >= 30)
        ),
    ];

    if precip.value < MATERIALITY {
        bullets.push("● No one is expected to see any meaningful precipitation.".to_string());
    } else {
        let mut sentence = format!(
            "● {} {} forecast to see the most precipitation with {:.2}\".",
            precip.holder_list(),
            singular_plural(precip.holders.len(), "is", "are"),
            precip.value
        );
        if precip.metadata >= MATERIALITY {
            sentence.push_str(&format!(" {:.2}\" of it falls as snow.", precip.metadata));
        }
        bullets.push(sentence);
    }

    Summary { heading, bullets }
}

fn snide(remark: &'static str, apply: bool) -> &'static str {
    if apply { remark } else { "" }
}

fn singular_plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}
